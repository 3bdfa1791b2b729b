use super::*;

#[test]
fn span_contains_is_half_open() {
    let s = Span::from_len(10.0, 20.0);
    assert!(s.contains(10.0));
    assert!(s.contains(29.999));
    assert!(!s.contains(30.0));
    assert!(!s.contains(9.999));
}

#[test]
fn span_progress_clamps_and_handles_empty() {
    let s = Span::from_len(100.0, 50.0);
    assert_eq!(s.progress(0.0), 0.0);
    assert_eq!(s.progress(125.0), 0.5);
    assert_eq!(s.progress(500.0), 1.0);

    let empty = Span::from_len(5.0, 0.0);
    assert!(empty.is_empty());
    assert_eq!(empty.progress(4.0), 0.0);
    assert_eq!(empty.progress(5.0), 0.0);
    assert_eq!(empty.progress(6.0), 1.0);
}

#[test]
fn span_shift_moves_both_bounds() {
    let s = Span::from_len(0.0, 10.0).shift(500.0);
    assert_eq!(s.start, 500.0);
    assert_eq!(s.end, 510.0);
}

#[test]
fn canvas_id_display() {
    assert_eq!(CanvasId(3).to_string(), "canvas#3");
    assert_eq!(CanvasId::MAIN, CanvasId(0));
}

#[test]
fn default_canvas_is_main() {
    assert_eq!(CanvasId::default(), CanvasId::MAIN);
}
