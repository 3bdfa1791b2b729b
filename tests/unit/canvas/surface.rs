use super::*;

fn transition(timing: TransitionTiming) -> StrokeTransition {
    StrokeTransition {
        delay_ms: 100.0,
        duration_ms: 400.0,
        timing,
        from_offset: 80.0,
        to_offset: 0.0,
    }
}

#[test]
fn offset_holds_during_delay_then_reaches_target() {
    let t = transition(TransitionTiming::Linear);
    assert_eq!(t.offset_at(0.0), 80.0);
    assert_eq!(t.offset_at(100.0), 80.0);
    assert_eq!(t.offset_at(300.0), 40.0);
    assert_eq!(t.offset_at(500.0), 0.0);
    assert_eq!(t.offset_at(10_000.0), 0.0);
    assert_eq!(t.end_ms(), 500.0);
}

#[test]
fn easing_shapes_the_midpoint() {
    let t = transition(TransitionTiming::EaseIn);
    let mid = t.offset_at(300.0);
    assert!(mid > 40.0, "ease-in draws slower at first (offset {mid})");
}

#[test]
fn zero_duration_jumps_after_delay() {
    let t = StrokeTransition {
        duration_ms: 0.0,
        ..transition(TransitionTiming::Ease)
    };
    assert_eq!(t.offset_at(99.0), 80.0);
    assert_eq!(t.offset_at(101.0), 0.0);
}
