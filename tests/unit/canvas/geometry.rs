use super::*;

#[test]
fn straight_lines_measure_exactly() {
    let p = parse_path_data("M10,10 L40,50").unwrap();
    assert!((path_length(&p) - 50.0).abs() < 1e-9);

    let p = parse_path_data("M0 0 h10 v10").unwrap();
    assert!((path_length(&p) - 20.0).abs() < 1e-9);
}

#[test]
fn cubic_matches_known_quarter_circle_length() {
    // Standard 4-point circle approximation, radius 100.
    let p = parse_path_data("M100,0 C100,55.228475 55.228475,100 0,100").unwrap();
    let quarter = std::f64::consts::PI * 100.0 / 2.0;
    assert!((path_length(&p) - quarter).abs() < 0.1);
}

#[test]
fn kanjivg_style_relative_curves_parse() {
    let d = "M11.75,53.75c3,0.75,8.25,0.75,11.25,0.5c20.5-1.5,51.5-4.25,73.5-3.5c3.5,0.12,6.5,0.25,8.25,0.5";
    let p = parse_path_data(d).unwrap();
    let len = path_length(&p);
    assert!(len > 90.0 && len < 110.0, "len={len}");
    let b = path_bounds(&p).unwrap();
    assert!(b.x0 >= 11.0 && b.x1 <= 105.0);
}

#[test]
fn blank_or_bad_data_is_rejected() {
    assert!(parse_path_data("   ").is_none());
    assert!(parse_path_data("M 10 Z Q").is_none());
    assert!(path_bounds(&BezPath::new()).is_none());
}
