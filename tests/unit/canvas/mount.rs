use super::*;

const KANJIVG_ICHI: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.0//EN" "http://www.w3.org/TR/2001/REC-SVG-20010904/DTD/svg10.dtd" [
<!ATTLIST g
xmlns:kvg CDATA #FIXED "http://kanjivg.tagaini.net"
kvg:element CDATA #IMPLIED >
]>
<svg xmlns="http://www.w3.org/2000/svg" width="109" height="109" viewBox="0 0 109 109">
<g id="kvg:StrokePaths_04e00" style="fill:none;stroke:#000000;stroke-width:3;">
<g id="kvg:04e00" kvg:element="一" kvg:radical="general">
	<path id="kvg:04e00-s1" kvg:type="㇐" d="M11,54.25c3.37,0.65,7.69,0.87,11.58,0.55c20.6-1.67,46.34-4.3,67.92-4.52c4.44-0.05,7.82,0.3,10.01,0.54"/>
</g>
</g>
<g id="kvg:StrokeNumbers_04e00" style="font-size:8;fill:#808080">
	<text transform="matrix(1 0 0 1 4.25 45.13)">1</text>
</g>
</svg>
"#;

const TWO_STROKES_WITH_GRADIENT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100">
  <defs>
    <linearGradient id="g0" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#000"/></linearGradient>
    <clipPath id="clip"><path d="M0,0 L100,0 L100,100 Z"/></clipPath>
  </defs>
  <path d="M10,10 L40,50" stroke="url(#g0)" fill="none"/>
  <path d="M0 80 h60" stroke="#000" fill="none"/>
  <text x="5" y="5">1</text>
  <text x="5" y="75">2</text>
</svg>"##;

#[test]
fn mounts_kanjivg_markup_with_doctype_and_prefixed_attributes() {
    let canvas = Canvas::from_markup(KANJIVG_ICHI).unwrap();
    assert_eq!(canvas.size(), (109.0, 109.0));
    assert_eq!(canvas.strokes().len(), 1);
    assert_eq!(canvas.labels().len(), 1);
    assert_eq!(canvas.labels()[0].text, "1");
    assert_eq!(canvas.strokes()[0].id.as_deref(), Some("kvg:04e00-s1"));
    assert!(canvas.strokes()[0].length > 85.0);
}

#[test]
fn collects_strokes_in_document_order_and_skips_defs_paths() {
    let canvas = Canvas::from_markup(TWO_STROKES_WITH_GRADIENT).unwrap();
    let lengths = canvas.stroke_lengths();
    assert_eq!(lengths.len(), 2);
    assert!((lengths[0] - 50.0).abs() < 1e-9);
    assert!((lengths[1] - 60.0).abs() < 1e-9);
    assert_eq!(canvas.label_count(), 2);
    assert_eq!(canvas.strokes()[0].gradient.as_deref(), Some("g0"));
    assert!(canvas.strokes()[1].gradient.is_none());
    assert!(canvas.gradient("g0").is_some());
}

#[test]
fn gradient_follows_progress_across_bounds() {
    let mut canvas = Canvas::from_markup(TWO_STROKES_WITH_GRADIENT).unwrap();
    canvas.set_gradient_progress(0, 0.5);
    let span = canvas.gradient("g0").unwrap();
    assert_eq!(span.from, Point::new(10.0, 10.0));
    assert_eq!(span.to, Point::new(25.0, 30.0));

    // No gradient attached: nothing to move, nothing to fail.
    canvas.set_gradient_progress(1, 0.5);
    canvas.set_gradient_progress(99, 0.5);
}

#[test]
fn presentation_setters_ignore_out_of_range_indices() {
    let mut canvas = Canvas::from_markup(TWO_STROKES_WITH_GRADIENT).unwrap();
    canvas.set_stroke_offset(7, 1.0);
    canvas.set_label_lit(7, false);
    canvas.set_stroke_dash(0, 50.0);
    canvas.set_stroke_offset(0, 12.5);
    assert_eq!(canvas.stroke_offset(0), Some(12.5));
    assert_eq!(canvas.stroke_style(0).unwrap().dash_array, Some(50.0));
    assert_eq!(canvas.stroke_offset(1), None);
}

#[test]
fn surrounding_text_is_trimmed_away() {
    let wrapped = format!("<!-- served by cdn -->\n{TWO_STROKES_WITH_GRADIENT}\n<p>trailer</p>");
    let canvas = Canvas::from_markup(&wrapped).unwrap();
    assert_eq!(canvas.strokes().len(), 2);
}

#[test]
fn svg_without_strokes_mounts_empty() {
    let canvas =
        Canvas::from_markup(r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"></svg>"#)
            .unwrap();
    assert!(canvas.strokes().is_empty());
    assert!(canvas.labels().is_empty());
}

#[test]
fn malformed_markup_is_a_markup_error() {
    let err = Canvas::from_markup("<svg><path d=").unwrap_err();
    assert!(err.is_unavailable());
    let err = Canvas::from_markup("not an svg").unwrap_err();
    assert!(matches!(err, HitsujunError::Markup(_)));
}

#[test]
fn gradient_refs_accept_quotes() {
    assert_eq!(gradient_ref("url(#a)").as_deref(), Some("a"));
    assert_eq!(gradient_ref(" url('#b') ").as_deref(), Some("b"));
    assert_eq!(gradient_ref("url(#)"), None);
    assert_eq!(gradient_ref("#000"), None);
}
