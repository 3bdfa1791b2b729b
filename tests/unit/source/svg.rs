use std::path::PathBuf;

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_source_svg").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn file_names_use_five_digit_hex() {
    assert_eq!(svg_file_name('一'), "04e00.svg");
    assert_eq!(svg_file_name('あ'), "03042.svg");
    assert_eq!(svg_file_name('𠀋'), "2000b.svg");
}

#[test]
fn extracts_svg_element_from_wrapped_text() {
    let text = "<?xml version=\"1.0\"?>\n<!DOCTYPE svg>\n<SVG width=\"1\"><g/></SVG>\ntrailing";
    assert_eq!(
        extract_svg_element(text),
        Some("<SVG width=\"1\"><g/></SVG>")
    );
}

#[test]
fn extraction_skips_lookalike_tags_and_needs_a_close_tag() {
    assert_eq!(
        extract_svg_element("<svgx/><svg></svg>"),
        Some("<svg></svg>")
    );
    assert_eq!(extract_svg_element("<svg width=\"1\">"), None);
    assert_eq!(extract_svg_element(""), None);
}

#[test]
fn dir_source_reads_and_trims() {
    let dir = scratch_dir("reads");
    std::fs::write(
        dir.join("04e00.svg"),
        "<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>\n",
    )
    .unwrap();

    let src = DirStrokeSource::new(&dir);
    let svg = src.fetch_stroke_svg('一').unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn dir_source_reports_missing_and_empty_as_not_found() {
    let dir = scratch_dir("missing");
    std::fs::write(dir.join("04e8c.svg"), "").unwrap();

    let src = DirStrokeSource::new(&dir);
    assert!(matches!(
        src.fetch_stroke_svg('一'),
        Err(HitsujunError::NotFound(_))
    ));
    assert!(matches!(
        src.fetch_stroke_svg('二'),
        Err(HitsujunError::NotFound(_))
    ));
}
