use kurbo::{ParamCurveArclen, Shape};

use crate::foundation::core::{BezPath, Rect};

/// Arc-length accuracy used for stroke measurement, in user units.
pub const ARCLEN_ACCURACY: f64 = 1e-3;

/// Parse SVG path data. Blank or malformed data yields `None`.
pub fn parse_path_data(d: &str) -> Option<BezPath> {
    let d = d.trim();
    if d.is_empty() {
        return None;
    }
    BezPath::from_svg(d).ok()
}

/// Total arc length of `path`, summed over its segments.
pub fn path_length(path: &BezPath) -> f64 {
    path.segments()
        .map(|seg| seg.arclen(ARCLEN_ACCURACY))
        .sum()
}

/// Tight bounding box, `None` for a path without segments.
pub fn path_bounds(path: &BezPath) -> Option<Rect> {
    if path.segments().next().is_none() {
        return None;
    }
    Some(path.bounding_box())
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/geometry.rs"]
mod tests;
