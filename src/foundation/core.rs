pub use kurbo::{BezPath, Point, Rect};

/// Identity of a mounted canvas; every canvas owns an independent animation session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CanvasId(pub u32);

impl CanvasId {
    /// The canvas used by single-canvas hosts (the CLI, the default player page).
    pub const MAIN: CanvasId = CanvasId(0);
}

impl Default for CanvasId {
    fn default() -> Self {
        Self::MAIN
    }
}

impl std::fmt::Display for CanvasId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "canvas#{}", self.0)
    }
}

/// Half-open window `[start, end)` on one of the two timeline axes (length units or ms).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Inclusive start.
    pub start: f64,
    /// Exclusive end.
    pub end: f64,
}

impl Span {
    /// Build a span from its start and extent.
    pub fn from_len(start: f64, len: f64) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    /// Extent of the span.
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    /// Return `true` when the span covers no distance.
    pub fn is_empty(self) -> bool {
        self.len() <= 0.0
    }

    /// Return `true` when `v` is inside `[start, end)`.
    pub fn contains(self, v: f64) -> bool {
        self.start <= v && v < self.end
    }

    /// Shift both bounds by `delta`.
    pub fn shift(self, delta: f64) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Linear progress of `v` through the span, clamped to `[0, 1]`.
    ///
    /// Empty spans report `0` up to `start` and `1` past it.
    pub fn progress(self, v: f64) -> f64 {
        if v <= self.start {
            return 0.0;
        }
        if v >= self.end {
            return 1.0;
        }
        (v - self.start) / self.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
