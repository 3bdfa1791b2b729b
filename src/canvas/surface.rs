use crate::animation::ease::TransitionTiming;

/// A declared, host-animated change of a stroke's dash offset.
///
/// Mirrors a CSS `stroke-dashoffset` transition: nothing moves for `delay_ms`, then the offset
/// eases from `from_offset` to `to_offset` over `duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeTransition {
    /// Wait before the transition starts.
    pub delay_ms: f64,
    /// Transition length.
    pub duration_ms: f64,
    /// Easing curve.
    pub timing: TransitionTiming,
    /// Offset when the transition was declared.
    pub from_offset: f64,
    /// Offset once the transition ends.
    pub to_offset: f64,
}

impl StrokeTransition {
    /// Offset `since_declared_ms` after the transition was declared.
    pub fn offset_at(&self, since_declared_ms: f64) -> f64 {
        let t = since_declared_ms - self.delay_ms;
        if t <= 0.0 {
            return self.from_offset;
        }
        if self.duration_ms <= 0.0 || t >= self.duration_ms {
            return self.to_offset;
        }
        let p = self.timing.apply(t / self.duration_ms);
        self.from_offset + (self.to_offset - self.from_offset) * p
    }

    /// Wall-clock span the transition occupies after declaration.
    pub fn end_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms.max(0.0)
    }
}

/// Capability interface through which the driver changes stroke presentation.
///
/// Indices are draw-order stroke indices (labels share the index of their stroke). Setters
/// ignore out-of-range indices. Only the driver calls the setters.
pub trait StrokeSurface {
    /// Arc length of every stroke, in draw order.
    fn stroke_lengths(&self) -> Vec<f64>;

    /// Number of stroke-order labels.
    fn label_count(&self) -> usize;

    /// Set the dash pattern length (one dash as long as the stroke).
    fn set_stroke_dash(&mut self, index: usize, length: f64);

    /// Set the visible-length offset: `length` hides the stroke, `0` draws it fully.
    fn set_stroke_offset(&mut self, index: usize, offset: f64);

    /// Declare (or with `None`, remove) a transition on the stroke's offset.
    fn set_stroke_transition(&mut self, index: usize, transition: Option<StrokeTransition>);

    /// Highlight a label once its stroke has started; dim it otherwise.
    fn set_label_lit(&mut self, index: usize, lit: bool);

    /// Show or hide a label entirely.
    fn set_label_visible(&mut self, index: usize, visible: bool);

    /// Move a stroke's gradient marker to `progress` in `[0, 1]`. Best-effort and cosmetic.
    fn set_gradient_progress(&mut self, _index: usize, _progress: f64) {}

    /// `false` if the host animates declared transitions itself; the play loop then stops
    /// writing per-frame offsets and only publishes position and labels.
    fn wants_frame_offsets(&self) -> bool {
        true
    }

    /// Current offset of a stroke, when the surface can report it.
    fn stroke_offset(&self, _index: usize) -> Option<f64> {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/surface.rs"]
mod tests;
