//! Skip, step and play/pause buttons.
//!
//! Controls only read [`CanvasState`] and call [`Driver`] operations; they never touch the
//! container themselves.

use crate::animation::clock::Clock;
use crate::animation::driver::Driver;
use crate::animation::extract::StrokeMeta;
use crate::animation::options::AnimationOverrides;
use crate::animation::state::CanvasState;
use crate::foundation::core::CanvasId;

/// Where "step back" lands from `current`, if anywhere.
///
/// Inside stroke `k > 0` this is the start of stroke `k - 1`. Outside every stroke window
/// (at the very end, or on zero-length strokes) it is the start of the latest stroke that
/// ended at or before `current`.
pub fn step_backward_target(metas: &[StrokeMeta], current: f64) -> Option<f64> {
    match containing(metas, current) {
        Some(0) => None,
        Some(k) => Some(metas[k - 1].unit_start),
        None if current > 0.0 => metas
            .iter()
            .rev()
            .find(|m| m.unit_end <= current)
            .map(|m| m.unit_start),
        None => None,
    }
}

/// Where "step forward" lands from `current`, if anywhere.
///
/// Inside a stroke this is the start of the next one; inside the last stroke it is
/// `total_units` exactly.
pub fn step_forward_target(metas: &[StrokeMeta], current: f64, total_units: f64) -> Option<f64> {
    match containing(metas, current) {
        Some(k) if k + 1 < metas.len() => Some(metas[k + 1].unit_start),
        Some(_) => Some(total_units),
        None => metas
            .iter()
            .find(|m| m.unit_start > current)
            .map(|m| m.unit_start),
    }
}

/// Step back is enabled inside any stroke but the first, or past the start between strokes.
pub fn can_step_backward(metas: &[StrokeMeta], current: f64) -> bool {
    if metas.is_empty() {
        return false;
    }
    match containing(metas, current) {
        Some(k) => k > 0,
        None => current > 0.0,
    }
}

/// Step forward (and skip to end) is enabled until the end of the timeline.
pub fn can_step_forward(metas: &[StrokeMeta], current: f64, total_units: f64) -> bool {
    !metas.is_empty() && current < total_units
}

fn containing(metas: &[StrokeMeta], unit: f64) -> Option<usize> {
    metas.iter().position(|m| m.units().contains(unit))
}

/// What the button row should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TransportView {
    /// A container is mounted.
    pub enabled: bool,
    /// Show "pause" instead of "play".
    pub is_animating: bool,
    /// Rounded position is past the start and short of the end.
    pub has_progress: bool,
    /// Rounded position reached the rounded end.
    pub is_complete: bool,
    /// Skip-to-start and step-back buttons.
    pub can_step_backward: bool,
    /// Step-forward and skip-to-end buttons.
    pub can_step_forward: bool,
}

impl TransportView {
    /// Derive the view from a canvas's state.
    pub fn of(state: &CanvasState) -> Self {
        let total = state.total_units().round().max(0.0);
        let current = state.current_unit().round().max(0.0);
        let is_complete = total > 0.0 && current >= total;
        let metas = state.metas();
        Self {
            enabled: state.has_container(),
            is_animating: state.is_animating(),
            has_progress: current > 0.0 && !is_complete,
            is_complete,
            can_step_backward: can_step_backward(metas, state.current_unit()),
            can_step_forward: can_step_forward(metas, state.current_unit(), state.total_units()),
        }
    }
}

/// Button row bound to one canvas.
#[derive(Clone, Copy, Debug, Default)]
pub struct Transport {
    canvas: CanvasId,
    play_options: AnimationOverrides,
}

impl Transport {
    /// Controls for `canvas`, playing with default options.
    pub fn new(canvas: CanvasId) -> Self {
        Self {
            canvas,
            play_options: AnimationOverrides::default(),
        }
    }

    /// Use `options` when the play button starts a fresh run.
    pub fn with_play_options(mut self, options: AnimationOverrides) -> Self {
        self.play_options = options;
        self
    }

    /// Canvas these controls drive.
    pub fn canvas(&self) -> CanvasId {
        self.canvas
    }

    /// Current button state; `None` for a canvas the driver never saw.
    pub fn view<C: Clock>(&self, driver: &Driver<C>) -> Option<TransportView> {
        driver.state(self.canvas).map(TransportView::of)
    }

    /// Seek to the beginning.
    pub fn skip_to_start<C: Clock>(&self, driver: &mut Driver<C>) {
        driver.seek(self.canvas, 0.0);
    }

    /// Seek to the end.
    pub fn skip_to_end<C: Clock>(&self, driver: &mut Driver<C>) {
        let total = driver
            .state(self.canvas)
            .map_or(0.0, CanvasState::total_units);
        driver.seek(self.canvas, total);
    }

    /// Seek to the previous stroke's start. Returns the target, if one applied.
    pub fn step_backward<C: Clock>(&self, driver: &mut Driver<C>) -> Option<f64> {
        let state = driver.state(self.canvas).filter(|s| s.has_container())?;
        let target = step_backward_target(state.metas(), state.current_unit())?;
        driver.seek(self.canvas, target);
        Some(target)
    }

    /// Seek to the next stroke's start (or the end). Returns the target, if one applied.
    pub fn step_forward<C: Clock>(&self, driver: &mut Driver<C>) -> Option<f64> {
        let state = driver.state(self.canvas).filter(|s| s.has_container())?;
        let target =
            step_forward_target(state.metas(), state.current_unit(), state.total_units())?;
        driver.seek(self.canvas, target);
        Some(target)
    }

    /// Pause while animating, resume from partial progress, otherwise play from the start.
    pub fn toggle_play<C: Clock>(&self, driver: &mut Driver<C>) {
        let Some(view) = self.view(driver).filter(|v| v.enabled) else {
            return;
        };
        if view.is_animating {
            driver.pause(self.canvas);
        } else if view.has_progress {
            driver.resume(self.canvas);
        } else {
            driver.play(self.canvas, &self.play_options);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controls/transport.rs"]
mod tests;
