use crate::animation::clock::Clock;
use crate::animation::driver::Driver;
use crate::animation::state::CanvasState;
use crate::foundation::core::CanvasId;

/// What the timeline slider should show.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrubberView {
    /// Slider maximum: `max(1, round(total_units))`.
    pub max: f64,
    /// Slider value: the unrounded current position.
    pub value: f64,
    /// Filled share of the track, `0` for an empty timeline.
    pub progress_percent: f64,
    /// Disabled without a container.
    pub enabled: bool,
}

impl ScrubberView {
    /// Derive the view from a canvas's state.
    pub fn of(state: &CanvasState) -> Self {
        let total = state.total_units();
        Self {
            max: total.round().max(1.0),
            value: state.current_unit(),
            progress_percent: if total > 0.0 {
                state.current_unit() / total * 100.0
            } else {
                0.0
            },
            enabled: state.has_container(),
        }
    }
}

/// Timeline slider bound to one canvas.
///
/// Dragging pauses a running animation and resumes it on release; positions in between
/// are plain seeks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scrubber {
    canvas: CanvasId,
    was_animating: bool,
}

impl Scrubber {
    /// Slider for `canvas`.
    pub fn new(canvas: CanvasId) -> Self {
        Self {
            canvas,
            was_animating: false,
        }
    }

    /// Return `true` between a drag start that interrupted playback and its release.
    pub fn was_animating(&self) -> bool {
        self.was_animating
    }

    /// Current slider state; `None` for a canvas the driver never saw.
    pub fn view<C: Clock>(&self, driver: &Driver<C>) -> Option<ScrubberView> {
        driver.state(self.canvas).map(ScrubberView::of)
    }

    /// Drag start.
    pub fn pointer_down<C: Clock>(&mut self, driver: &mut Driver<C>) {
        self.was_animating = driver
            .state(self.canvas)
            .is_some_and(CanvasState::is_animating);
        if self.was_animating {
            driver.pause(self.canvas);
        }
    }

    /// Drag move or keyboard input.
    pub fn input<C: Clock>(&mut self, driver: &mut Driver<C>, unit: f64) {
        driver.seek(self.canvas, unit);
    }

    /// Drag end.
    pub fn pointer_up<C: Clock>(&mut self, driver: &mut Driver<C>) {
        if std::mem::take(&mut self.was_animating) {
            driver.resume(self.canvas);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controls/scrubber.rs"]
mod tests;
