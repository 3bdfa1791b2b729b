//! Shared animation state, one [`CanvasState`] per mounted canvas.
//!
//! Widgets read from here; only the [`Driver`](crate::Driver) writes. Every publish bumps
//! [`CanvasState::revision`], so a reader can poll cheaply for change.

use std::collections::BTreeMap;

use crate::animation::extract::{StrokeMeta, StrokeTable};
use crate::animation::options::AnimationOptions;
use crate::animation::schedule::{CallbackHandle, CallbackSchedule};
use crate::canvas::surface::StrokeSurface;
use crate::foundation::core::CanvasId;

/// Where a canvas's animation is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    /// Position fixed, nothing scheduled.
    #[default]
    Idle,
    /// Wall clock running; a frame request and a completion timeout are pending.
    Playing,
    /// Position captured at a specific instant, nothing scheduled.
    Paused,
}

/// Run state of one canvas's animation.
#[derive(Debug, Default)]
pub(crate) struct AnimationSession {
    pub(crate) phase: PlaybackPhase,
    /// Wall-clock reading that corresponds to timeline ms 0; `None` unless playing.
    pub(crate) start_wall_clock_ms: Option<f64>,
    /// Position captured by the last pause.
    pub(crate) paused_at_ms: Option<f64>,
    pub(crate) schedule: CallbackSchedule,
    pub(crate) frame: Option<CallbackHandle>,
    pub(crate) completion: Option<CallbackHandle>,
    pub(crate) last_options: AnimationOptions,
}

impl AnimationSession {
    pub(crate) fn with_options(options: AnimationOptions) -> Self {
        Self {
            last_options: options,
            ..Self::default()
        }
    }

    /// Drop every pending callback and forget the running anchor.
    pub(crate) fn cancel_callbacks(&mut self) -> usize {
        self.frame = None;
        self.completion = None;
        self.start_wall_clock_ms = None;
        self.schedule.clear()
    }
}

/// Everything known about one canvas.
pub struct CanvasState {
    pub(crate) surface: Option<Box<dyn StrokeSurface>>,
    pub(crate) generation: u64,
    pub(crate) table: Option<StrokeTable>,
    pub(crate) position_ms: f64,
    pub(crate) current_unit: f64,
    pub(crate) finished: Vec<bool>,
    pub(crate) stroke_order_visible: bool,
    pub(crate) revision: u64,
    pub(crate) session: AnimationSession,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            surface: None,
            generation: 0,
            table: None,
            position_ms: 0.0,
            current_unit: 0.0,
            finished: Vec::new(),
            stroke_order_visible: true,
            revision: 0,
            session: AnimationSession::default(),
        }
    }
}

impl std::fmt::Debug for CanvasState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasState")
            .field("has_container", &self.surface.is_some())
            .field("generation", &self.generation)
            .field("strokes", &self.table.as_ref().map(StrokeTable::len))
            .field("position_ms", &self.position_ms)
            .field("current_unit", &self.current_unit)
            .field("finished", &self.finished)
            .field("stroke_order_visible", &self.stroke_order_visible)
            .field("revision", &self.revision)
            .field("session", &self.session)
            .finish()
    }
}

impl CanvasState {
    /// Return `true` while a container is mounted.
    pub fn has_container(&self) -> bool {
        self.surface.is_some()
    }

    /// Mount generation; bumped each time a new container replaces the old one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stroke timing table, once computed for the current container.
    pub fn stroke_table(&self) -> Option<&StrokeTable> {
        self.table.as_ref()
    }

    /// Per-stroke records; empty until computed.
    pub fn metas(&self) -> &[StrokeMeta] {
        self.table.as_ref().map_or(&[], |t| t.metas())
    }

    /// Timeline length in units; `0` until computed.
    pub fn total_units(&self) -> f64 {
        self.table.as_ref().map_or(0.0, StrokeTable::total_units)
    }

    /// Timeline length in ms (lead-in included); `0` until computed.
    pub fn total_ms(&self) -> f64 {
        self.table.as_ref().map_or(0.0, StrokeTable::total_ms)
    }

    /// Current position in `[0, total_units]`.
    pub fn current_unit(&self) -> f64 {
        self.current_unit
    }

    /// Current position on the ms axis.
    pub fn position_ms(&self) -> f64 {
        self.position_ms
    }

    /// Return `true` while playing.
    pub fn is_animating(&self) -> bool {
        self.session.phase == PlaybackPhase::Playing
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> PlaybackPhase {
        self.session.phase
    }

    /// Per-stroke finished flags.
    pub fn finished_flags(&self) -> &[bool] {
        &self.finished
    }

    /// Whether stroke-order labels are displayed.
    pub fn stroke_order_visible(&self) -> bool {
        self.stroke_order_visible
    }

    /// Publish counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Options used by the last play (or the mount, before any play).
    pub fn last_options(&self) -> &AnimationOptions {
        &self.session.last_options
    }

    /// Position captured by the last pause.
    pub fn paused_at_ms(&self) -> Option<f64> {
        self.session.paused_at_ms
    }

    /// Number of outstanding frame requests and timeouts.
    pub fn pending_callbacks(&self) -> usize {
        self.session.schedule.len()
    }

    /// Current dash offset of every stroke as reported by the container.
    pub fn stroke_offsets(&self) -> Vec<Option<f64>> {
        let Some(surface) = self.surface.as_deref() else {
            return Vec::new();
        };
        (0..self.metas().len())
            .map(|i| surface.stroke_offset(i))
            .collect()
    }

    /// Owned copy of the public fields.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            generation: self.generation,
            revision: self.revision,
            has_container: self.has_container(),
            phase: self.phase(),
            is_animating: self.is_animating(),
            current_unit: self.current_unit,
            position_ms: self.position_ms,
            total_units: self.total_units(),
            total_ms: self.total_ms(),
            finished: self.finished.clone(),
            stroke_order_visible: self.stroke_order_visible,
            offsets: self.stroke_offsets(),
        }
    }
}

/// Point-in-time copy of a [`CanvasState`], detached from the container.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StateSnapshot {
    /// Mount generation.
    pub generation: u64,
    /// Publish counter.
    pub revision: u64,
    /// Whether a container is mounted.
    pub has_container: bool,
    /// Lifecycle phase.
    pub phase: PlaybackPhase,
    /// `phase == Playing`.
    pub is_animating: bool,
    /// Position in length units.
    pub current_unit: f64,
    /// Position in ms.
    pub position_ms: f64,
    /// Timeline length in units.
    pub total_units: f64,
    /// Timeline length in ms.
    pub total_ms: f64,
    /// Per-stroke finished flags.
    pub finished: Vec<bool>,
    /// Whether labels are displayed.
    pub stroke_order_visible: bool,
    /// Per-stroke dash offsets, where the container reports them.
    pub offsets: Vec<Option<f64>>,
}

/// Per-canvas state keyed by [`CanvasId`].
#[derive(Debug, Default)]
pub struct AnimationStore {
    canvases: BTreeMap<CanvasId, CanvasState>,
}

impl AnimationStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// State of one canvas, if it was ever registered.
    pub fn get(&self, canvas: CanvasId) -> Option<&CanvasState> {
        self.canvases.get(&canvas)
    }

    /// Registered canvas ids in ascending order.
    pub fn canvas_ids(&self) -> impl Iterator<Item = CanvasId> + '_ {
        self.canvases.keys().copied()
    }

    /// Number of registered canvases.
    pub fn len(&self) -> usize {
        self.canvases.len()
    }

    /// Return `true` when nothing was ever registered.
    pub fn is_empty(&self) -> bool {
        self.canvases.is_empty()
    }

    pub(crate) fn get_mut(&mut self, canvas: CanvasId) -> Option<&mut CanvasState> {
        self.canvases.get_mut(&canvas)
    }

    pub(crate) fn entry(&mut self, canvas: CanvasId) -> &mut CanvasState {
        self.canvases.entry(canvas).or_default()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (CanvasId, &mut CanvasState)> {
        self.canvases.iter_mut().map(|(id, s)| (*id, s))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
