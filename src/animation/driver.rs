//! The animation driver: the only code that changes stroke presentation.
//!
//! Each canvas moves between three phases:
//!
//! - `Idle`: position fixed, nothing scheduled (after mount, seek, cancel or completion).
//! - `Playing`: a frame request samples the wall clock on every display refresh, and a
//!   single completion timeout is armed for the end of the timeline.
//! - `Paused`: position captured at the instant of the pause, nothing scheduled.
//!
//! Both the frame loop and the completion timeout finish a run through the same idempotent
//! completion step. The timeout is authoritative: it completes the run even when the host
//! stops delivering frames.
//!
//! Time only moves when the host calls [`Driver::on_frame`], [`Driver::on_timers`] or
//! [`Driver::tick`]. UI misuse (pausing twice, resuming while idle, touching an unmounted
//! canvas) is logged and ignored, never returned as an error.

use tracing::{debug, error, warn};

use crate::animation::clock::{Clock, SystemClock, elapsed_since, ms_to_unit, unit_to_ms};
use crate::animation::ease::TransitionTiming;
use crate::animation::extract::{StrokeTable, compute_metadata, prime_surface};
use crate::animation::options::{AnimationOptions, AnimationOverrides};
use crate::animation::state::{
    AnimationSession, AnimationStore, CanvasState, PlaybackPhase, StateSnapshot,
};
use crate::canvas::mount::Canvas;
use crate::canvas::surface::{StrokeSurface, StrokeTransition};
use crate::foundation::core::CanvasId;
use crate::foundation::error::HitsujunResult;

/// How a freshly mounted canvas is primed.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MountOptions {
    /// Start playing right away instead of showing the finished glyph.
    pub autoplay: bool,
    /// Options for the first run (and for seeks before any play).
    pub animation: AnimationOptions,
}

impl MountOptions {
    /// Play on mount after the autoplay lead-in.
    pub fn autoplay() -> Self {
        Self {
            autoplay: true,
            animation: AnimationOptions::autoplay(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RenderMode {
    // Seek/pause: drop transitions and pin exact offsets.
    Freeze,
    // Play loop: keep declared transitions, sample offsets if the surface wants them.
    Sample,
}

/// Drives every canvas registered in its [`AnimationStore`].
#[derive(Debug)]
pub struct Driver<C: Clock = SystemClock> {
    clock: C,
    store: AnimationStore,
}

impl Driver<SystemClock> {
    /// Driver on the system clock with an empty store.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for Driver<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Driver<C> {
    /// Driver on `clock` with an empty store.
    pub fn with_clock(clock: C) -> Self {
        Self::with_store(clock, AnimationStore::new())
    }

    /// Driver on `clock` over an existing store.
    pub fn with_store(clock: C, store: AnimationStore) -> Self {
        Self { clock, store }
    }

    /// The wall clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Read access to every canvas's state.
    pub fn store(&self) -> &AnimationStore {
        &self.store
    }

    /// State of one canvas.
    pub fn state(&self, canvas: CanvasId) -> Option<&CanvasState> {
        self.store.get(canvas)
    }

    /// Owned copy of one canvas's state.
    pub fn snapshot(&self, canvas: CanvasId) -> Option<StateSnapshot> {
        self.store.get(canvas).map(CanvasState::snapshot)
    }

    /// Parse `markup` into a [`Canvas`], make it the container of `canvas` and prime it.
    ///
    /// With `autoplay` the glyph starts drawing at once; otherwise it is shown fully drawn.
    /// Only markup and option errors are returned; the animation itself cannot fail.
    pub fn mount(
        &mut self,
        canvas: CanvasId,
        markup: &str,
        options: &MountOptions,
    ) -> HitsujunResult<()> {
        options.animation.validate()?;
        let surface = Canvas::from_markup(markup)?;
        self.attach_with(canvas, Box::new(surface), options.animation);

        if options.autoplay {
            self.play(canvas, &options.animation.into());
        } else {
            self.seek(canvas, 0.0);
            let total = self.state(canvas).map_or(0.0, CanvasState::total_units);
            self.seek(canvas, total);
        }
        Ok(())
    }

    /// Register `surface` as the container of `canvas`, replacing any previous one.
    ///
    /// Starts a new mount generation: pending callbacks are dropped and metadata is
    /// invalidated. The label visibility flag carries over.
    pub fn attach(&mut self, canvas: CanvasId, surface: Box<dyn StrokeSurface>) {
        let options = self
            .store
            .get(canvas)
            .map(|s| *s.last_options())
            .unwrap_or_default();
        self.attach_with(canvas, surface, options);
    }

    fn attach_with(
        &mut self,
        canvas: CanvasId,
        mut surface: Box<dyn StrokeSurface>,
        options: AnimationOptions,
    ) {
        let state = self.store.entry(canvas);
        let dropped = state.session.cancel_callbacks();
        state.session = AnimationSession::with_options(options);
        state.generation += 1;
        state.table = None;
        state.position_ms = 0.0;
        state.current_unit = 0.0;
        state.finished.clear();
        for i in 0..surface.label_count() {
            surface.set_label_visible(i, state.stroke_order_visible);
        }
        state.surface = Some(surface);
        state.revision += 1;
        debug!(%canvas, generation = state.generation, dropped, "container attached");
    }

    /// Drop the container of `canvas` and every pending callback.
    pub fn unmount(&mut self, canvas: CanvasId) {
        let Some(state) = self.store.get_mut(canvas) else {
            warn!(%canvas, "unmount of unknown canvas");
            return;
        };
        let dropped = state.session.cancel_callbacks();
        let options = state.session.last_options;
        state.session = AnimationSession::with_options(options);
        state.surface = None;
        state.table = None;
        state.position_ms = 0.0;
        state.current_unit = 0.0;
        state.finished.clear();
        state.revision += 1;
        debug!(%canvas, dropped, "container unmounted");
    }

    /// Start drawing from the first stroke.
    ///
    /// Overrides are resolved against the default options. Metadata is recomputed when
    /// absent or when the overrides change stroke timing.
    pub fn play(&mut self, canvas: CanvasId, overrides: &AnimationOverrides) {
        let options = overrides.resolve(&AnimationOptions::default());
        if let Err(err) = options.validate() {
            warn!(%canvas, %err, "play ignored");
            return;
        }
        let now = self.clock.now_ms();
        let Some(state) = live_state(&mut self.store, canvas, "play") else {
            return;
        };

        state.session.cancel_callbacks();
        state.session.paused_at_ms = None;
        state.session.phase = PlaybackPhase::Idle;
        state.session.last_options = options;

        let stale = state
            .table
            .as_ref()
            .is_none_or(|t| t.is_empty() || t.options().changes_timing(&options));
        if stale {
            compute_table(state, canvas, &options);
        } else {
            render_at(state, 0.0, RenderMode::Freeze);
        }

        let (Some(table), Some(surface)) = (state.table.as_ref(), state.surface.as_deref_mut())
        else {
            return;
        };
        if table.is_empty() {
            debug!(%canvas, "no strokes to play");
            return;
        }

        let delay = table.animation_delay_ms();
        let native = !surface.wants_frame_offsets();
        for meta in table.metas() {
            surface.set_stroke_transition(
                meta.index,
                Some(StrokeTransition {
                    delay_ms: delay + meta.ms_start,
                    duration_ms: meta.duration,
                    timing: options.transition_timing,
                    from_offset: meta.length,
                    to_offset: 0.0,
                }),
            );
            if native {
                surface.set_stroke_offset(meta.index, 0.0);
            }
        }

        start_run(state, now, 0.0);
        state.revision += 1;
        debug!(%canvas, total_ms = state.total_ms(), "play");
    }

    /// Freeze a playing canvas at the current wall-clock position.
    pub fn pause(&mut self, canvas: CanvasId) {
        let now = self.clock.now_ms();
        let Some(state) = live_state(&mut self.store, canvas, "pause") else {
            return;
        };
        if state.session.phase != PlaybackPhase::Playing {
            debug!(%canvas, phase = ?state.session.phase, "pause ignored");
            return;
        }
        let (Some(start), Some(table)) = (state.session.start_wall_clock_ms, &state.table) else {
            return;
        };
        let elapsed = elapsed_since(table, start, now);
        if elapsed >= table.total_ms() {
            complete(state, canvas);
            return;
        }

        state.session.cancel_callbacks();
        render_at(state, elapsed, RenderMode::Freeze);
        state.session.paused_at_ms = Some(elapsed);
        state.session.phase = PlaybackPhase::Paused;
        debug!(%canvas, elapsed, "pause");
    }

    /// Continue from the paused (or sought) position without restarting any stroke.
    pub fn resume(&mut self, canvas: CanvasId) {
        let now = self.clock.now_ms();
        let Some(state) = live_state(&mut self.store, canvas, "resume") else {
            return;
        };
        if state.session.phase == PlaybackPhase::Playing {
            debug!(%canvas, "resume ignored: already playing");
            return;
        }
        if state.table.is_none() {
            let options = state.session.last_options;
            compute_table(state, canvas, &options);
        }
        let from = state.session.paused_at_ms.unwrap_or(state.position_ms);
        let (Some(table), Some(surface)) = (state.table.as_ref(), state.surface.as_deref_mut())
        else {
            debug!(%canvas, "resume ignored: no metadata");
            return;
        };
        if table.is_empty() || from >= table.total_ms() {
            debug!(%canvas, from, "resume ignored: nothing left to draw");
            return;
        }

        state.session.cancel_callbacks();
        declare_resume_transitions(
            table,
            surface,
            from,
            state.session.last_options.transition_timing,
        );
        light_labels(table, surface, from);

        start_run(state, now, from);
        publish(state, from);
        debug!(%canvas, from, "resume");
    }

    /// Show exactly the position `unit` (clamped to the timeline) and stop there.
    pub fn seek(&mut self, canvas: CanvasId, unit: f64) {
        let Some(state) = live_state(&mut self.store, canvas, "seek") else {
            return;
        };
        state.session.cancel_callbacks();
        state.session.paused_at_ms = None;
        state.session.phase = PlaybackPhase::Idle;

        if state.table.is_none() {
            let options = state.session.last_options;
            compute_table(state, canvas, &options);
        }
        let Some(table) = state.table.as_ref().filter(|t| !t.is_empty()) else {
            return;
        };
        let ms = unit_to_ms(table, unit);
        render_at(state, ms, RenderMode::Freeze);
        debug!(%canvas, unit, ms, current_unit = state.current_unit, "seek");
    }

    /// Stop everything and show the glyph fully drawn.
    pub fn cancel(&mut self, canvas: CanvasId) {
        let Some(state) = live_state(&mut self.store, canvas, "cancel") else {
            return;
        };
        if state.table.is_none() {
            let options = state.session.last_options;
            compute_table(state, canvas, &options);
        }
        complete(state, canvas);
        debug!(%canvas, "cancel");
    }

    /// Flip stroke-order label visibility; returns the new flag.
    ///
    /// Works with or without a container; the flag outlives remounts.
    pub fn toggle_stroke_order_labels(&mut self, canvas: CanvasId) -> Option<bool> {
        let Some(state) = self.store.get_mut(canvas) else {
            warn!(%canvas, "label toggle on unknown canvas");
            return None;
        };
        state.stroke_order_visible = !state.stroke_order_visible;
        let visible = state.stroke_order_visible;
        if let Some(surface) = state.surface.as_deref_mut() {
            for i in 0..surface.label_count() {
                surface.set_label_visible(i, visible);
            }
        }
        state.revision += 1;
        debug!(%canvas, visible, "stroke order labels");
        Some(visible)
    }

    /// Service pending frame requests: one display refresh at `now_ms`.
    ///
    /// Returns how many canvases were advanced.
    pub fn on_frame(&mut self, now_ms: f64) -> usize {
        let mut stepped = 0;
        for (canvas, state) in self.store.iter_mut() {
            let frames = state.session.schedule.take_frames();
            let Some(frame) = state.session.frame else {
                continue;
            };
            if !frames.contains(&frame) {
                continue;
            }
            state.session.frame = None;
            step(state, canvas, now_ms);
            stepped += 1;
        }
        stepped
    }

    /// Fire timeouts due at or before `now_ms`.
    ///
    /// Returns how many runs were completed.
    pub fn on_timers(&mut self, now_ms: f64) -> usize {
        let mut completed = 0;
        for (canvas, state) in self.store.iter_mut() {
            let due = state.session.schedule.take_due_timeouts(now_ms);
            if state
                .session
                .completion
                .is_some_and(|h| due.contains(&h))
            {
                state.session.completion = None;
                complete(state, canvas);
                completed += 1;
            }
        }
        completed
    }

    /// Timers first, then frames.
    pub fn tick(&mut self, now_ms: f64) -> usize {
        self.on_timers(now_ms) + self.on_frame(now_ms)
    }

    /// [`Driver::tick`] at the driver's own clock reading.
    pub fn tick_now(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.tick(now)
    }

    /// Return `true` while any canvas has a frame request or timeout outstanding.
    pub fn has_pending_callbacks(&self) -> bool {
        self.store
            .canvas_ids()
            .filter_map(|id| self.store.get(id))
            .any(|s| s.pending_callbacks() > 0)
    }

    /// Earliest timeout deadline across all canvases.
    pub fn next_due_ms(&self) -> Option<f64> {
        self.store
            .canvas_ids()
            .filter_map(|id| self.store.get(id))
            .filter_map(|s| s.session.schedule.next_due_ms())
            .min_by(f64::total_cmp)
    }
}

fn live_state<'a>(
    store: &'a mut AnimationStore,
    canvas: CanvasId,
    op: &'static str,
) -> Option<&'a mut CanvasState> {
    let Some(state) = store.get_mut(canvas) else {
        warn!(%canvas, op, "operation on unknown canvas ignored");
        return None;
    };
    if state.surface.is_none() {
        warn!(%canvas, op, "operation on detached canvas ignored");
        return None;
    }
    Some(state)
}

fn compute_table(state: &mut CanvasState, canvas: CanvasId, options: &AnimationOptions) {
    let Some(surface) = state.surface.as_deref_mut() else {
        error!(%canvas, "stroke metadata requested before a container was registered");
        return;
    };
    let table = compute_metadata(&surface.stroke_lengths(), options);
    prime_surface(&table, surface);
    debug!(
        %canvas,
        strokes = table.len(),
        total_units = table.total_units(),
        total_ms = table.total_ms(),
        "computed stroke metadata"
    );
    state.finished = vec![false; table.len()];
    state.position_ms = 0.0;
    state.current_unit = 0.0;
    state.table = Some(table);
    state.revision += 1;
}

fn start_run(state: &mut CanvasState, now: f64, from_ms: f64) {
    let total_ms = state.total_ms();
    let session = &mut state.session;
    session.start_wall_clock_ms = Some(now - from_ms);
    session.paused_at_ms = None;
    session.phase = PlaybackPhase::Playing;
    session.frame = Some(session.schedule.request_frame());
    session.completion = Some(session.schedule.set_timeout(now, total_ms - from_ms));
}

fn step(state: &mut CanvasState, canvas: CanvasId, now: f64) {
    if state.session.phase != PlaybackPhase::Playing {
        return;
    }
    let (Some(start), Some(table)) = (state.session.start_wall_clock_ms, &state.table) else {
        return;
    };
    let elapsed = elapsed_since(table, start, now);
    if elapsed >= table.total_ms() {
        complete(state, canvas);
        return;
    }
    render_at(state, elapsed, RenderMode::Sample);
    state.session.frame = Some(state.session.schedule.request_frame());
}

// All strokes are written before the derived position is published.
fn render_at(state: &mut CanvasState, ms: f64, mode: RenderMode) {
    let (Some(table), Some(surface)) = (state.table.as_ref(), state.surface.as_deref_mut()) else {
        return;
    };
    let delay = table.animation_delay_ms();
    if mode == RenderMode::Freeze || surface.wants_frame_offsets() {
        for meta in table.metas() {
            let progress = meta.absolute_ms(delay).progress(ms);
            if mode == RenderMode::Freeze {
                surface.set_stroke_transition(meta.index, None);
                surface.set_stroke_dash(meta.index, meta.length);
            }
            surface.set_stroke_offset(meta.index, meta.length * (1.0 - progress));
            surface.set_gradient_progress(meta.index, progress);
        }
    }
    light_labels(table, surface, ms);
    publish(state, ms);
}

fn light_labels(table: &StrokeTable, surface: &mut dyn StrokeSurface, ms: f64) {
    let delay = table.animation_delay_ms();
    for i in 0..surface.label_count() {
        let lit = table
            .get(i)
            .is_some_and(|m| ms >= m.absolute_ms(delay).start + 1.0);
        surface.set_label_lit(i, lit);
    }
}

fn declare_resume_transitions(
    table: &StrokeTable,
    surface: &mut dyn StrokeSurface,
    from: f64,
    timing: TransitionTiming,
) {
    let delay = table.animation_delay_ms();
    let native = !surface.wants_frame_offsets();
    for meta in table.metas() {
        let window = meta.absolute_ms(delay);
        surface.set_stroke_dash(meta.index, meta.length);
        if from >= window.end {
            surface.set_stroke_transition(meta.index, None);
            surface.set_stroke_offset(meta.index, 0.0);
            surface.set_gradient_progress(meta.index, 1.0);
            continue;
        }
        let transition = if from <= window.start {
            StrokeTransition {
                delay_ms: window.start - from,
                duration_ms: meta.duration,
                timing,
                from_offset: meta.length,
                to_offset: 0.0,
            }
        } else {
            StrokeTransition {
                delay_ms: 0.0,
                duration_ms: window.end - from,
                timing,
                from_offset: meta.length * (1.0 - window.progress(from)),
                to_offset: 0.0,
            }
        };
        surface.set_stroke_offset(meta.index, transition.from_offset);
        surface.set_gradient_progress(meta.index, window.progress(from));
        surface.set_stroke_transition(meta.index, Some(transition));
        if native {
            surface.set_stroke_offset(meta.index, 0.0);
        }
    }
}

fn publish(state: &mut CanvasState, ms: f64) {
    let Some(table) = state.table.as_ref() else {
        return;
    };
    state.position_ms = ms;
    state.current_unit = ms_to_unit(table, ms);
    state.finished = table.finished_flags(ms);
    state.revision += 1;
}

// Shared by the frame loop, the completion timeout, pause-at-end and cancel.
fn complete(state: &mut CanvasState, canvas: CanvasId) {
    state.session.cancel_callbacks();
    state.session.paused_at_ms = None;
    state.session.phase = PlaybackPhase::Idle;

    let Some(table) = state.table.as_ref() else {
        return;
    };
    if let Some(surface) = state.surface.as_deref_mut() {
        for meta in table.metas() {
            surface.set_stroke_transition(meta.index, None);
            surface.set_stroke_dash(meta.index, meta.length);
            surface.set_stroke_offset(meta.index, 0.0);
            surface.set_gradient_progress(meta.index, 1.0);
        }
        for i in 0..surface.label_count() {
            surface.set_label_lit(i, true);
        }
    }
    state.position_ms = table.total_ms();
    state.current_unit = table.total_units();
    state.finished = vec![true; table.len()];
    state.revision += 1;
    debug!(%canvas, "animation complete");
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
