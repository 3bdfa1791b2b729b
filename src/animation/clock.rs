//! Conversion between timeline positions (length units) and wall-clock milliseconds.
//!
//! This module is the only place unit/ms arithmetic happens; the driver and controls go
//! through [`unit_to_ms`] and [`ms_to_unit`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::animation::extract::StrokeTable;
use crate::foundation::math::clamp;

/// Map a length-unit position to wall-clock milliseconds (lead-in delay included).
///
/// `unit` is clamped to `[0, total_units]`. A position exactly on a stroke boundary maps to
/// the start of the later stroke, except `total_units` itself, which always maps to the end of
/// the last stroke so trailing zero-length strokes count as drawn.
pub fn unit_to_ms(table: &StrokeTable, unit: f64) -> f64 {
    let Some(last) = table.metas().last() else {
        return 0.0;
    };
    let delay = table.animation_delay_ms();
    let total = table.total_units();
    let unit = clamp(unit, 0.0, total);
    if total > 0.0 && unit >= total {
        return delay + last.ms_end;
    }

    for meta in table.metas() {
        if unit <= meta.unit_start {
            return delay + meta.ms_start;
        }
        if unit < meta.unit_end {
            let local = (unit - meta.unit_start) / meta.length;
            return delay + meta.ms_start + local * meta.duration;
        }
    }

    delay + last.ms_end
}

/// Inverse of [`unit_to_ms`].
///
/// Anything up to the lead-in delay maps to `0`; anything past the last stroke maps to
/// `total_units`.
pub fn ms_to_unit(table: &StrokeTable, ms: f64) -> f64 {
    let Some(last) = table.metas().last() else {
        return 0.0;
    };
    let delay = table.animation_delay_ms();
    if ms.is_nan() || ms <= delay {
        return 0.0;
    }

    for meta in table.metas() {
        let window = meta.absolute_ms(delay);
        if ms <= window.start {
            return meta.unit_start;
        }
        if ms >= window.end {
            continue;
        }
        return meta.unit_start + window.progress(ms) * meta.length;
    }

    last.unit_end
}

/// Elapsed timeline milliseconds for a run anchored at `anchor_ms`, clamped to the table.
pub fn elapsed_since(table: &StrokeTable, anchor_ms: f64, now_ms: f64) -> f64 {
    clamp(now_ms - anchor_ms, 0.0, table.total_ms())
}

/// Monotonic wall clock in milliseconds.
pub trait Clock {
    /// Current time. Only differences between readings are meaningful.
    fn now_ms(&self) -> f64;
}

/// [`Clock`] backed by [`Instant`], reading 0 at construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Settable [`Clock`]; clones share the same time so a test can hold one and hand the
/// other to a driver.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Clock reading `start_ms`.
    pub fn at(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    /// Move forward by `delta_ms`.
    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
