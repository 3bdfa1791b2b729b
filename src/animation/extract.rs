//! Stroke timing extraction.
//!
//! Turns the arc lengths of a glyph's strokes (in draw order) into a [`StrokeTable`]: one
//! [`StrokeMeta`] per stroke placed on two cumulative axes, length units and milliseconds.

use crate::animation::options::AnimationOptions;
use crate::canvas::surface::StrokeSurface;
use crate::foundation::core::Span;

/// Timing and position record for one stroke.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeMeta {
    /// 0-based draw-order index; also the stroke's index on the surface.
    pub index: usize,
    /// Arc length of the stroke.
    pub length: f64,
    /// Sum of the lengths of all earlier strokes.
    pub unit_start: f64,
    /// `unit_start + length`.
    pub unit_end: f64,
    /// Sum of the durations of all earlier strokes (excluding the lead-in delay).
    pub ms_start: f64,
    /// `ms_start + duration`.
    pub ms_end: f64,
    /// Draw duration in milliseconds.
    pub duration: f64,
}

impl StrokeMeta {
    /// Window on the length-unit axis.
    pub fn units(&self) -> Span {
        Span {
            start: self.unit_start,
            end: self.unit_end,
        }
    }

    /// Window on the millisecond axis, lead-in delay excluded.
    pub fn ms(&self) -> Span {
        Span {
            start: self.ms_start,
            end: self.ms_end,
        }
    }

    /// Window on the millisecond axis as seen by the wall clock (lead-in included).
    pub fn absolute_ms(&self, animation_delay_ms: f64) -> Span {
        self.ms().shift(animation_delay_ms)
    }
}

/// Timing table for every stroke of one mounted glyph.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct StrokeTable {
    metas: Vec<StrokeMeta>,
    total_units: f64,
    total_ms: f64,
    options: AnimationOptions,
}

impl StrokeTable {
    /// Per-stroke records in draw order.
    pub fn metas(&self) -> &[StrokeMeta] {
        &self.metas
    }

    /// Number of strokes.
    pub fn len(&self) -> usize {
        self.metas.len()
    }

    /// Return `true` for a glyph without strokes.
    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }

    /// Sum of all stroke lengths.
    pub fn total_units(&self) -> f64 {
        self.total_units
    }

    /// Sum of all durations plus the lead-in delay; `0` for an empty table.
    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// Lead-in before the first stroke.
    pub fn animation_delay_ms(&self) -> f64 {
        self.options.animation_delay_ms
    }

    /// Options the table was computed with.
    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    /// Record for stroke `index`.
    pub fn get(&self, index: usize) -> Option<&StrokeMeta> {
        self.metas.get(index)
    }

    /// Index of the stroke whose unit window `[unit_start, unit_end)` contains `unit`.
    pub fn stroke_containing(&self, unit: f64) -> Option<usize> {
        self.metas.iter().position(|m| m.units().contains(unit))
    }

    /// Per-stroke finished flags at wall-clock position `ms`.
    ///
    /// Half a millisecond of slack absorbs frame-timestamp rounding at the end of a stroke.
    pub fn finished_flags(&self, ms: f64) -> Vec<bool> {
        let delay = self.animation_delay_ms();
        self.metas
            .iter()
            .map(|m| ms >= m.absolute_ms(delay).end - 0.5)
            .collect()
    }
}

/// Build the timing table from stroke lengths given in draw order.
///
/// Order is preserved; nothing is sorted. Negative or non-finite lengths count as `0`.
pub fn compute_metadata(lengths: &[f64], options: &AnimationOptions) -> StrokeTable {
    let mut metas = Vec::with_capacity(lengths.len());
    let mut units = 0.0;
    let mut ms = 0.0;

    for (index, &raw) in lengths.iter().enumerate() {
        let length = if raw.is_finite() && raw > 0.0 { raw } else { 0.0 };
        let duration = options.stroke_duration(length);
        metas.push(StrokeMeta {
            index,
            length,
            unit_start: units,
            unit_end: units + length,
            ms_start: ms,
            ms_end: ms + duration,
            duration,
        });
        units += length;
        ms += duration;
    }

    let total_ms = if metas.is_empty() {
        0.0
    } else {
        ms + options.animation_delay_ms
    };

    StrokeTable {
        metas,
        total_units: units,
        total_ms,
        options: *options,
    }
}

/// Put every stroke of `surface` into the fully hidden starting state and dim its labels.
pub fn prime_surface(table: &StrokeTable, surface: &mut dyn StrokeSurface) {
    for meta in table.metas() {
        surface.set_stroke_transition(meta.index, None);
        surface.set_stroke_dash(meta.index, meta.length);
        surface.set_stroke_offset(meta.index, meta.length);
        surface.set_gradient_progress(meta.index, 0.0);
    }
    for i in 0..surface.label_count() {
        surface.set_label_lit(i, false);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/extract.rs"]
mod tests;
