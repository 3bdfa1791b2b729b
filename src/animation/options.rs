use crate::animation::ease::TransitionTiming;
use crate::foundation::error::{HitsujunError, HitsujunResult};

/// Fully resolved animation options.
///
/// Durations are milliseconds. A stroke of length `L` is drawn in
/// `max(min_stroke_duration_ms, L / 100 * draw_duration_ms)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    /// Lead-in before the first stroke starts drawing.
    pub animation_delay_ms: f64,
    /// Draw time per 100 length units.
    pub draw_duration_ms: f64,
    /// Lower bound for any single stroke's duration.
    pub min_stroke_duration_ms: f64,
    /// Timing function declared on stroke transitions.
    pub transition_timing: TransitionTiming,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            animation_delay_ms: 0.0,
            draw_duration_ms: 1500.0,
            min_stroke_duration_ms: 500.0,
            transition_timing: TransitionTiming::Ease,
        }
    }
}

impl AnimationOptions {
    /// Options used when a freshly mounted canvas starts playing on its own.
    pub fn autoplay() -> Self {
        Self {
            animation_delay_ms: 500.0,
            ..Self::default()
        }
    }

    /// Reject negative or non-finite durations and a zero minimum stroke duration.
    ///
    /// Every stroke needs a non-empty ms window for positions to convert back to units.
    pub fn validate(&self) -> HitsujunResult<()> {
        for (name, v) in [
            ("animation_delay_ms", self.animation_delay_ms),
            ("draw_duration_ms", self.draw_duration_ms),
            ("min_stroke_duration_ms", self.min_stroke_duration_ms),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(HitsujunError::validation(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        if self.min_stroke_duration_ms <= 0.0 {
            return Err(HitsujunError::validation(format!(
                "min_stroke_duration_ms must be > 0 (got {})",
                self.min_stroke_duration_ms
            )));
        }
        Ok(())
    }

    /// Duration assigned to a stroke of `length` units.
    pub fn stroke_duration(&self, length: f64) -> f64 {
        self.min_stroke_duration_ms
            .max(length / 100.0 * self.draw_duration_ms)
    }

    /// Return `true` when `other` would produce a different stroke timing table.
    pub fn changes_timing(&self, other: &Self) -> bool {
        self.animation_delay_ms != other.animation_delay_ms
            || self.draw_duration_ms != other.draw_duration_ms
            || self.min_stroke_duration_ms != other.min_stroke_duration_ms
    }
}

/// Per-call option overrides; unset fields fall back to a base set of options.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationOverrides {
    /// Overrides [`AnimationOptions::animation_delay_ms`].
    pub animation_delay_ms: Option<f64>,
    /// Overrides [`AnimationOptions::draw_duration_ms`].
    pub draw_duration_ms: Option<f64>,
    /// Overrides [`AnimationOptions::min_stroke_duration_ms`].
    pub min_stroke_duration_ms: Option<f64>,
    /// Overrides [`AnimationOptions::transition_timing`].
    pub transition_timing: Option<TransitionTiming>,
}

impl AnimationOverrides {
    /// Override only the lead-in delay.
    pub fn delay(ms: f64) -> Self {
        Self {
            animation_delay_ms: Some(ms),
            ..Self::default()
        }
    }

    /// Resolve against `base`.
    pub fn resolve(&self, base: &AnimationOptions) -> AnimationOptions {
        AnimationOptions {
            animation_delay_ms: self.animation_delay_ms.unwrap_or(base.animation_delay_ms),
            draw_duration_ms: self.draw_duration_ms.unwrap_or(base.draw_duration_ms),
            min_stroke_duration_ms: self
                .min_stroke_duration_ms
                .unwrap_or(base.min_stroke_duration_ms),
            transition_timing: self.transition_timing.unwrap_or(base.transition_timing),
        }
    }
}

impl From<AnimationOptions> for AnimationOverrides {
    fn from(o: AnimationOptions) -> Self {
        Self {
            animation_delay_ms: Some(o.animation_delay_ms),
            draw_duration_ms: Some(o.draw_duration_ms),
            min_stroke_duration_ms: Some(o.min_stroke_duration_ms),
            transition_timing: Some(o.transition_timing),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/options.rs"]
mod tests;
