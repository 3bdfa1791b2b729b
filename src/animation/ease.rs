use std::str::FromStr;

use crate::foundation::error::HitsujunError;

/// CSS-style transition timing function applied to a stroke's declared transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionTiming {
    /// `cubic-bezier(0.25, 0.1, 0.25, 1)`
    #[default]
    Ease,
    /// Identity.
    Linear,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
}

impl TransitionTiming {
    /// All timing functions, in declaration order.
    pub const ALL: [TransitionTiming; 5] = [
        Self::Ease,
        Self::Linear,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
    ];

    /// The CSS keyword for this timing function.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Ease => "ease",
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }

    /// `(x1, y1, x2, y2)` of the cubic Bézier, `None` for linear.
    pub fn control_points(self) -> Option<[f64; 4]> {
        match self {
            Self::Ease => Some([0.25, 0.1, 0.25, 1.0]),
            Self::Linear => None,
            Self::EaseIn => Some([0.42, 0.0, 1.0, 1.0]),
            Self::EaseOut => Some([0.0, 0.0, 0.58, 1.0]),
            Self::EaseInOut => Some([0.42, 0.0, 0.58, 1.0]),
        }
    }

    /// Map linear progress `t` to eased progress. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let Some([x1, y1, x2, y2]) = self.control_points() else {
            return t;
        };
        if t == 0.0 || t == 1.0 {
            return t;
        }
        let s = solve_param_for_x(t, x1, x2);
        bezier_coord(s, y1, y2)
    }
}

impl std::fmt::Display for TransitionTiming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_name())
    }
}

impl FromStr for TransitionTiming {
    type Err = HitsujunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.css_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| HitsujunError::validation(format!("unknown transition timing '{s}'")))
    }
}

// One axis of a cubic Bézier anchored at 0 and 1.
fn bezier_coord(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

fn solve_param_for_x(x: f64, x1: f64, x2: f64) -> f64 {
    const EPS: f64 = 1e-7;

    let mut t = x;
    for _ in 0..8 {
        let err = bezier_coord(t, x1, x2) - x;
        if err.abs() < EPS {
            return t;
        }
        let d = bezier_slope(t, x1, x2);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    // Newton stalled on a flat region; x(t) is monotonic on [0, 1] so bisection converges.
    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..48 {
        let v = bezier_coord(t, x1, x2);
        if (v - x).abs() < EPS {
            break;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
