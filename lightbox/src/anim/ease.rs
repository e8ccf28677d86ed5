//! Easing curves used by the timed transitions.

use serde::{Deserialize, Serialize};

/// An easing curve mapping normalized time to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    /// No easing.
    Linear,
    /// Sine ease-out.
    OutSine,
    /// Sine ease-in.
    InSine,
    /// Sine ease-in-out.
    InOutSine,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in.
    InCubic,
    /// Quartic ease-out.
    OutQuart,
}

impl Ease {
    /// Applies the curve to a normalized time `t` in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutSine => (t * std::f64::consts::FRAC_PI_2).sin(),
            Self::InSine => 1.0 - ((t * std::f64::consts::FRAC_PI_2).cos()),
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InCubic => t * t * t,
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
        }
    }
}
