//! Timing curves
//!
//! Pure progress-remapping functions. Every curve maps `[0, 1]` onto `[0, 1]`,
//! fixes both endpoints and is monotonic, so eased progress never runs
//! backwards while time moves forwards.

use serde::{Deserialize, Serialize};

/// Easing curve applied to the raw time fraction of an animation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingCurve {
    /// Constant speed
    Linear,
    /// Quadratic ease-in (slow start)
    #[serde(alias = "ease_in")]
    EaseInQuad,
    /// Quadratic ease-out (slow end)
    #[serde(alias = "ease_out")]
    EaseOutQuad,
    /// Cubic ease-in-out (slow start and end)
    #[default]
    #[serde(alias = "ease_in_out")]
    EaseInOutCubic,
}

impl TimingCurve {
    /// Remap a raw progress fraction
    ///
    /// Callers clamp `x` to `[0, 1]` before easing.
    #[inline]
    pub fn ease(self, x: f64) -> f64 {
        match self {
            TimingCurve::Linear => x,
            TimingCurve::EaseInQuad => x * x,
            TimingCurve::EaseOutQuad => x * (2.0 - x),
            TimingCurve::EaseInOutCubic => {
                if x < 0.5 {
                    4.0 * x * x * x
                } else {
                    let t = 2.0 * x - 2.0;
                    (x - 1.0) * t * t + 1.0
                }
            }
        }
    }
}
