//! Property animations
//!
//! A [`PropertyAnimation`] animates one keypath of one layer from a start
//! value to an end value. Its progress is never stored: it is derived from the
//! start timestamp, delay and duration every time it is asked for, which makes
//! re-evaluating an animation at the same timestamp free of side effects.
//!
//! Durations and delays are seconds, timestamps are milliseconds.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::easing::TimingCurve;
use crate::group::GroupId;
use crate::values::AnimatableValue;

/// Identifier of an animatable layer property
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyPath {
    Frame,
    Bounds,
    Opacity,
    /// A property this engine cannot animate; animations on it are inert
    Unknown(String),
}

impl KeyPath {
    pub fn as_str(&self) -> &str {
        match self {
            KeyPath::Frame => "frame",
            KeyPath::Bounds => "bounds",
            KeyPath::Opacity => "opacity",
            KeyPath::Unknown(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, KeyPath::Unknown(_))
    }
}

impl From<&str> for KeyPath {
    fn from(s: &str) -> Self {
        match s {
            "frame" => KeyPath::Frame,
            "bounds" => KeyPath::Bounds,
            "opacity" => KeyPath::Opacity,
            other => KeyPath::Unknown(other.to_string()),
        }
    }
}

impl FromStr for KeyPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(KeyPath::from(s))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp a seconds value to a usable, non-negative finite number
pub(crate) fn sanitize_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// One animated keypath on one layer
#[derive(Clone, Debug)]
pub struct PropertyAnimation {
    pub(crate) key_path: KeyPath,
    pub(crate) from_value: Option<AnimatableValue>,
    pub(crate) to_value: Option<AnimatableValue>,
    pub(crate) duration: f64,
    pub(crate) delay: f64,
    pub(crate) curve: TimingCurve,
    pub(crate) removed_on_completion: bool,
    pub(crate) start_timestamp: Option<f64>,
    /// Weak back-reference to the group that waits on this animation
    pub(crate) group: Option<GroupId>,
}

impl PropertyAnimation {
    /// Create an animation with no duration and unresolved endpoints
    ///
    /// Missing endpoints are filled from the layer when the animation is added.
    pub fn new(key_path: impl Into<KeyPath>) -> Self {
        Self {
            key_path: key_path.into(),
            from_value: None,
            to_value: None,
            duration: 0.0,
            delay: 0.0,
            curve: TimingCurve::default(),
            removed_on_completion: true,
            start_timestamp: None,
            group: None,
        }
    }

    pub fn with_from(mut self, value: impl Into<AnimatableValue>) -> Self {
        self.from_value = Some(value.into());
        self
    }

    pub fn with_to(mut self, value: impl Into<AnimatableValue>) -> Self {
        self.to_value = Some(value.into());
        self
    }

    /// Duration in seconds; negative or non-finite values mean zero
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = sanitize_seconds(seconds);
        self
    }

    /// Delay in seconds; negative or non-finite values mean zero
    pub fn with_delay(mut self, seconds: f64) -> Self {
        self.delay = sanitize_seconds(seconds);
        self
    }

    pub fn with_curve(mut self, curve: TimingCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Keep the animation (and its final value) around after it completes
    pub fn removed_on_completion(mut self, removed: bool) -> Self {
        self.removed_on_completion = removed;
        self
    }

    /// Pin the start timestamp instead of taking it from the first tick
    pub fn with_start_timestamp(mut self, timestamp_ms: f64) -> Self {
        self.start_timestamp = Some(timestamp_ms);
        self
    }

    pub fn key_path(&self) -> &KeyPath {
        &self.key_path
    }

    pub fn from_value(&self) -> Option<AnimatableValue> {
        self.from_value
    }

    pub fn to_value(&self) -> Option<AnimatableValue> {
        self.to_value
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn curve(&self) -> TimingCurve {
        self.curve
    }

    pub fn is_removed_on_completion(&self) -> bool {
        self.removed_on_completion
    }

    pub fn start_timestamp(&self) -> Option<f64> {
        self.start_timestamp
    }

    /// Raw (uneased) time fraction at `now`, in `[0, 1]`
    ///
    /// An animation that has not been stamped yet has not started.
    pub fn raw_progress(&self, now: f64) -> f64 {
        let Some(start) = self.start_timestamp else {
            return 0.0;
        };
        let elapsed = (now - start - self.delay * 1000.0).max(0.0);
        let duration_ms = self.duration * 1000.0;

        if duration_ms <= 0.0 {
            return if now - start >= self.delay * 1000.0 {
                1.0
            } else {
                0.0
            };
        }
        (elapsed / duration_ms).clamp(0.0, 1.0)
    }

    /// Eased progress at `now`, in `[0, 1]`
    pub fn progress(&self, now: f64) -> f64 {
        self.curve.ease(self.raw_progress(now))
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.raw_progress(now) >= 1.0
    }

    /// Interpolated value for an eased progress, `None` if unresolved or mistyped
    pub fn value_at(&self, progress: f64) -> Option<AnimatableValue> {
        let from = self.from_value?;
        let to = self.to_value?;
        from.lerp(&to, progress as f32)
    }

    /// Stamp the start time if still unset, returning the effective start
    pub(crate) fn stamp(&mut self, now: f64) -> f64 {
        *self.start_timestamp.get_or_insert(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::Rect;

    fn linear(duration: f64) -> PropertyAnimation {
        PropertyAnimation::new(KeyPath::Opacity)
            .with_from(0.0_f32)
            .with_to(1.0_f32)
            .with_duration(duration)
            .with_curve(TimingCurve::Linear)
    }

    #[test]
    fn test_key_path_parsing() {
        assert_eq!(KeyPath::from("frame"), KeyPath::Frame);
        assert_eq!(KeyPath::from("bounds"), KeyPath::Bounds);
        assert_eq!(KeyPath::from("opacity"), KeyPath::Opacity);
        assert_eq!(
            KeyPath::from("cornerRadius"),
            KeyPath::Unknown("cornerRadius".to_string())
        );
        assert!(!KeyPath::from("cornerRadius").is_supported());
        assert_eq!(KeyPath::Bounds.to_string(), "bounds");
    }

    #[test]
    fn test_progress_formula() {
        let anim = linear(0.5).with_start_timestamp(1_000.0);

        assert_eq!(anim.progress(1_000.0), 0.0);
        assert!((anim.progress(1_250.0) - 0.5).abs() < 0.01);
        assert_eq!(anim.progress(1_500.0), 1.0);
        assert_eq!(anim.progress(9_000.0), 1.0);
    }

    #[test]
    fn test_progress_respects_delay() {
        let anim = linear(1.0).with_delay(0.5).with_start_timestamp(0.0);

        assert_eq!(anim.progress(250.0), 0.0);
        assert_eq!(anim.progress(500.0), 0.0);
        assert!((anim.progress(1_000.0) - 0.5).abs() < 1e-9);
        assert!(anim.is_complete(1_500.0));
    }

    #[test]
    fn test_progress_is_idempotent_and_monotonic() {
        let anim = linear(2.0)
            .with_curve(TimingCurve::EaseInOutCubic)
            .with_start_timestamp(0.0);

        assert_eq!(anim.progress(700.0), anim.progress(700.0));

        let mut previous = 0.0;
        for now in (0..=2_500).step_by(50) {
            let progress = anim.progress(now as f64);
            assert!(progress >= previous);
            previous = progress;
        }
    }

    #[test]
    fn test_unstarted_animation_has_no_progress() {
        let anim = linear(1.0);
        assert_eq!(anim.progress(10_000.0), 0.0);
        assert!(!anim.is_complete(10_000.0));
    }

    #[test]
    fn test_degenerate_durations() {
        let negative = linear(-3.0).with_start_timestamp(100.0);
        assert_eq!(negative.duration(), 0.0);
        assert_eq!(negative.progress(100.0), 1.0);

        let nan = linear(f64::NAN).with_delay(f64::INFINITY);
        assert_eq!(nan.duration(), 0.0);
        assert_eq!(nan.delay(), 0.0);

        let delayed = linear(0.0).with_delay(1.0).with_start_timestamp(0.0);
        assert_eq!(delayed.progress(999.0), 0.0);
        assert_eq!(delayed.progress(1_000.0), 1.0);
    }

    #[test]
    fn test_value_at() {
        let anim = PropertyAnimation::new(KeyPath::Frame)
            .with_from(Rect::new(10.0, 10.0, 10.0, 10.0))
            .with_to(Rect::new(20.0, 20.0, 20.0, 20.0));

        assert_eq!(
            anim.value_at(0.5),
            Some(AnimatableValue::Rect(Rect::new(15.0, 15.0, 15.0, 15.0)))
        );
        assert!(PropertyAnimation::new(KeyPath::Frame).value_at(0.5).is_none());
    }

    #[test]
    fn test_stamp_only_once() {
        let mut anim = linear(1.0);
        assert_eq!(anim.stamp(40.0), 40.0);
        assert_eq!(anim.stamp(90.0), 40.0);
        assert_eq!(anim.start_timestamp(), Some(40.0));
    }
}
