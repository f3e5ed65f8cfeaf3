//! Animation prototypes
//!
//! A prototype is the timing template of one `animate(...)` call (or of the
//! implicit default). Property setters ask the active prototype to synthesize
//! a concrete [`PropertyAnimation`] from the before/after values of a change.

use crate::animation::{sanitize_seconds, KeyPath, PropertyAnimation};
use crate::easing::TimingCurve;
use crate::values::AnimatableValue;

/// Options of an explicit animation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationOptions {
    /// Keep delivering touches to layers while the animation runs
    pub allow_user_interaction: bool,
    /// Seed `from` with the live presentation value instead of the old model value
    pub begin_from_current_state: bool,
    /// Timing curve of basic animations
    pub curve: TimingCurve,
}

impl AnimationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_user_interaction(mut self) -> Self {
        self.allow_user_interaction = true;
        self
    }

    pub fn begin_from_current_state(mut self) -> Self {
        self.begin_from_current_state = true;
        self
    }

    pub fn curve(mut self, curve: TimingCurve) -> Self {
        self.curve = curve;
        self
    }
}

/// Spring parameters of a spring animation call
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParameters {
    /// Damping ratio, 1.0 means no oscillation
    pub damping: f64,
    /// Initial velocity relative to the total distance per second
    pub initial_velocity: f64,
}

impl SpringParameters {
    pub fn new(damping: f64, initial_velocity: f64) -> Self {
        Self {
            damping,
            initial_velocity,
        }
    }
}

impl Default for SpringParameters {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

/// Which kind of `animate` call produced a prototype
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrototypeVariant {
    Basic,
    Spring(SpringParameters),
}

/// Immutable timing template used to synthesize property animations
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationPrototype {
    delay: f64,
    duration: f64,
    options: AnimationOptions,
    variant: PrototypeVariant,
}

impl AnimationPrototype {
    pub fn basic(duration: f64, delay: f64, options: AnimationOptions) -> Self {
        Self {
            delay: sanitize_seconds(delay),
            duration: sanitize_seconds(duration),
            options,
            variant: PrototypeVariant::Basic,
        }
    }

    pub fn spring(
        duration: f64,
        delay: f64,
        spring: SpringParameters,
        options: AnimationOptions,
    ) -> Self {
        Self {
            delay: sanitize_seconds(delay),
            duration: sanitize_seconds(duration),
            options,
            variant: PrototypeVariant::Spring(spring),
        }
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn options(&self) -> AnimationOptions {
        self.options
    }

    pub fn variant(&self) -> PrototypeVariant {
        self.variant
    }

    /// A zero-duration prototype applies changes without animating them
    pub fn is_instant(&self) -> bool {
        self.duration <= 0.0
    }

    /// Curve the synthesized animations use
    ///
    /// Spring prototypes run on the same duration formula as basic ones and
    /// settle with a decelerating quadratic; the spring parameters are carried
    /// but do not shape the curve.
    pub fn timing_curve(&self) -> TimingCurve {
        match self.variant {
            PrototypeVariant::Basic => self.options.curve,
            PrototypeVariant::Spring(_) => TimingCurve::EaseOutQuad,
        }
    }

    /// Synthesize a concrete animation for one changed keypath
    pub fn create_animation(
        &self,
        key_path: KeyPath,
        from: AnimatableValue,
        to: AnimatableValue,
    ) -> PropertyAnimation {
        PropertyAnimation::new(key_path)
            .with_from(from)
            .with_to(to)
            .with_duration(self.duration)
            .with_delay(self.delay)
            .with_curve(self.timing_curve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::Rect;

    #[test]
    fn test_basic_prototype_synthesis() {
        let options = AnimationOptions::new().curve(TimingCurve::Linear);
        let prototype = AnimationPrototype::basic(0.5, 0.1, options);

        let anim = prototype.create_animation(
            KeyPath::Frame,
            Rect::ZERO.into(),
            Rect::new(0.0, 0.0, 10.0, 10.0).into(),
        );

        assert_eq!(anim.key_path(), &KeyPath::Frame);
        assert_eq!(anim.duration(), 0.5);
        assert_eq!(anim.delay(), 0.1);
        assert_eq!(anim.curve(), TimingCurve::Linear);
        assert!(anim.is_removed_on_completion());
        assert!(anim.start_timestamp().is_none());
    }

    #[test]
    fn test_spring_prototype_curve() {
        let prototype = AnimationPrototype::spring(
            1.0,
            0.0,
            SpringParameters::new(0.6, 2.0),
            AnimationOptions::new().curve(TimingCurve::Linear),
        );

        assert_eq!(prototype.timing_curve(), TimingCurve::EaseOutQuad);
        assert_eq!(
            prototype.variant(),
            PrototypeVariant::Spring(SpringParameters::new(0.6, 2.0))
        );
    }

    #[test]
    fn test_negative_timing_is_instant() {
        let prototype = AnimationPrototype::basic(-1.0, -2.0, AnimationOptions::default());
        assert!(prototype.is_instant());
        assert_eq!(prototype.delay(), 0.0);
    }
}
