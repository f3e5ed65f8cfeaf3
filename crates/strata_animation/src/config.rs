//! Animator configuration presets.

use serde::{Deserialize, Serialize};

use crate::easing::TimingCurve;
use crate::error::Result;
use crate::prototype::{AnimationOptions, AnimationPrototype};

/// Configuration for an [`Animator`](crate::Animator).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Animate tracked property changes made outside any explicit call.
    pub implicit_animations: bool,
    /// Duration of implicit animations (seconds).
    pub implicit_duration: f64,
    /// Timing curve of implicit animations.
    pub implicit_curve: TimingCurve,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl AnimatorConfig {
    /// Standard configuration: short ease-in-out implicit animations.
    pub fn standard() -> Self {
        Self {
            implicit_animations: true,
            implicit_duration: 0.25,
            implicit_curve: TimingCurve::EaseInOutCubic,
        }
    }

    /// Changes outside explicit calls apply immediately.
    pub fn without_implicit() -> Self {
        Self {
            implicit_animations: false,
            ..Self::standard()
        }
    }

    /// Parse a configuration from TOML; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The default prototype used for implicit animations, if enabled.
    pub fn implicit_prototype(&self) -> Option<AnimationPrototype> {
        self.implicit_animations.then(|| {
            AnimationPrototype::basic(
                self.implicit_duration,
                0.0,
                AnimationOptions::new().curve(self.implicit_curve),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let standard = AnimatorConfig::default();
        assert!(standard.implicit_animations);
        assert_eq!(standard.implicit_duration, 0.25);

        let prototype = standard.implicit_prototype().unwrap();
        assert_eq!(prototype.duration(), 0.25);
        assert_eq!(prototype.timing_curve(), TimingCurve::EaseInOutCubic);

        assert!(AnimatorConfig::without_implicit()
            .implicit_prototype()
            .is_none());
    }

    #[test]
    fn test_from_toml() {
        let config = AnimatorConfig::from_toml_str(
            r#"
            implicit_duration = 0.4
            implicit_curve = "ease_out"
            "#,
        )
        .unwrap();

        assert!(config.implicit_animations);
        assert_eq!(config.implicit_duration, 0.4);
        assert_eq!(config.implicit_curve, TimingCurve::EaseOutQuad);
    }

    #[test]
    fn test_toml_roundtrip_and_errors() {
        let config = AnimatorConfig::without_implicit();
        let text = config.to_toml().unwrap();
        assert_eq!(AnimatorConfig::from_toml_str(&text).unwrap(), config);

        assert!(AnimatorConfig::from_toml_str("implicit_curve = \"bouncy\"").is_err());
        assert!(AnimatorConfig::from_toml_str("implicit_duration = \"fast\"").is_err());
    }
}
