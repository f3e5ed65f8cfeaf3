//! Animatable value types
//!
//! Provides the interpolation trait for the geometry types a layer animates
//! and the typed payload carried as an animation's from/to values.

use strata_core::{Point, Rect, Size};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// Scalar and geometry implementations
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.approx_eq(&other.x, epsilon) && self.y.approx_eq(&other.y, epsilon)
    }
}

impl Interpolate for Size {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Size::new(
            self.width.lerp(&other.width, t),
            self.height.lerp(&other.height, t),
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.width.approx_eq(&other.width, epsilon) && self.height.approx_eq(&other.height, epsilon)
    }
}

impl Interpolate for Rect {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Rect::from_origin_size(
            self.origin.lerp(&other.origin, t),
            self.size.lerp(&other.size, t),
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.origin.approx_eq(&other.origin, epsilon) && self.size.approx_eq(&other.size, epsilon)
    }
}

// ============================================================================
// Typed animation payload
// ============================================================================

/// A from/to value of a property animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatableValue {
    /// Frame or bounds
    Rect(Rect),
    /// Opacity
    Scalar(f32),
}

impl AnimatableValue {
    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            AnimatableValue::Rect(rect) => Some(*rect),
            AnimatableValue::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            AnimatableValue::Scalar(value) => Some(*value),
            AnimatableValue::Rect(_) => None,
        }
    }

    /// Interpolate towards `other`, `None` when the variants differ
    pub fn lerp(&self, other: &Self, t: f32) -> Option<Self> {
        match (self, other) {
            (AnimatableValue::Rect(a), AnimatableValue::Rect(b)) => {
                Some(AnimatableValue::Rect(a.lerp(b, t)))
            }
            (AnimatableValue::Scalar(a), AnimatableValue::Scalar(b)) => {
                Some(AnimatableValue::Scalar(a.lerp(b, t)))
            }
            _ => None,
        }
    }
}

impl From<Rect> for AnimatableValue {
    fn from(rect: Rect) -> Self {
        AnimatableValue::Rect(rect)
    }
}

impl From<f32> for AnimatableValue {
    fn from(value: f32) -> Self {
        AnimatableValue::Scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_rect_interpolation() {
        let a = Rect::new(10.0, 10.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 20.0, 20.0);

        assert_eq!(a.lerp(&b, 0.5), Rect::new(15.0, 15.0, 15.0, 15.0));
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn test_mismatched_payloads() {
        let rect = AnimatableValue::from(Rect::ZERO);
        let scalar = AnimatableValue::from(0.5_f32);

        assert!(rect.lerp(&scalar, 0.5).is_none());
        assert_eq!(
            scalar.lerp(&AnimatableValue::Scalar(1.0), 0.5),
            Some(AnimatableValue::Scalar(0.75))
        );
        assert!(rect.as_scalar().is_none());
        assert_eq!(scalar.as_scalar(), Some(0.5));
    }
}
