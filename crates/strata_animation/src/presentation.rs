//! Presentation snapshots
//!
//! While a layer animates, what is on screen differs from its model values.
//! A [`PresentationSnapshot`] is a plain copy of the interpolable fields that
//! the tick writes into. It does not copy the hierarchy: sublayers are reached
//! through the owning layer in the model tree.

use indexmap::IndexMap;
use strata_core::{LayerId, LayerTree, LayerValues, Rect};

use crate::animation::{KeyPath, PropertyAnimation};
use crate::values::AnimatableValue;

/// Interpolated, display-only values of an animating layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresentationSnapshot {
    pub frame: Rect,
    pub bounds: Rect,
    pub opacity: f32,
    owner: LayerId,
}

impl PresentationSnapshot {
    /// Snapshot the current model values of `owner`
    pub fn new(owner: LayerId, values: LayerValues) -> Self {
        Self {
            frame: values.frame,
            bounds: values.bounds,
            opacity: values.opacity,
            owner,
        }
    }

    /// The model layer this snapshot presents
    pub fn owner(&self) -> LayerId {
        self.owner
    }

    /// Sublayers of the model layer (shared, never cloned)
    pub fn sublayers<'a>(&self, tree: &'a LayerTree) -> &'a [LayerId] {
        tree.sublayers(self.owner)
    }

    pub fn values(&self) -> LayerValues {
        LayerValues {
            frame: self.frame,
            bounds: self.bounds,
            opacity: self.opacity,
        }
    }

    /// Current value of one keypath, `None` for unknown keypaths
    pub fn value(&self, key_path: &KeyPath) -> Option<AnimatableValue> {
        model_value(&self.values(), key_path)
    }

    /// Write one animation's value at `progress`
    ///
    /// A frame animation carries size changes for the bounds as well; a
    /// bounds animation only moves the bounds origin. Returns false when the
    /// animation is inert (unknown keypath or unusable endpoints).
    pub fn apply(&mut self, animation: &PropertyAnimation, progress: f64) -> bool {
        let Some(value) = animation.value_at(progress) else {
            return false;
        };
        match (animation.key_path(), value) {
            (KeyPath::Frame, AnimatableValue::Rect(frame)) => {
                self.frame = frame;
                self.bounds.size = frame.size;
                true
            }
            (KeyPath::Bounds, AnimatableValue::Rect(bounds)) => {
                self.bounds.origin = bounds.origin;
                true
            }
            (KeyPath::Opacity, AnimatableValue::Scalar(opacity)) => {
                self.opacity = opacity;
                true
            }
            _ => false,
        }
    }

    /// Copy the model into every field no animation drives
    ///
    /// The frame animation owns `frame` and `bounds.size`, the bounds
    /// animation owns `bounds.origin`, the opacity animation owns `opacity`.
    pub(crate) fn sync_with_model(
        &mut self,
        model: &LayerValues,
        animations: &IndexMap<KeyPath, PropertyAnimation>,
    ) {
        if !animations.contains_key(&KeyPath::Frame) {
            self.frame = model.frame;
            self.bounds.size = model.bounds.size;
        }
        if !animations.contains_key(&KeyPath::Bounds) {
            self.bounds.origin = model.bounds.origin;
        }
        if !animations.contains_key(&KeyPath::Opacity) {
            self.opacity = model.opacity;
        }
    }
}

/// Model value of one keypath, `None` for unknown keypaths
pub(crate) fn model_value(values: &LayerValues, key_path: &KeyPath) -> Option<AnimatableValue> {
    match key_path {
        KeyPath::Frame => Some(AnimatableValue::Rect(values.frame)),
        KeyPath::Bounds => Some(AnimatableValue::Rect(values.bounds)),
        KeyPath::Opacity => Some(AnimatableValue::Scalar(values.opacity)),
        KeyPath::Unknown(_) => None,
    }
}
