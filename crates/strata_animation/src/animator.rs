//! The animator
//!
//! [`Animator`] owns the layer tree together with everything needed to
//! animate it: the scoped animation context, the live animation groups, the
//! per-layer animation tables and the index of layers currently animating.
//!
//! Tracked setters always write the destination value into the model right
//! away. When an animation context is active and the value actually changed,
//! they also synthesize a [`PropertyAnimation`] from the old value to the new
//! one, which the tick ([`Animator::animate_if_needed`]) then plays back into
//! the layer's [`PresentationSnapshot`].
//!
//! The animator is single-threaded: completion callbacks are not `Send`, and
//! neither is the animator holding them.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;
use strata_core::{LayerId, LayerTree, LayerValues, Rect};

use crate::animation::{KeyPath, PropertyAnimation};
use crate::config::AnimatorConfig;
use crate::context::{AnimationContext, ContextFrame, ContextScope};
use crate::error::Result;
use crate::group::{Completion, GroupRegistry, Release};
use crate::presentation::{model_value, PresentationSnapshot};
use crate::prototype::{AnimationOptions, AnimationPrototype, SpringParameters};
use crate::values::AnimatableValue;

/// Animation table and presentation of one animating layer
pub(crate) struct LayerAnimations {
    pub animations: IndexMap<KeyPath, PropertyAnimation>,
    pub presentation: PresentationSnapshot,
}

/// Layer tree plus its animation state
pub struct Animator {
    pub(crate) tree: LayerTree,
    pub(crate) context: AnimationContext,
    pub(crate) groups: GroupRegistry,
    /// Only layers with at least one animation have an entry
    pub(crate) layers: FxHashMap<LayerId, LayerAnimations>,
    /// Layers the tick visits, in registration order
    pub(crate) animating: IndexSet<LayerId>,
    config: AnimatorConfig,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator {
    /// Create an animator with the standard configuration
    pub fn new() -> Self {
        Self::with_config(AnimatorConfig::standard())
    }

    pub fn with_config(config: AnimatorConfig) -> Self {
        Self {
            tree: LayerTree::new(),
            context: AnimationContext::new(config.implicit_prototype()),
            groups: GroupRegistry::new(),
            layers: FxHashMap::default(),
            animating: IndexSet::new(),
            config,
        }
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Replace the configuration; affects changes made from now on
    pub fn set_config(&mut self, config: AnimatorConfig) {
        self.context.set_implicit_prototype(config.implicit_prototype());
        self.config = config;
    }

    pub fn context(&self) -> &AnimationContext {
        &self.context
    }

    // =========================================================================
    // Layer tree
    // =========================================================================

    pub fn tree(&self) -> &LayerTree {
        &self.tree
    }

    /// Insert a detached layer
    pub fn add_layer(&mut self, values: LayerValues) -> LayerId {
        self.tree.insert(values)
    }

    pub fn add_sublayer(&mut self, parent: LayerId, child: LayerId) -> Result<()> {
        Ok(self.tree.add_sublayer(parent, child)?)
    }

    pub fn remove_from_superlayer(&mut self, id: LayerId) -> Result<()> {
        Ok(self.tree.remove_from_superlayer(id)?)
    }

    /// Remove a layer and its subtree
    ///
    /// Animations on removed layers are cancelled; groups left waiting on
    /// nothing else complete with `finished = false`.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<()> {
        let removed = self.tree.remove(id)?;
        for layer in removed {
            self.cancel_layer(layer);
        }
        self.groups.flush();
        Ok(())
    }

    // =========================================================================
    // Tracked properties
    // =========================================================================

    pub fn frame(&self, id: LayerId) -> Result<Rect> {
        Ok(self.tree.frame(id)?)
    }

    pub fn bounds(&self, id: LayerId) -> Result<Rect> {
        Ok(self.tree.bounds(id)?)
    }

    pub fn opacity(&self, id: LayerId) -> Result<f32> {
        Ok(self.tree.opacity(id)?)
    }

    pub fn set_frame(&mut self, id: LayerId, frame: Rect) -> Result<()> {
        let old = self.tree.frame(id)?;
        self.track_change(id, KeyPath::Frame, old.into(), frame.into())?;
        self.tree.set_frame_raw(id, frame)?;
        self.sync_presentation(id);
        self.groups.flush();
        Ok(())
    }

    /// Set bounds; a size change is carried by the frame
    pub fn set_bounds(&mut self, id: LayerId, bounds: Rect) -> Result<()> {
        let old = self.tree.bounds(id)?;
        if old.size != bounds.size {
            let frame = self.tree.frame(id)?.with_size(bounds.size);
            self.set_frame(id, frame)?;
        }
        let current = self.tree.bounds(id)?;
        self.track_change(id, KeyPath::Bounds, current.into(), bounds.into())?;
        self.tree.set_bounds_raw(id, bounds)?;
        self.sync_presentation(id);
        self.groups.flush();
        Ok(())
    }

    pub fn set_opacity(&mut self, id: LayerId, opacity: f32) -> Result<()> {
        let old = self.tree.opacity(id)?;
        self.track_change(id, KeyPath::Opacity, old.into(), opacity.into())?;
        self.tree.set_opacity_raw(id, opacity)?;
        self.sync_presentation(id);
        self.groups.flush();
        Ok(())
    }

    /// Presentation snapshot of an animating layer
    pub fn presentation(&self, id: LayerId) -> Option<&PresentationSnapshot> {
        self.layers.get(&id).map(|layer| &layer.presentation)
    }

    /// What is on screen: the snapshot while animating, the model otherwise
    pub fn presentation_values(&self, id: LayerId) -> Result<LayerValues> {
        match self.presentation(id) {
            Some(snapshot) => Ok(snapshot.values()),
            None => Ok(self.tree.values(id)?),
        }
    }

    /// Show the model for every property of `id` that is not animating
    fn sync_presentation(&mut self, id: LayerId) {
        let Some(layer) = self.layers.get_mut(&id) else {
            return;
        };
        if let Ok(model) = self.tree.values(id) {
            layer.presentation.sync_with_model(&model, &layer.animations);
        }
    }

    /// Diff one property change against the active animation context
    ///
    /// Called before the model is written, so the layer still holds `old`.
    fn track_change(
        &mut self,
        id: LayerId,
        key_path: KeyPath,
        old: AnimatableValue,
        new: AnimatableValue,
    ) -> Result<()> {
        let Some(active) = self.context.active() else {
            return Ok(());
        };
        if let Some(group) = active.group {
            self.groups.register_layer(group, id);
        }
        if old == new {
            return Ok(());
        }

        let prototype = active.prototype;
        if prototype.is_instant() {
            // Applied immediately; nothing in flight may keep showing the old target
            self.take_animation(id, &key_path);
            return Ok(());
        }

        let from = if prototype.options().begin_from_current_state {
            self.presentation(id)
                .and_then(|snapshot| snapshot.value(&key_path))
                .unwrap_or(old)
        } else {
            old
        };

        let mut animation = prototype.create_animation(key_path, from, new);
        animation.group = active.group;
        self.register_animation(id, animation)
    }

    // =========================================================================
    // Explicit animations
    // =========================================================================

    /// Animate every tracked change made by `changes`
    ///
    /// `changes` runs synchronously before this returns. `completion` runs
    /// exactly once: with `true` when every animation the call created ran to
    /// the end (or none was needed), with `false` if any was cut short.
    pub fn animate<R>(
        &mut self,
        duration: f64,
        delay: f64,
        options: AnimationOptions,
        changes: impl FnOnce(&mut Animator) -> R,
        completion: Option<Completion>,
    ) -> R {
        let prototype = AnimationPrototype::basic(duration, delay, options);
        self.run_explicit(prototype, changes, completion)
    }

    /// Spring variant of [`Animator::animate`]
    pub fn animate_spring<R>(
        &mut self,
        duration: f64,
        delay: f64,
        spring: SpringParameters,
        options: AnimationOptions,
        changes: impl FnOnce(&mut Animator) -> R,
        completion: Option<Completion>,
    ) -> R {
        let prototype = AnimationPrototype::spring(duration, delay, spring, options);
        self.run_explicit(prototype, changes, completion)
    }

    /// Apply every change made by `changes` without animating it
    pub fn perform_without_animation<R>(
        &mut self,
        changes: impl FnOnce(&mut Animator) -> R,
    ) -> R {
        let mut scope = ContextScope::enter(self, ContextFrame::Suppressed);
        changes(&mut *scope)
    }

    fn run_explicit<R>(
        &mut self,
        prototype: AnimationPrototype,
        changes: impl FnOnce(&mut Animator) -> R,
        completion: Option<Completion>,
    ) -> R {
        let group = self.groups.open(prototype.options(), completion);
        tracing::trace!(?group, duration = prototype.duration(), "animation call opened");
        let mut scope = ContextScope::enter(self, ContextFrame::Explicit { prototype, group });
        changes(&mut *scope)
    }

    // =========================================================================
    // Animation tables
    // =========================================================================

    /// Add an animation to a layer, replacing any animation on its keypath
    ///
    /// Missing endpoints are taken from the layer's current model value.
    pub fn add_animation(&mut self, id: LayerId, mut animation: PropertyAnimation) -> Result<()> {
        let values = self.tree.values(id)?;
        match model_value(&values, &animation.key_path) {
            Some(current) => {
                animation.from_value = animation.from_value.or(Some(current));
                animation.to_value = animation.to_value.or(Some(current));
                let mismatched = [animation.from_value, animation.to_value]
                    .into_iter()
                    .flatten()
                    .any(|value| value.lerp(&current, 0.0).is_none());
                if mismatched {
                    tracing::warn!(
                        key_path = %animation.key_path,
                        "animation values do not match the property type; it will be inert"
                    );
                }
            }
            None => {
                tracing::warn!(
                    key_path = %animation.key_path,
                    "unsupported keypath; animation will be inert"
                );
            }
        }

        animation.group = None;
        self.register_animation(id, animation)?;
        self.groups.flush();
        Ok(())
    }

    /// Remove the animation on one keypath, returning true if there was one
    pub fn remove_animation(&mut self, id: LayerId, key_path: &KeyPath) -> bool {
        let removed = self.take_animation(id, key_path);
        self.sync_presentation(id);
        self.groups.flush();
        removed
    }

    pub fn remove_all_animations(&mut self, id: LayerId) {
        self.cancel_layer(id);
        self.groups.flush();
    }

    /// Read-only view of a layer's animation table
    pub fn animations(&self, id: LayerId) -> Option<&IndexMap<KeyPath, PropertyAnimation>> {
        self.layers.get(&id).map(|layer| &layer.animations)
    }

    pub fn animation(&self, id: LayerId, key_path: &KeyPath) -> Option<&PropertyAnimation> {
        self.animations(id)?.get(key_path)
    }

    /// Register an animation, superseding the previous one on its keypath
    fn register_animation(&mut self, id: LayerId, animation: PropertyAnimation) -> Result<()> {
        let values = self.tree.values(id)?;
        let key_path = animation.key_path.clone();
        let group = animation.group;

        if let Some(group) = group {
            self.groups.add_stake(group, id, key_path.clone());
        }

        let layer = self.layers.entry(id).or_insert_with(|| LayerAnimations {
            animations: IndexMap::new(),
            presentation: PresentationSnapshot::new(id, values),
        });

        if let Some(previous) = layer.animations.insert(key_path.clone(), animation) {
            tracing::debug!(?id, %key_path, "animation replaced");
            if let Some(previous_group) = previous.group.filter(|&g| Some(g) != group) {
                self.groups.release_stake(previous_group, id, &key_path, Release::Cancelled);
            }
        }

        self.animating.insert(id);
        Ok(())
    }

    /// Drop one animation without completing it
    fn take_animation(&mut self, id: LayerId, key_path: &KeyPath) -> bool {
        let Some(layer) = self.layers.get_mut(&id) else {
            return false;
        };
        let Some(animation) = layer.animations.shift_remove(key_path) else {
            return false;
        };
        if let Some(group) = animation.group {
            self.groups.release_stake(group, id, key_path, Release::Cancelled);
        }
        if layer.animations.is_empty() {
            self.layers.remove(&id);
            self.animating.shift_remove(&id);
        }
        true
    }

    /// Drop every animation of a layer without completing them
    fn cancel_layer(&mut self, id: LayerId) {
        let Some(layer) = self.layers.remove(&id) else {
            return;
        };
        self.animating.shift_remove(&id);
        for (key_path, animation) in layer.animations {
            if let Some(group) = animation.group {
                self.groups.release_stake(group, id, &key_path, Release::Cancelled);
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_animating(&self, id: LayerId) -> bool {
        self.animating.contains(&id)
    }

    /// Layers with at least one animation, in registration order
    pub fn animating_layers(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.animating.iter().copied()
    }

    pub fn has_running_animations(&self) -> bool {
        !self.animating.is_empty()
    }

    /// True if any running animation was started with `allow_user_interaction`
    pub fn is_user_interaction_allowed(&self) -> bool {
        self.groups.allows_user_interaction()
    }
}
