//! Tick-driven playback
//!
//! The host calls [`Animator::animate_if_needed`] once per displayed frame
//! with its own timestamp. The engine never reads a clock, so a tick is a pure
//! function of the animation tables and `now`: ticking twice at the same
//! timestamp writes the same presentation values and resolves nothing twice.

use smallvec::SmallVec;
use strata_core::LayerId;

use crate::animation::KeyPath;
use crate::animator::{Animator, LayerAnimations};
use crate::group::Release;

impl Animator {
    /// Advance every running animation to `now` (milliseconds)
    ///
    /// Only layers in the animating index are visited. Finished animations
    /// release their group stakes; groups that drained run their completion
    /// after the whole tick. Returns true if any layer is still animating.
    pub fn animate_if_needed(&mut self, now: f64) -> bool {
        let mut settled: SmallVec<[LayerId; 8]> = SmallVec::new();

        for &id in &self.animating {
            let Some(layer) = self.layers.get_mut(&id) else {
                settled.push(id);
                continue;
            };
            let LayerAnimations {
                animations,
                presentation,
            } = layer;

            let mut finished: SmallVec<[KeyPath; 4]> = SmallVec::new();
            for (key_path, animation) in animations.iter_mut() {
                animation.stamp(now);
                let progress = animation.progress(now);
                if !presentation.apply(animation, progress) {
                    tracing::trace!(?id, %key_path, "inert animation skipped");
                }

                if animation.is_complete(now) {
                    if let Some(group) = animation.group.take() {
                        self.groups.release_stake(group, id, key_path, Release::Completed);
                    }
                    if animation.removed_on_completion {
                        finished.push(key_path.clone());
                    }
                }
            }

            for key_path in &finished {
                animations.shift_remove(key_path);
            }
            if animations.is_empty() {
                settled.push(id);
            } else if let Ok(model) = self.tree.values(id) {
                presentation.sync_with_model(&model, animations);
            }
        }

        for id in &settled {
            self.layers.remove(id);
            self.animating.shift_remove(id);
        }

        tracing::trace!(
            now,
            animating = self.animating.len(),
            settled = settled.len(),
            groups = self.groups.len(),
            "animation tick"
        );
        self.groups.flush();

        !self.animating.is_empty()
    }
}
