//! Animation groups
//!
//! One group per explicit `animate(...)` call. A group holds a *stake* for
//! every (layer, keypath) whose animation it waits on, and resolves its
//! completion callback exactly once:
//!
//! - `finished = true` when the last stake is released because its animation
//!   reached progress 1, or when the call changed nothing at all
//! - `finished = false` when the last stake is released for any other reason
//!   (superseded by a newer animation, removed explicitly, layer removed)
//!
//! A group is never resolved while its call is still running; draining the
//! stakes during the call only records why it drained. Drained groups are
//! queued and their callbacks run on [`GroupRegistry::flush`], after the
//! surrounding bookkeeping has finished.

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use strata_core::LayerId;

use crate::animation::KeyPath;
use crate::prototype::AnimationOptions;

new_key_type! {
    /// Handle to a live animation group
    pub struct GroupId;
}

/// Completion callback of an explicit animation, called with `finished`
pub type Completion = Box<dyn FnOnce(bool)>;

/// Why a stake was released
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Release {
    /// The animation reached progress 1
    Completed,
    /// The animation was superseded or removed before completing
    Cancelled,
}

/// Bookkeeping for one explicit animation call
pub(crate) struct AnimationGroup {
    completion: Option<Completion>,
    options: AnimationOptions,
    /// Layer -> keypaths this group still waits on
    pending: IndexMap<LayerId, SmallVec<[KeyPath; 2]>>,
    /// The `animate` call that created the group has not returned yet
    open: bool,
    /// Why `pending` last drained while the call was still open
    drained_by: Option<Release>,
}

impl AnimationGroup {
    fn new(options: AnimationOptions, completion: Option<Completion>) -> Self {
        Self {
            completion,
            options,
            pending: IndexMap::new(),
            open: true,
            drained_by: None,
        }
    }

    /// Release one stake; returns true if the layer left `pending`
    fn release(&mut self, layer: LayerId, key_path: &KeyPath) -> bool {
        let Some(stakes) = self.pending.get_mut(&layer) else {
            return false;
        };
        let before = stakes.len();
        stakes.retain(|staked| staked != key_path);
        if stakes.len() == before || !stakes.is_empty() {
            return false;
        }
        self.pending.shift_remove(&layer);
        true
    }
}

/// All live animation groups
#[derive(Default)]
pub(crate) struct GroupRegistry {
    groups: SlotMap<GroupId, AnimationGroup>,
    /// Drained groups waiting for their completion to run
    ready: Vec<(GroupId, bool)>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an open group
    pub fn open(&mut self, options: AnimationOptions, completion: Option<Completion>) -> GroupId {
        self.groups.insert(AnimationGroup::new(options, completion))
    }

    /// Make the group responsible for a layer touched by its call
    pub fn register_layer(&mut self, id: GroupId, layer: LayerId) {
        if let Some(group) = self.groups.get_mut(id) {
            group.pending.entry(layer).or_default();
        }
    }

    /// Record that the group waits on `(layer, key_path)`
    pub fn add_stake(&mut self, id: GroupId, layer: LayerId, key_path: KeyPath) {
        if let Some(group) = self.groups.get_mut(id) {
            let stakes = group.pending.entry(layer).or_default();
            if !stakes.contains(&key_path) {
                stakes.push(key_path);
            }
            group.drained_by = None;
        }
    }

    /// Release one stake; idempotent for stakes already released
    pub fn release_stake(
        &mut self,
        id: GroupId,
        layer: LayerId,
        key_path: &KeyPath,
        reason: Release,
    ) {
        let Some(group) = self.groups.get_mut(id) else {
            return;
        };
        if group.release(layer, key_path) && group.pending.is_empty() {
            self.drained(id, reason);
        }
    }

    /// The call that opened the group returned
    ///
    /// Layers that never received a concrete animation stop holding the group.
    pub fn close(&mut self, id: GroupId) {
        let Some(group) = self.groups.get_mut(id) else {
            return;
        };
        group.open = false;
        group.pending.retain(|_, stakes| !stakes.is_empty());

        if group.pending.is_empty() {
            let finished = group.drained_by.unwrap_or(Release::Completed) == Release::Completed;
            tracing::debug!(?id, finished, "animation group drained on close");
            self.ready.push((id, finished));
        }
    }

    /// True if a group still waiting on animations allows user interaction
    ///
    /// A stake exists exactly while its animation is in a layer's table.
    pub fn allows_user_interaction(&self) -> bool {
        self.groups.values().any(|group| {
            group.options.allow_user_interaction
                && group.pending.values().any(|stakes| !stakes.is_empty())
        })
    }

    #[cfg(test)]
    pub fn options(&self, id: GroupId) -> Option<AnimationOptions> {
        self.groups.get(id).map(|g| g.options)
    }

    #[cfg(test)]
    pub fn contains(&self, id: GroupId) -> bool {
        self.groups.contains_key(id)
    }

    /// Number of unresolved groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Resolve every drained group, each exactly once
    pub fn flush(&mut self) {
        for (id, finished) in std::mem::take(&mut self.ready) {
            let Some(group) = self.groups.remove(id) else {
                continue;
            };
            tracing::debug!(?id, finished, "animation group resolved");
            if let Some(completion) = group.completion {
                completion(finished);
            }
        }
    }

    fn drained(&mut self, id: GroupId, reason: Release) {
        let Some(group) = self.groups.get_mut(id) else {
            return;
        };
        if group.open {
            group.drained_by = Some(reason);
        } else {
            self.ready.push((id, reason == Release::Completed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn layers(count: usize) -> Vec<LayerId> {
        let mut map: SlotMap<LayerId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, Option<Completion>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let completion: Completion =
            Box::new(move |finished: bool| sink.borrow_mut().push(finished));
        (calls, Some(completion))
    }

    #[test]
    fn test_completes_when_last_stake_released() {
        let ids = layers(2);
        let (calls, completion) = recorder();
        let mut registry = GroupRegistry::new();

        let group = registry.open(AnimationOptions::default(), completion);
        registry.add_stake(group, ids[0], KeyPath::Frame);
        registry.add_stake(group, ids[0], KeyPath::Opacity);
        registry.add_stake(group, ids[1], KeyPath::Frame);
        registry.close(group);

        registry.release_stake(group, ids[0], &KeyPath::Frame, Release::Completed);
        registry.release_stake(group, ids[1], &KeyPath::Frame, Release::Completed);
        registry.flush();
        assert!(calls.borrow().is_empty());

        registry.release_stake(group, ids[0], &KeyPath::Opacity, Release::Completed);
        registry.flush();
        assert_eq!(*calls.borrow(), vec![true]);
        assert!(!registry.contains(group));

        // Releasing again is a no-op
        registry.release_stake(group, ids[0], &KeyPath::Opacity, Release::Completed);
        registry.flush();
        assert_eq!(*calls.borrow(), vec![true]);
    }

    #[test]
    fn test_cancelled_release_reports_unfinished() {
        let ids = layers(1);
        let (calls, completion) = recorder();
        let mut registry = GroupRegistry::new();

        let group = registry.open(AnimationOptions::default(), completion);
        registry.add_stake(group, ids[0], KeyPath::Bounds);
        registry.close(group);

        registry.release_stake(group, ids[0], &KeyPath::Bounds, Release::Cancelled);
        registry.flush();
        assert_eq!(*calls.borrow(), vec![false]);
    }

    #[test]
    fn test_no_op_group_resolves_on_close() {
        let ids = layers(1);
        let (calls, completion) = recorder();
        let mut registry = GroupRegistry::new();

        let group = registry.open(AnimationOptions::default(), completion);
        registry.register_layer(group, ids[0]);
        registry.close(group);
        registry.flush();

        assert_eq!(*calls.borrow(), vec![true]);
    }

    #[test]
    fn test_open_group_defers_resolution() {
        let ids = layers(1);
        let (calls, completion) = recorder();
        let mut registry = GroupRegistry::new();

        let group = registry.open(AnimationOptions::default(), completion);
        registry.add_stake(group, ids[0], KeyPath::Opacity);
        registry.release_stake(group, ids[0], &KeyPath::Opacity, Release::Cancelled);
        registry.flush();
        assert!(calls.borrow().is_empty());
        assert!(registry.contains(group));

        registry.close(group);
        registry.flush();
        assert_eq!(*calls.borrow(), vec![false]);
    }

    #[test]
    fn test_user_interaction_follows_stakes() {
        let ids = layers(1);
        let mut registry = GroupRegistry::new();
        assert!(!registry.allows_user_interaction());

        let plain = registry.open(AnimationOptions::default(), None);
        registry.add_stake(plain, ids[0], KeyPath::Frame);
        let interactive = registry.open(AnimationOptions::new().allow_user_interaction(), None);
        registry.register_layer(interactive, ids[0]);
        assert!(!registry.allows_user_interaction());

        registry.add_stake(interactive, ids[0], KeyPath::Opacity);
        assert!(registry.allows_user_interaction());

        registry.close(interactive);
        registry.release_stake(interactive, ids[0], &KeyPath::Opacity, Release::Completed);
        assert!(!registry.allows_user_interaction());
        registry.flush();
        assert!(!registry.allows_user_interaction());
    }

    #[test]
    fn test_group_without_completion_is_released() {
        let mut registry = GroupRegistry::new();
        let group = registry.open(AnimationOptions::default().allow_user_interaction(), None);

        assert!(registry.options(group).unwrap().allow_user_interaction);
        registry.close(group);
        registry.flush();
        assert_eq!(registry.len(), 0);
    }
}
