//! Scoped animation context
//!
//! Property setters need to know which prototype (if any) should animate a
//! change. That answer lives in an explicit [`AnimationContext`] owned by the
//! [`Animator`]: a stack of frames pushed when an `animate(...)` or
//! `perform_without_animation(...)` call starts and popped when it ends,
//! falling back to the implicit default prototype when the stack is empty.
//!
//! Frames are pushed through [`ContextScope`], whose `Drop` pops the frame and
//! closes the call's group. Every exit path of the caller's closure, including
//! unwinding, therefore leaves the context exactly as it found it.

use std::ops::{Deref, DerefMut};

use crate::animator::Animator;
use crate::group::GroupId;
use crate::prototype::AnimationPrototype;

/// One entry of the context stack
#[derive(Clone, Copy, Debug)]
pub(crate) enum ContextFrame {
    /// Inside an explicit `animate(...)` call
    Explicit {
        prototype: AnimationPrototype,
        group: GroupId,
    },
    /// Inside `perform_without_animation(...)`
    Suppressed,
}

/// What a property setter should do with a change
#[derive(Clone, Copy, Debug)]
pub(crate) struct ActiveAnimation {
    pub prototype: AnimationPrototype,
    /// Group of the innermost explicit call, `None` for implicit animations
    pub group: Option<GroupId>,
}

/// Stack of active animation scopes plus the implicit default
#[derive(Debug, Default)]
pub struct AnimationContext {
    stack: Vec<ContextFrame>,
    implicit: Option<AnimationPrototype>,
}

impl AnimationContext {
    pub fn new(implicit: Option<AnimationPrototype>) -> Self {
        Self {
            stack: Vec::new(),
            implicit,
        }
    }

    /// Number of open scopes
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// True while inside an explicit `animate(...)` call
    pub fn is_explicit(&self) -> bool {
        matches!(self.stack.last(), Some(ContextFrame::Explicit { .. }))
    }

    /// The prototype used for changes made outside any scope
    pub fn implicit_prototype(&self) -> Option<AnimationPrototype> {
        self.implicit
    }

    pub fn set_implicit_prototype(&mut self, prototype: Option<AnimationPrototype>) {
        self.implicit = prototype;
    }

    /// The animation a setter should synthesize right now, if any
    pub(crate) fn active(&self) -> Option<ActiveAnimation> {
        match self.stack.last() {
            Some(ContextFrame::Explicit { prototype, group }) => Some(ActiveAnimation {
                prototype: *prototype,
                group: Some(*group),
            }),
            Some(ContextFrame::Suppressed) => None,
            None => self.implicit.map(|prototype| ActiveAnimation {
                prototype,
                group: None,
            }),
        }
    }

    fn push(&mut self, frame: ContextFrame) {
        self.stack.push(frame);
    }

    fn pop(&mut self) -> Option<ContextFrame> {
        self.stack.pop()
    }
}

/// Guard that keeps one context frame pushed for its lifetime
///
/// Derefs to the [`Animator`] so the caller's closure can mutate layers while
/// the frame is active.
pub(crate) struct ContextScope<'a> {
    animator: &'a mut Animator,
}

impl<'a> ContextScope<'a> {
    pub fn enter(animator: &'a mut Animator, frame: ContextFrame) -> Self {
        animator.context.push(frame);
        Self { animator }
    }
}

impl Deref for ContextScope<'_> {
    type Target = Animator;

    fn deref(&self) -> &Animator {
        self.animator
    }
}

impl DerefMut for ContextScope<'_> {
    fn deref_mut(&mut self) -> &mut Animator {
        self.animator
    }
}

impl Drop for ContextScope<'_> {
    fn drop(&mut self) {
        let animator = &mut *self.animator;
        if let Some(ContextFrame::Explicit { group, .. }) = animator.context.pop() {
            animator.groups.close(group);
        }
        // Completions are user code; don't run them while unwinding
        if !std::thread::panicking() {
            animator.groups.flush();
        }
    }
}
