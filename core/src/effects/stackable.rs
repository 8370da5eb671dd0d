use std::fmt;

use super::{ApplyScope, BuffBehavior};
use crate::duration::DurationTracker;
use crate::error::BuffError;
use crate::modifiers::Revoke;

/// A buff instance: a duration, stacking policy, and one handle scope per
/// applied stack.
///
/// `apply` and `remove` are the only way to change the stack depth, and
/// must be called in pairs. [`crate::registry::BuffRegistry`] is what keeps
/// them paired; nothing else should call them on a registered effect.
pub struct StackableEffect<C> {
    id: String,
    name: String,
    duration: DurationTracker,
    can_stack_duration: bool,
    can_stack_effect: bool,
    /// One entry per successful `apply`, most recent last
    stacks: Vec<ApplyScope>,
    /// Handles tracked outside of any apply, released with the last stack
    detached: ApplyScope,
    behavior: Box<dyn BuffBehavior<C>>,
    apply_count: usize,
    remove_count: usize,
}

impl<C> StackableEffect<C> {
    pub fn new(
        id: impl Into<String>,
        duration: DurationTracker,
        behavior: impl BuffBehavior<C> + 'static,
    ) -> Self {
        Self::with_behavior(id, duration, Box::new(behavior))
    }

    pub fn with_behavior(
        id: impl Into<String>,
        duration: DurationTracker,
        behavior: Box<dyn BuffBehavior<C>>,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            duration,
            can_stack_duration: false,
            can_stack_effect: false,
            stacks: Vec::new(),
            detached: ApplyScope::new(),
            behavior,
            apply_count: 0,
            remove_count: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the re-stack policy: extend duration and/or apply the effect again
    pub fn with_stacking(mut self, stack_duration: bool, stack_effect: bool) -> Self {
        self.can_stack_duration = stack_duration;
        self.can_stack_effect = stack_effect;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> &DurationTracker {
        &self.duration
    }

    pub fn duration_mut(&mut self) -> &mut DurationTracker {
        &mut self.duration
    }

    pub fn can_stack_duration(&self) -> bool {
        self.can_stack_duration
    }

    pub fn can_stack_effect(&self) -> bool {
        self.can_stack_effect
    }

    /// Number of applied stacks not yet removed
    pub fn stack_depth(&self) -> usize {
        self.stacks.len()
    }

    /// Lifetime count of `apply` calls
    pub fn apply_count(&self) -> usize {
        self.apply_count
    }

    /// Lifetime count of `remove` calls that popped a stack
    pub fn remove_count(&self) -> usize {
        self.remove_count
    }

    pub fn describe(&self) -> String {
        self.behavior.describe()
    }

    /// Run the behavior's one-time setup.
    pub fn init(&mut self, ctx: &C) -> Result<(), BuffError> {
        self.behavior
            .init(ctx)
            .map_err(|e| self.as_apply_failure(e))
    }

    /// Apply one stack.
    ///
    /// The new scope is committed even if `on_apply` fails, so the matching
    /// `remove` unwinds whatever was acquired before the failure.
    pub fn apply(&mut self) -> Result<(), BuffError> {
        let mut scope = ApplyScope::new();
        let result = self.behavior.on_apply(&mut scope);

        tracing::trace!(buff_id = %self.id, handles = scope.len(), "Committing stack");
        self.stacks.push(scope);
        self.apply_count += 1;

        result.map_err(|e| self.as_apply_failure(e))
    }

    /// Remove the most recent stack.
    ///
    /// Handles are revoked newest-first, then `on_remove` runs. A failure
    /// anywhere is logged and the rest of the unwind still happens; the
    /// number of failures is reported afterwards.
    pub fn remove(&mut self) -> Result<(), BuffError> {
        let Some(scope) = self.stacks.pop() else {
            tracing::warn!(buff_id = %self.id, "Remove called with no applied stacks");
            return Ok(());
        };
        self.remove_count += 1;

        let mut failures = 0;
        for error in scope.unwind() {
            tracing::warn!(buff_id = %self.id, error = %error, "Failed to revoke modifier");
            failures += 1;
        }

        if self.stacks.is_empty() && !self.detached.is_empty() {
            let detached = std::mem::take(&mut self.detached);
            for error in detached.unwind() {
                tracing::warn!(buff_id = %self.id, error = %error, "Failed to revoke detached modifier");
                failures += 1;
            }
        }

        if let Err(error) = self.behavior.on_remove() {
            tracing::warn!(buff_id = %self.id, error = %error, "on_remove failed");
            failures += 1;
        }

        if failures > 0 {
            return Err(BuffError::RemoveFailure {
                id: self.id.clone(),
                failures,
            });
        }
        Ok(())
    }

    /// Track a handle outside of an apply.
    ///
    /// Tolerated but almost always a bug in the caller: the handle is not
    /// tied to any stack and is only released once the last stack goes.
    pub fn track<H>(&mut self, handle: H) -> H
    where
        H: Revoke + Clone + 'static,
    {
        tracing::warn!(buff_id = %self.id, "Handle tracked outside of apply; attaching to detached scope");
        self.detached.track(handle)
    }

    fn as_apply_failure(&self, error: BuffError) -> BuffError {
        match error {
            BuffError::ApplyFailure { .. } => error,
            other => BuffError::apply_failure(self.id.clone(), other),
        }
    }
}

impl<C> fmt::Debug for StackableEffect<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackableEffect")
            .field("id", &self.id)
            .field("duration", &self.duration)
            .field("can_stack_duration", &self.can_stack_duration)
            .field("can_stack_effect", &self.can_stack_effect)
            .field("stacks", &self.stacks.len())
            .finish()
    }
}
