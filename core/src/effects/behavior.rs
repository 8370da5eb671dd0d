use super::ApplyScope;
use crate::error::BuffError;

/// Hooks implemented by each kind of buff.
///
/// `C` is the host context handed to [`BuffBehavior::init`] on first
/// registration. Behaviors keep whatever capabilities they need from it
/// (score model, gameplay timer, ...) for later applies and removes.
pub trait BuffBehavior<C> {
    /// One-time setup when the buff first becomes active.
    fn init(&mut self, _ctx: &C) -> Result<(), BuffError> {
        Ok(())
    }

    /// Apply one stack. Everything that must be undone later goes through
    /// `scope.track(...)`. Handles tracked before an error are still
    /// unwound by the matching remove.
    fn on_apply(&mut self, scope: &mut ApplyScope) -> Result<(), BuffError>;

    /// Cleanup that is not handle based (e.g., resuming a paused timer).
    /// Runs after the stack's handles have been revoked.
    fn on_remove(&mut self) -> Result<(), BuffError> {
        Ok(())
    }

    /// Short description for logs and listings
    fn describe(&self) -> String {
        String::new()
    }
}
