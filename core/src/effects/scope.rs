use crate::error::RevokeError;
use crate::modifiers::{Revocation, Revoke};

/// Handles acquired during a single application of a buff.
///
/// Handles are released in reverse acquisition order so later modifiers,
/// which may depend on earlier ones, go first.
#[derive(Debug, Default)]
pub struct ApplyScope {
    handles: Vec<Box<dyn Revoke>>,
}

impl ApplyScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle to revoke when this stack is removed. Returns the
    /// handle so acquisition and tracking read as one expression.
    pub fn track<H>(&mut self, handle: H) -> H
    where
        H: Revoke + Clone + 'static,
    {
        self.handles.push(Box::new(handle.clone()));
        handle
    }

    /// Register a closure to run when this stack is removed.
    pub fn on_unwind(&mut self, action: impl FnOnce() -> Result<(), RevokeError> + 'static) {
        self.handles.push(Box::new(Revocation::new(action)));
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Revoke everything, newest first. Every handle is attempted; the
    /// errors of those that failed are returned.
    pub(crate) fn unwind(self) -> Vec<RevokeError> {
        self.handles
            .into_iter()
            .rev()
            .filter_map(|handle| handle.revoke().err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::modifiers::ModifierAccumulator;

    #[test]
    fn test_unwind_runs_newest_first() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut scope = ApplyScope::new();
        for i in 0..3 {
            let order = Rc::clone(&order);
            scope.on_unwind(move || {
                order.borrow_mut().push(i);
                Ok(())
            });
        }

        assert!(scope.unwind().is_empty());
        assert_eq!(*order.borrow(), vec![2, 1, 0]);
    }

    #[test]
    fn test_unwind_continues_past_failures() {
        let acc = ModifierAccumulator::new();
        let mut scope = ApplyScope::new();
        scope.track(acc.add_delta(1));
        scope.on_unwind(|| Err(RevokeError::Other("boom".into())));
        scope.track(acc.add_delta(2));

        let errors = scope.unwind();
        assert_eq!(errors, vec![RevokeError::Other("boom".into())]);
        assert_eq!(acc.total(), 0, "handles on both sides of the failure revoked");
    }

    #[test]
    fn test_track_returns_live_handle() {
        let acc = ModifierAccumulator::new();
        let mut scope = ApplyScope::new();
        let handle = scope.track(acc.add_delta(9));
        assert_eq!(handle.value(), 9);
        assert_eq!(scope.len(), 1);

        scope.unwind();
        assert!(handle.is_revoked());
    }
}
