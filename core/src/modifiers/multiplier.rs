use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::Revoke;
use crate::error::RevokeError;

#[derive(Debug, Default)]
struct StackState {
    /// (entry id, multiplier) in insertion order
    entries: Vec<(u64, f32)>,
    next_id: u64,
}

/// Multiplicative modifier store (e.g., countdown tick speed).
///
/// The effective factor is the product of all live entries, 1.0 when empty.
/// Identical factors pushed by different buffs are separate entries.
#[derive(Debug, Default)]
pub struct MultiplierStack {
    state: Rc<RefCell<StackState>>,
}

impl MultiplierStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a factor. Negative factors are clamped to 0.
    pub fn push(&self, multiplier: f32) -> MultiplierHandle {
        let multiplier = multiplier.max(0.0);
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.entries.push((id, multiplier));

        MultiplierHandle {
            id,
            multiplier,
            owner: Rc::downgrade(&self.state),
            revoked: Rc::new(Cell::new(false)),
        }
    }

    pub fn product(&self) -> f32 {
        self.state
            .borrow()
            .entries
            .iter()
            .fold(1.0, |acc, (_, m)| acc * m)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }

    /// Live factors in insertion order
    pub fn factors(&self) -> Vec<f32> {
        self.state.borrow().entries.iter().map(|(_, m)| *m).collect()
    }
}

/// Revocation handle for one [`MultiplierStack::push`] call.
#[derive(Debug, Clone)]
pub struct MultiplierHandle {
    id: u64,
    multiplier: f32,
    owner: Weak<RefCell<StackState>>,
    revoked: Rc<Cell<bool>>,
}

impl MultiplierHandle {
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }
}

impl Revoke for MultiplierHandle {
    fn revoke(&self) -> Result<(), RevokeError> {
        if self.revoked.get() {
            return Ok(());
        }

        let Some(owner) = self.owner.upgrade() else {
            self.revoked.set(true);
            return Err(RevokeError::OwnerDropped);
        };
        let mut state = owner.try_borrow_mut().map_err(|_| RevokeError::OwnerBusy)?;

        self.revoked.set(true);
        if let Some(idx) = state.entries.iter().position(|(id, _)| *id == self.id) {
            state.entries.remove(idx);
        }
        Ok(())
    }

    fn is_revoked(&self) -> bool {
        self.revoked.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_of_entries() {
        let stack = MultiplierStack::new();
        assert_eq!(stack.product(), 1.0);

        let half = stack.push(0.5);
        let _double = stack.push(2.0);
        let _quarter = stack.push(0.25);
        assert_eq!(stack.product(), 0.25);

        half.revoke().unwrap();
        assert_eq!(stack.product(), 0.5);
        assert_eq!(stack.factors(), vec![2.0, 0.25]);
    }

    #[test]
    fn test_identical_factors_removed_one_at_a_time() {
        let stack = MultiplierStack::new();
        let a = stack.push(0.5);
        let b = stack.push(0.5);
        assert_eq!(stack.product(), 0.25);

        a.revoke().unwrap();
        a.revoke().unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.product(), 0.5);

        b.revoke().unwrap();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_negative_factor_clamped() {
        let stack = MultiplierStack::new();
        let h = stack.push(-3.0);
        assert_eq!(h.multiplier(), 0.0);
        assert_eq!(stack.product(), 0.0);
    }
}
