use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use hashbrown::HashMap;

use super::Revoke;
use crate::error::RevokeError;

#[derive(Debug, Default)]
struct AccumulatorState {
    /// Wider than the deltas so the running sum never overflows
    total: i64,
    /// Delta value -> number of unrevoked contributions with that value
    counts: HashMap<i32, usize>,
}

impl AccumulatorState {
    fn acquire(&mut self, value: i32) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.total += i64::from(value);
    }

    fn release(&mut self, value: i32) {
        let Some(count) = self.counts.get_mut(&value) else {
            tracing::error!(value, "BUG: releasing a delta the accumulator does not hold");
            return;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&value);
        }
        self.total -= i64::from(value);
    }
}

/// Additive modifier store.
///
/// `total()` is always the sum of every delta whose handle has not been
/// revoked. Identical deltas from different sources are counted separately,
/// so revoking one leaves the others in place.
///
/// Not thread safe: handles reach back into the store through `Rc`.
#[derive(Debug, Default)]
pub struct ModifierAccumulator {
    state: Rc<RefCell<AccumulatorState>>,
}

impl ModifierAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the total. The contribution lasts until the returned
    /// handle (or any clone of it) is revoked.
    pub fn add_delta(&self, value: i32) -> DeltaHandle {
        self.state.borrow_mut().acquire(value);
        DeltaHandle {
            value,
            owner: Rc::downgrade(&self.state),
            revoked: Rc::new(Cell::new(false)),
        }
    }

    /// Sum of live deltas, saturated to the `i32` range
    pub fn total(&self) -> i32 {
        let total = self.state.borrow().total;
        i32::try_from(total).unwrap_or(if total > 0 { i32::MAX } else { i32::MIN })
    }

    /// Number of live contributions with exactly this value
    pub fn count(&self, value: i32) -> usize {
        self.state.borrow().counts.get(&value).copied().unwrap_or(0)
    }

    /// Number of distinct values currently held
    pub fn distinct_values(&self) -> usize {
        self.state.borrow().counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().counts.is_empty()
    }
}

/// Revocation handle for one [`ModifierAccumulator::add_delta`] call.
///
/// Clones share revocation state.
#[derive(Debug, Clone)]
pub struct DeltaHandle {
    value: i32,
    owner: Weak<RefCell<AccumulatorState>>,
    revoked: Rc<Cell<bool>>,
}

impl DeltaHandle {
    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Revoke for DeltaHandle {
    fn revoke(&self) -> Result<(), RevokeError> {
        if self.revoked.get() {
            return Ok(());
        }

        let Some(owner) = self.owner.upgrade() else {
            // Nothing left to give the delta back to
            self.revoked.set(true);
            return Err(RevokeError::OwnerDropped);
        };
        let mut state = owner.try_borrow_mut().map_err(|_| RevokeError::OwnerBusy)?;

        self.revoked.set(true);
        state.release(self.value);
        Ok(())
    }

    fn is_revoked(&self) -> bool {
        self.revoked.get()
    }
}
