//! Revocable modifier stores
//!
//! Gameplay values that buffs can change own one of these stores:
//! - [`ModifierAccumulator`]: additive integer deltas, reference counted per value
//! - [`MultiplierStack`]: multiplicative factors, combined as a product
//!
//! Adding a contribution returns a handle. Revoking the handle takes the
//! contribution back out exactly once, no matter how many clones of the
//! handle exist or in which order handles are revoked.

mod accumulator;
mod handle;
mod multiplier;

pub use accumulator::{DeltaHandle, ModifierAccumulator};
pub use handle::{Revocation, Revoke};
pub use multiplier::{MultiplierHandle, MultiplierStack};
