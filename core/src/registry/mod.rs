//! Active buff registry
//!
//! Owns every active [`StackableEffect`](crate::effects::StackableEffect),
//! drives their durations from host tick signals, and removes expired buffs
//! with one `remove` per applied stack.

mod buff_registry;


pub use buff_registry::{BuffRegistry, RegisterOutcome};
