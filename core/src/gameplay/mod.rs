//! Systems that buffs modify.
//!
//! Both collaborators are owned by the host and shared with buffs through
//! [`GameContext`]. Buffs never write tuning values directly; they acquire
//! handles from the accumulators and stacks exposed here.

mod context;
mod score;
mod timer;

pub use context::GameContext;
pub use score::ScoreModel;
pub use timer::{GameplayTimer, PauseHandle};
