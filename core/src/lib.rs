pub mod buffs;
pub mod definitions;
pub mod duration;
pub mod effects;
pub mod error;
pub mod gameplay;
pub mod modifiers;
pub mod registry;
pub mod session;

// Re-exports for convenience
pub use duration::DurationTracker;
pub use effects::{ApplyScope, BuffBehavior, StackableEffect};
pub use error::{BuffError, RevokeError};
pub use gameplay::{GameContext, GameplayTimer, ScoreModel};
pub use modifiers::{ModifierAccumulator, MultiplierStack, Revoke};
pub use registry::{BuffRegistry, RegisterOutcome};
pub use session::BuffSession;
pub use stackbuff_types::*;
