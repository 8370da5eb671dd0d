//! Concrete buff behaviors and the factory that builds them from definitions.
//!
//! Every behavior here works against [`GameContext`]: `init` binds the
//! collaborator it needs, `on_apply` acquires handles through the scope, and
//! the registry revokes them on removal.
//!
//! [`GameContext`]: crate::gameplay::GameContext

mod active;
mod factory;
mod score;
mod timer;

pub use active::apply_active;
pub use factory::build_effect;
pub use score::ScoreBuff;
pub use timer::TimerBuff;
