//! Reversible, stackable buff effects
//!
//! This module provides:
//! - **Behavior**: the per-kind hooks a buff implements (`init`, `on_apply`, `on_remove`)
//! - **Scope**: the list of revocation handles acquired by one application
//! - **StackableEffect**: sealed apply/remove that keeps one scope per stack
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         apply()                                  │
//! │  open scope ──▶ behavior.on_apply(scope) ──▶ push scope          │
//! │                 scope.track(acc.add_delta(+5))                   │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                stacks: [scope₁, scope₂, …, scopeₙ]
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         remove()                                 │
//! │  pop scopeₙ ──▶ revoke handles newest-first ──▶ on_remove()      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod behavior;
mod scope;
mod stackable;

pub use behavior::BuffBehavior;
pub use scope::ApplyScope;
pub use stackable::StackableEffect;
