//! Error types for buff registration and teardown.

use thiserror::Error;

/// Failure revoking a single modifier handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevokeError {
    /// The accumulator or stack the handle points into no longer exists
    #[error("modifier owner was dropped before the handle was revoked")]
    OwnerDropped,

    /// The owner is mutably borrowed elsewhere (re-entrant revoke)
    #[error("modifier owner is busy")]
    OwnerBusy,

    #[error("{0}")]
    Other(String),
}

/// Errors surfaced by effects and the registry.
///
/// None of these are fatal to the registry: each is logged where it happens
/// and the registry keeps every other buff consistent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuffError {
    /// A finite buff whose authored duration is already spent
    #[error("buff '{id}' has a zero duration and is not infinite")]
    InvalidRegistration { id: String },

    /// `init` or `on_apply` failed. Whatever was tracked before the failure
    /// stays committed so it can be unwound.
    #[error("buff '{id}' failed to apply: {reason}")]
    ApplyFailure { id: String, reason: String },

    /// One or more handles (or `on_remove`) failed while unwinding a stack.
    /// The rest of the stack was still unwound.
    #[error("buff '{id}' had {failures} failure(s) while removing a stack")]
    RemoveFailure { id: String, failures: usize },

    /// A collaborator the buff depends on was never bound by `init`
    #[error("missing capability: {0}")]
    MissingCapability(&'static str),
}

impl BuffError {
    pub fn apply_failure(id: impl Into<String>, reason: impl ToString) -> Self {
        Self::ApplyFailure {
            id: id.into(),
            reason: reason.to_string(),
        }
    }
}
