use std::cell::Cell;
use std::fmt;

use crate::error::RevokeError;

/// Something acquired during a buff application that must be given back.
///
/// Revoking twice is a no-op: only the first successful call has an effect.
pub trait Revoke {
    fn revoke(&self) -> Result<(), RevokeError>;

    fn is_revoked(&self) -> bool;
}

impl fmt::Debug for dyn Revoke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Revoke")
            .field("revoked", &self.is_revoked())
            .finish()
    }
}

/// Adapter turning a one-shot closure into a [`Revoke`].
///
/// For cleanup that does not come out of a modifier store, e.g. undoing a
/// direct write to a collaborator.
pub struct Revocation {
    action: Cell<Option<Box<dyn FnOnce() -> Result<(), RevokeError>>>>,
    revoked: Cell<bool>,
}

impl Revocation {
    pub fn new(action: impl FnOnce() -> Result<(), RevokeError> + 'static) -> Self {
        Self {
            action: Cell::new(Some(Box::new(action))),
            revoked: Cell::new(false),
        }
    }
}

impl Revoke for Revocation {
    fn revoke(&self) -> Result<(), RevokeError> {
        let Some(action) = self.action.take() else {
            return Ok(());
        };
        self.revoked.set(true);
        action()
    }

    fn is_revoked(&self) -> bool {
        self.revoked.get()
    }
}
