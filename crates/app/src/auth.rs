//! Session collaborator gating privileged operations.
//!
//! Identity resolution is delegated to an external service; this module
//! only defines the seam the services check against. Catalog reads and
//! guest checkout need no identity; everything back-office requires an
//! admin.

use std::sync::RwLock;

use mockall::automock;
use thiserror::Error;

use candela_core::ids::Id;

/// Identifier for a signed-in user.
pub type UserId = Id<Identity>;

/// What a signed-in user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Regular storefront visitor with an account.
    Customer,
    /// Back-office administrator.
    Admin,
}

/// The resolved identity of the current session, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// User identifier from the identity service.
    pub id: UserId,

    /// Granted role.
    pub role: Role,
}

impl Identity {
    /// Whether this identity may use admin-only operations.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Errors from privileged-operation gating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No identity on the current session.
    #[error("authentication required")]
    Unauthenticated,

    /// The identity lacks the admin role.
    #[error("administrator access required")]
    Forbidden,
}

/// The session seam: who is making the current request.
#[automock]
pub trait SessionProvider: Send + Sync {
    /// The identity attached to the session, or `None` for guests.
    fn current_user(&self) -> Option<Identity>;
}

/// Requires an admin identity on the session.
///
/// # Errors
///
/// - [`AuthError::Unauthenticated`]: nobody is signed in.
/// - [`AuthError::Forbidden`]: signed in, but not an admin.
pub fn require_admin(session: &dyn SessionProvider) -> Result<Identity, AuthError> {
    let identity = session.current_user().ok_or(AuthError::Unauthenticated)?;

    if identity.is_admin() {
        Ok(identity)
    } else {
        Err(AuthError::Forbidden)
    }
}

/// A [`SessionProvider`] holding a switchable identity.
///
/// Backs tests and single-process wiring; sign-in state can be flipped
/// without rebuilding the services that hold the provider.
#[derive(Debug, Default)]
pub struct StaticSession {
    identity: RwLock<Option<Identity>>,
}

impl StaticSession {
    /// A session with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session signed in as a fresh admin.
    #[must_use]
    pub fn admin() -> Self {
        let session = Self::default();
        session.sign_in(Identity {
            id: UserId::generate(),
            role: Role::Admin,
        });

        session
    }

    /// A session signed in as a fresh customer.
    #[must_use]
    pub fn customer() -> Self {
        let session = Self::default();
        session.sign_in(Identity {
            id: UserId::generate(),
            role: Role::Customer,
        });

        session
    }

    /// Attaches an identity to the session.
    pub fn sign_in(&self, identity: Identity) {
        if let Ok(mut current) = self.identity.write() {
            *current = Some(identity);
        }
    }

    /// Detaches any identity from the session.
    pub fn sign_out(&self) {
        if let Ok(mut current) = self.identity.write() {
            *current = None;
        }
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<Identity> {
        self.identity.read().ok().and_then(|current| current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guests_are_unauthenticated() {
        let session = StaticSession::anonymous();

        assert_eq!(require_admin(&session), Err(AuthError::Unauthenticated));
    }

    #[test]
    fn customers_are_forbidden() {
        let session = StaticSession::customer();

        assert_eq!(require_admin(&session), Err(AuthError::Forbidden));
    }

    #[test]
    fn admins_pass_the_gate() {
        let session = StaticSession::admin();

        let identity = require_admin(&session);

        assert!(identity.is_ok_and(|identity| identity.is_admin()));
    }

    #[test]
    fn signing_out_revokes_access() {
        let session = StaticSession::admin();
        session.sign_out();

        assert_eq!(require_admin(&session), Err(AuthError::Unauthenticated));
    }
}
