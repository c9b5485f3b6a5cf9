//! Driving port for credential authentication.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing the backing infrastructure.
//! Session persistence stays in the inbound adapter; the gate only resolves
//! who the caller is.

use async_trait::async_trait;

use crate::domain::auth::{Credentials, Identity};
use crate::domain::user::PublicProfile;
use crate::domain::Error;

/// Successful authentication result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// Resolved caller identity, bound to the session by the adapter.
    pub identity: Identity,
    /// Public profile of the authenticated account.
    pub profile: PublicProfile,
}

/// Domain use-case port for authentication.
///
/// All verification failures collapse into one generic Unauthorized error;
/// callers cannot distinguish an unknown username from a wrong password.
#[async_trait]
pub trait AuthGate: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &Credentials)
    -> Result<AuthenticatedIdentity, Error>;
}
