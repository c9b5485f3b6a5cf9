//! Driving port for account management use-cases.

use async_trait::async_trait;

use crate::domain::auth::{Credentials, Identity};
use crate::domain::user::{ProfileChanges, PublicProfile, UserId, Username};
use crate::domain::Error;

/// Validated sign-up payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    /// Username and password, already shape-checked at the boundary.
    pub credentials: Credentials,
    /// Optional profile fields supplied at creation.
    pub profile: ProfileChanges,
}

/// Domain use-case port for account storage and follow lists.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Create an account; fails with Conflict when the username is taken.
    async fn sign_up(&self, request: SignUpRequest) -> Result<PublicProfile, Error>;

    /// Re-resolve a session-stored identifier into a live identity.
    /// Returns `None` once the account has been deleted.
    async fn identity_of(&self, id: UserId) -> Result<Option<Identity>, Error>;

    /// Public profile for an account, by exact username.
    async fn profile_of(&self, username: &Username) -> Result<PublicProfile, Error>;

    /// Apply a partial profile edit to the caller's account.
    async fn update_profile(
        &self,
        identity: &Identity,
        changes: ProfileChanges,
    ) -> Result<PublicProfile, Error>;

    /// Add a username to the caller's favorites set. Idempotent; the target
    /// account is not required to exist.
    async fn add_favorite(
        &self,
        identity: &Identity,
        favorite: &Username,
    ) -> Result<PublicProfile, Error>;

    /// Remove a username from the caller's favorites set. Idempotent.
    async fn remove_favorite(
        &self,
        identity: &Identity,
        favorite: &Username,
    ) -> Result<PublicProfile, Error>;

    /// Delete the caller's account. Authored content stays attributed to
    /// the username string.
    async fn delete_account(&self, identity: &Identity) -> Result<(), Error>;
}
