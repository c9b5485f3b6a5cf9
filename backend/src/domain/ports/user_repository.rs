//! Port abstraction for account persistence adapters and their errors.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::user::{ProfileChanges, User, UserId, Username};

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum UserRepositoryError {
        /// Backing store unreachable or not responding.
        Unavailable { message: String } =>
            "user repository unavailable: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// Insert collided with an existing username.
        DuplicateUsername { username: String } =>
            "username already taken: {username}",
    }
}

/// Port for storing and mutating account records.
///
/// Mutations follow a find-and-modify contract: the adapter locates the
/// record and applies the change in one step, returning the updated record
/// so callers never read-modify-write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account; fails with `DuplicateUsername` on collision.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch an account by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Apply a partial profile edit, returning the updated account.
    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Add a username to the account's favorites set (idempotent),
    /// returning the updated account.
    async fn add_favorite(
        &self,
        id: UserId,
        favorite: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Remove a username from the account's favorites set (idempotent),
    /// returning the updated account.
    async fn remove_favorite(
        &self,
        id: UserId,
        favorite: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Delete the account; returns whether a record was removed. Authored
    /// comments and discussions are intentionally left in place.
    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError>;
}
