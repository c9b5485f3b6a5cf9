//! Identity directory domain service.
//!
//! Implements account creation, profile reads and edits, favorite
//! management, and deletion over the user repository and password hasher
//! ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::auth::Identity;
use crate::domain::deadline::bounded;
use crate::domain::ports::{
    IdentityDirectory, PasswordHasher, PasswordHasherError, SignUpRequest, UserRepository,
    UserRepositoryError,
};
use crate::domain::user::{ProfileChanges, PublicProfile, User, UserId, Username};
use crate::domain::Error;

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Unavailable { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { .. } => Error::conflict("username already taken")
            .with_details(json!({ "field": "username", "code": "username_taken" })),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    let PasswordHasherError::Hashing { message } = error;
    Error::internal(format!("credential hashing failed: {message}"))
}

/// Directory service over account persistence and credential hashing.
#[derive(Clone)]
pub struct DirectoryService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> DirectoryService<R, H> {
    /// Create a new directory service.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<R, H> DirectoryService<R, H>
where
    R: UserRepository,
{
    fn updated_profile(
        updated: Result<Option<User>, UserRepositoryError>,
    ) -> Result<PublicProfile, Error> {
        updated
            .map_err(map_repository_error)?
            .map(|user| user.public_profile())
            .ok_or_else(|| Error::not_found("account no longer exists"))
    }
}

#[async_trait]
impl<R, H> IdentityDirectory for DirectoryService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn sign_up(&self, request: SignUpRequest) -> Result<PublicProfile, Error> {
        let SignUpRequest {
            credentials,
            profile,
        } = request;

        let username = Username::new(credentials.username())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let digest = self
            .hasher
            .hash(credentials.password())
            .map_err(map_hasher_error)?;

        let mut user = User::new(UserId::random(), username, digest);
        user.apply(&profile);

        bounded(self.users.insert(&user))
            .await?
            .map_err(map_repository_error)?;
        Ok(user.public_profile())
    }

    async fn identity_of(&self, id: UserId) -> Result<Option<Identity>, Error> {
        let found = bounded(self.users.find_by_id(id))
            .await?
            .map_err(map_repository_error)?;
        Ok(found.map(|user| Identity::new(user.id(), user.username().clone())))
    }

    async fn profile_of(&self, username: &Username) -> Result<PublicProfile, Error> {
        bounded(self.users.find_by_username(username))
            .await?
            .map_err(map_repository_error)?
            .map(|user| user.public_profile())
            .ok_or_else(|| Error::not_found(format!("user {username} not found")))
    }

    async fn update_profile(
        &self,
        identity: &Identity,
        changes: ProfileChanges,
    ) -> Result<PublicProfile, Error> {
        let updated = bounded(self.users.update_profile(identity.id(), &changes)).await?;
        Self::updated_profile(updated)
    }

    async fn add_favorite(
        &self,
        identity: &Identity,
        favorite: &Username,
    ) -> Result<PublicProfile, Error> {
        let updated = bounded(self.users.add_favorite(identity.id(), favorite)).await?;
        Self::updated_profile(updated)
    }

    async fn remove_favorite(
        &self,
        identity: &Identity,
        favorite: &Username,
    ) -> Result<PublicProfile, Error> {
        let updated = bounded(self.users.remove_favorite(identity.id(), favorite)).await?;
        Self::updated_profile(updated)
    }

    async fn delete_account(&self, identity: &Identity) -> Result<(), Error> {
        // Deleting an already-deleted account is not an error; historical
        // content stays attributed to the username string either way.
        bounded(self.users.delete(identity.id()))
            .await?
            .map_err(map_repository_error)?;
        Ok(())
    }
}
