//! Auth gate domain service.
//!
//! Verifies credentials against stored digests. Every verification failure
//! collapses into the same Unauthorized error so callers cannot probe which
//! usernames exist.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::{Credentials, Identity};
use crate::domain::deadline::bounded;
use crate::domain::ports::{
    AuthGate, AuthenticatedIdentity, PasswordHasher, UserRepository, UserRepositoryError,
};
use crate::domain::user::Username;
use crate::domain::Error;

const GENERIC_FAILURE: &str = "invalid credentials";

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Unavailable { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } | UserRepositoryError::DuplicateUsername { username: message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Auth gate over account persistence and credential verification.
#[derive(Clone)]
pub struct AuthService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AuthService<R, H> {
    /// Create a new auth gate.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<R, H> AuthGate for AuthService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedIdentity, Error> {
        let username = Username::new(credentials.username())
            .map_err(|_| Error::unauthorized(GENERIC_FAILURE))?;

        let user = bounded(self.users.find_by_username(&username))
            .await?
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized(GENERIC_FAILURE))?;

        if !self.hasher.verify(credentials.password(), user.password()) {
            return Err(Error::unauthorized(GENERIC_FAILURE));
        }

        Ok(AuthenticatedIdentity {
            identity: Identity::new(user.id(), user.username().clone()),
            profile: user.public_profile(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
    use crate::domain::user::{PasswordHash, User, UserId};
    use crate::domain::ErrorCode;

    fn stored_user(username: &str) -> User {
        User::new(
            UserId::random(),
            Username::new(username).expect("valid username"),
            PasswordHash::new("digest"),
        )
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials::try_from_parts(username, password).expect("valid shape")
    }

    #[tokio::test]
    async fn valid_credentials_resolve_the_identity() {
        let user = stored_user("alice");
        let expected_id = user.id();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| true);

        let gate = AuthService::new(Arc::new(users), Arc::new(hasher));
        let authenticated = gate
            .authenticate(&credentials("alice", "secret1"))
            .await
            .expect("authentication succeeds");
        assert_eq!(authenticated.identity.id(), expected_id);
        assert_eq!(authenticated.profile.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_are_indistinguishable() {
        let mut missing = MockUserRepository::new();
        missing.expect_find_by_username().returning(|_| Ok(None));
        let gate = AuthService::new(Arc::new(missing), Arc::new(MockPasswordHasher::new()));
        let unknown_user = gate
            .authenticate(&credentials("ghost", "secret1"))
            .await
            .expect_err("unknown user must fail");

        let user = stored_user("alice");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| false);
        let gate = AuthService::new(Arc::new(users), Arc::new(hasher));
        let wrong_password = gate
            .authenticate(&credentials("alice", "nope"))
            .await
            .expect_err("wrong password must fail");

        assert_eq!(unknown_user, wrong_password);
        assert_eq!(unknown_user.code(), ErrorCode::Unauthorized);
    }
}
