//! In-process account store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{ProfileChanges, User, UserId, Username};

/// Account repository backed by a process-local map.
///
/// Mutations take the write lock for the whole find-and-modify step, so the
/// returned record always reflects exactly the applied change.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    records: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut HashMap<UserId, User>) -> T,
    ) -> Result<T, UserRepositoryError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| UserRepositoryError::unavailable("user store lock poisoned"))?;
        Ok(apply(&mut records))
    }

    fn read<T>(
        &self,
        apply: impl FnOnce(&HashMap<UserId, User>) -> T,
    ) -> Result<T, UserRepositoryError> {
        let records = self
            .records
            .read()
            .map_err(|_| UserRepositoryError::unavailable("user store lock poisoned"))?;
        Ok(apply(&records))
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        self.mutate(|records| {
            if records
                .values()
                .any(|existing| existing.username() == user.username())
            {
                return Err(UserRepositoryError::duplicate_username(
                    user.username().as_str(),
                ));
            }
            records.insert(user.id(), user.clone());
            Ok(())
        })?
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        self.read(|records| records.get(&id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.read(|records| {
            records
                .values()
                .find(|user| user.username() == username)
                .cloned()
        })
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.mutate(|records| {
            records.get_mut(&id).map(|user| {
                user.apply(changes);
                user.clone()
            })
        })
    }

    async fn add_favorite(
        &self,
        id: UserId,
        favorite: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.mutate(|records| {
            records.get_mut(&id).map(|user| {
                user.add_favorite(favorite.clone());
                user.clone()
            })
        })
    }

    async fn remove_favorite(
        &self,
        id: UserId,
        favorite: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.mutate(|records| {
            records.get_mut(&id).map(|user| {
                user.remove_favorite(favorite);
                user.clone()
            })
        })
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        self.mutate(|records| records.remove(&id).is_some())
    }
}
