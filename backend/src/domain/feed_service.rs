//! Community feed domain service.
//!
//! Joins comment log entries against live profiles. The author set is
//! recomputed from the caller's stored favorites on every query, so a
//! follow or unfollow is visible on the very next request.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::Identity;
use crate::domain::comment_log::CommentLogEntry;
use crate::domain::deadline::bounded;
use crate::domain::page::Page;
use crate::domain::ports::{
    CommentLog, CommentLogError, FeedAggregator, UserRepository, UserRepositoryError,
};
use crate::domain::user::Username;
use crate::domain::Error;

fn map_log_error(error: CommentLogError) -> Error {
    match error {
        CommentLogError::Unavailable { message } => {
            Error::service_unavailable(format!("comment log unavailable: {message}"))
        }
        CommentLogError::Query { message } => {
            Error::internal(format!("comment log error: {message}"))
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Unavailable { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message }
        | UserRepositoryError::DuplicateUsername { username: message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Feed service implementing the feed driving port.
#[derive(Clone)]
pub struct FeedService<L, U> {
    comment_log: Arc<L>,
    users: Arc<U>,
}

impl<L, U> FeedService<L, U> {
    /// Create a new feed service.
    pub fn new(comment_log: Arc<L>, users: Arc<U>) -> Self {
        Self { comment_log, users }
    }
}

#[async_trait]
impl<L, U> FeedAggregator for FeedService<L, U>
where
    L: CommentLog,
    U: UserRepository,
{
    async fn community_feed(
        &self,
        identity: &Identity,
        page: Page,
    ) -> Result<Vec<CommentLogEntry>, Error> {
        let caller = bounded(self.users.find_by_id(identity.id()))
            .await?
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("please sign in"))?;

        let mut authors = caller.favorites().clone();
        authors.insert(caller.username().clone());

        let mut entries = bounded(self.comment_log.list_by_authors(&authors, page))
            .await?
            .map_err(map_log_error)?;

        // Point-in-time lookups; entries may mix picture versions when a
        // profile is edited mid-query.
        let mut pictures: BTreeMap<Username, Option<String>> = BTreeMap::new();
        for entry in &entries {
            if pictures.contains_key(&entry.username) {
                continue;
            }
            let found = bounded(self.users.find_by_username(&entry.username))
                .await?
                .map_err(map_user_error)?;
            pictures.insert(
                entry.username.clone(),
                found.map(|user| user.profile_pic_url().to_owned()),
            );
        }
        for entry in &mut entries {
            if let Some(Some(url)) = pictures.get(&entry.username) {
                entry.profile_pic_url = url.clone();
            }
        }

        Ok(entries)
    }
}
