//! Discussion domain service.
//!
//! Owns the dual-write between a discussion's embedded thread and the
//! secondary comment log: the aggregate write is attempted and confirmed
//! first, then the log entry is recorded. A failed log write is tolerated
//! (feeds lag) because the aggregate stays authoritative; a log entry
//! without an embedded comment must never exist.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::auth::Identity;
use crate::domain::comment_log::{CommentLogEntry, DiscussionRef};
use crate::domain::deadline::bounded;
use crate::domain::discussion::{Discussion, DiscussionComment, DiscussionId, NewDiscussion};
use crate::domain::page::Page;
use crate::domain::ports::{
    AppendCommentRequest, Clock, CommentLog, CreateOutcome, DiscussionRepository,
    DiscussionRepositoryError, DiscussionStore, UserRepository, UserRepositoryError,
};
use crate::domain::user::Username;
use crate::domain::Error;

fn map_repository_error(error: DiscussionRepositoryError) -> Error {
    match error {
        DiscussionRepositoryError::Unavailable { message } => {
            Error::service_unavailable(format!("discussion repository unavailable: {message}"))
        }
        DiscussionRepositoryError::Query { message } => {
            Error::internal(format!("discussion repository error: {message}"))
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

/// Discussion service implementing the discussion driving port.
#[derive(Clone)]
pub struct DiscussionService<D, L, U, C> {
    discussions: Arc<D>,
    comment_log: Arc<L>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<D, L, U, C> DiscussionService<D, L, U, C> {
    /// Create a new discussion service.
    pub fn new(discussions: Arc<D>, comment_log: Arc<L>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            discussions,
            comment_log,
            users,
            clock,
        }
    }
}

impl<D, L, U, C> DiscussionService<D, L, U, C>
where
    D: DiscussionRepository,
    L: CommentLog,
    U: UserRepository,
    C: Clock,
{
    /// Resolve current profile pictures for the given authors.
    ///
    /// Missing accounts are simply absent from the map so callers keep the
    /// stored snapshot.
    async fn live_pictures(
        &self,
        authors: impl IntoIterator<Item = Username>,
    ) -> Result<BTreeMap<Username, String>, Error> {
        let mut pictures = BTreeMap::new();
        for author in authors {
            if pictures.contains_key(&author) {
                continue;
            }
            let found = bounded(self.users.find_by_username(&author))
                .await?
                .map_err(map_user_error)?;
            if let Some(user) = found {
                pictures.insert(author, user.profile_pic_url().to_owned());
            }
        }
        Ok(pictures)
    }
}

#[async_trait]
impl<D, L, U, C> DiscussionStore for DiscussionService<D, L, U, C>
where
    D: DiscussionRepository,
    L: CommentLog,
    U: UserRepository,
    C: Clock,
{
    async fn create_or_get(&self, payload: NewDiscussion) -> Result<(Discussion, bool), Error> {
        let discussion = Discussion::create(payload, self.clock.now());
        let outcome = bounded(self.discussions.insert_if_absent(discussion))
            .await?
            .map_err(map_repository_error)?;
        Ok(match outcome {
            CreateOutcome::Created(stored) => (stored, true),
            CreateOutcome::Existing(stored) => (stored, false),
        })
    }

    async fn search(&self, tags: &[String], limit: usize) -> Result<Vec<Discussion>, Error> {
        bounded(self.discussions.search_by_tags(tags, limit))
            .await?
            .map_err(map_repository_error)
    }

    async fn list_recent(&self, page: Page) -> Result<Vec<Discussion>, Error> {
        bounded(self.discussions.list_recent(page))
            .await?
            .map_err(map_repository_error)
    }

    async fn get_enriched(&self, id: &DiscussionId) -> Result<Discussion, Error> {
        let discussion = bounded(self.discussions.find_by_id(id))
            .await?
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("discussion {id} not found")))?;

        let authors = discussion
            .comments()
            .iter()
            .map(|comment| comment.username.clone())
            .collect::<Vec<_>>();
        let pictures = self.live_pictures(authors).await?;
        Ok(discussion.with_live_pictures(|author| pictures.get(author).cloned()))
    }

    async fn append_comment(
        &self,
        identity: &Identity,
        request: AppendCommentRequest,
    ) -> Result<Discussion, Error> {
        let author = bounded(self.users.find_by_id(identity.id()))
            .await?
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("please sign in"))?;

        let posted_at = self.clock.now();
        let comment = DiscussionComment {
            date: posted_at,
            username: identity.username().clone(),
            text: request.text.clone(),
            profile_pic_url: author.profile_pic_url().to_owned(),
        };

        // The aggregate write must be confirmed before the log write so the
        // log never holds an entry the discussion does not.
        let updated = bounded(
            self.discussions
                .append_comment(&request.discussion_id, comment),
        )
        .await?
        .map_err(map_repository_error)?
        .ok_or_else(|| {
            Error::not_found(format!("discussion {} not found", request.discussion_id))
        })?;

        let entry = CommentLogEntry {
            username: identity.username().clone(),
            profile_pic_url: author.profile_pic_url().to_owned(),
            date: posted_at,
            text: request.text,
            discussion: DiscussionRef {
                id: request.discussion_id.clone(),
                name: request.discussion_name,
            },
        };
        match bounded(self.comment_log.record(entry)).await {
            Ok(Ok(())) => {}
            Ok(Err(error)) => warn!(
                %error,
                discussion = %request.discussion_id,
                "comment log write failed; feeds will lag until it catches up"
            ),
            Err(error) => warn!(
                %error,
                discussion = %request.discussion_id,
                "comment log write timed out; feeds will lag until it catches up"
            ),
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    use crate::domain::discussion::Venue;
    use crate::domain::ports::{
        FixedClock, MockCommentLog, MockDiscussionRepository, MockUserRepository,
    };
    use crate::domain::user::{PasswordHash, User, UserId};
    use crate::domain::ErrorCode;

    fn payload(id: &str) -> NewDiscussion {
        NewDiscussion {
            id: DiscussionId::new(id).expect("valid id"),
            href: "https://example.com/d".to_owned(),
            name: "Gallery night".to_owned(),
            venue: Venue::default(),
            description: "openings".to_owned(),
            image: "https://example.com/d.png".to_owned(),
            date_start: Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
            date_end: Utc.with_ymd_and_hms(2024, 3, 1, 22, 0, 0).unwrap(),
            search_terms: vec!["openings".to_owned()],
        }
    }

    fn author(username: &str, picture: &str) -> User {
        let mut user = User::new(
            UserId::random(),
            Username::new(username).expect("valid username"),
            PasswordHash::new("digest"),
        );
        user.apply(&crate::domain::user::ProfileChanges {
            profile_pic_url: Some(picture.to_owned()),
            ..Default::default()
        });
        user
    }

    fn service(
        discussions: MockDiscussionRepository,
        comment_log: MockCommentLog,
        users: MockUserRepository,
        now: chrono::DateTime<Utc>,
    ) -> DiscussionService<MockDiscussionRepository, MockCommentLog, MockUserRepository, FixedClock>
    {
        DiscussionService::new(
            Arc::new(discussions),
            Arc::new(comment_log),
            Arc::new(users),
            Arc::new(FixedClock(now)),
        )
    }

    #[tokio::test]
    async fn create_or_get_reports_whether_a_record_was_created() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let existing = Discussion::create(payload("d1"), now);
        let mut discussions = MockDiscussionRepository::new();
        let stored = existing.clone();
        discussions
            .expect_insert_if_absent()
            .returning(move |_| Ok(CreateOutcome::Existing(stored.clone())));

        let service = service(
            discussions,
            MockCommentLog::new(),
            MockUserRepository::new(),
            now,
        );
        let (discussion, was_created) = service
            .create_or_get(payload("d1"))
            .await
            .expect("create_or_get succeeds");
        assert!(!was_created);
        assert_eq!(discussion, existing);
    }

    #[tokio::test]
    async fn append_confirms_the_aggregate_write_before_logging() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap();
        let user = author("alice", "https://example.com/alice.png");
        let identity = Identity::new(user.id(), user.username().clone());

        let mut users = MockUserRepository::new();
        let stored_user = user.clone();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_user.clone())));

        let mut updated = Discussion::create(payload("d1"), now);
        updated.append(DiscussionComment {
            date: now,
            username: user.username().clone(),
            text: "hi".to_owned(),
            profile_pic_url: user.profile_pic_url().to_owned(),
        });

        let mut discussions = MockDiscussionRepository::new();
        let returned = updated.clone();
        discussions
            .expect_append_comment()
            .withf(move |id, comment| {
                id.as_str() == "d1"
                    && comment.date == now
                    && comment.profile_pic_url == "https://example.com/alice.png"
            })
            .returning(move |_, _| Ok(Some(returned.clone())));

        let mut comment_log = MockCommentLog::new();
        comment_log
            .expect_record()
            .withf(move |entry| {
                entry.username.as_str() == "alice"
                    && entry.date == now
                    && entry.discussion.id.as_str() == "d1"
                    && entry.discussion.name == "Gallery night"
            })
            .returning(|_| Ok(()));

        let service = service(discussions, comment_log, users, now);
        let result = service
            .append_comment(
                &identity,
                AppendCommentRequest {
                    discussion_id: DiscussionId::new("d1").expect("valid id"),
                    discussion_name: "Gallery night".to_owned(),
                    text: "hi".to_owned(),
                },
            )
            .await
            .expect("append succeeds");
        assert_eq!(result.last_active_date(), now);
    }

    #[tokio::test]
    async fn a_failed_log_write_does_not_fail_the_append() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap();
        let user = author("alice", "");
        let identity = Identity::new(user.id(), user.username().clone());

        let mut users = MockUserRepository::new();
        let stored_user = user.clone();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_user.clone())));

        let updated = Discussion::create(payload("d1"), now);
        let mut discussions = MockDiscussionRepository::new();
        let returned = updated.clone();
        discussions
            .expect_append_comment()
            .returning(move |_, _| Ok(Some(returned.clone())));

        let mut comment_log = MockCommentLog::new();
        comment_log
            .expect_record()
            .returning(|_| Err(crate::domain::ports::CommentLogError::unavailable("down")));

        let service = service(discussions, comment_log, users, now);
        service
            .append_comment(
                &identity,
                AppendCommentRequest {
                    discussion_id: DiscussionId::new("d1").expect("valid id"),
                    discussion_name: "Gallery night".to_owned(),
                    text: "hi".to_owned(),
                },
            )
            .await
            .expect("aggregate write already confirmed");
    }

    #[tokio::test]
    async fn appending_to_a_missing_discussion_is_not_found() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap();
        let user = author("alice", "");
        let identity = Identity::new(user.id(), user.username().clone());

        let mut users = MockUserRepository::new();
        let stored_user = user.clone();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_user.clone())));

        let mut discussions = MockDiscussionRepository::new();
        discussions
            .expect_append_comment()
            .with(eq(DiscussionId::new("ghost").expect("valid id")), mockall::predicate::always())
            .returning(|_, _| Ok(None));

        let service = service(discussions, MockCommentLog::new(), users, now);
        let err = service
            .append_comment(
                &identity,
                AppendCommentRequest {
                    discussion_id: DiscussionId::new("ghost").expect("valid id"),
                    discussion_name: "Ghost".to_owned(),
                    text: "hi".to_owned(),
                },
            )
            .await
            .expect_err("missing discussion must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn enrichment_keeps_snapshots_for_deleted_authors() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap();
        let mut discussion = Discussion::create(payload("d1"), now);
        discussion.append(DiscussionComment {
            date: now,
            username: Username::new("ghost").expect("valid username"),
            text: "hi".to_owned(),
            profile_pic_url: "https://example.com/snapshot.png".to_owned(),
        });

        let mut discussions = MockDiscussionRepository::new();
        let stored = discussion.clone();
        discussions
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let service = service(discussions, MockCommentLog::new(), users, now);
        let enriched = service
            .get_enriched(&DiscussionId::new("d1").expect("valid id"))
            .await
            .expect("enrichment succeeds");
        assert_eq!(
            enriched.comments()[0].profile_pic_url,
            "https://example.com/snapshot.png"
        );
    }
}
