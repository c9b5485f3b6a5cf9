//! Driving port for discussion use-cases.

use async_trait::async_trait;

use crate::domain::auth::Identity;
use crate::domain::discussion::{Discussion, DiscussionId, NewDiscussion};
use crate::domain::page::Page;
use crate::domain::Error;

/// Validated comment-append payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendCommentRequest {
    /// External identifier of the target discussion.
    pub discussion_id: DiscussionId,
    /// Display name echoed into the comment log back-reference.
    pub discussion_name: String,
    /// Comment body.
    pub text: String,
}

/// Domain use-case port over discussion aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscussionStore: Send + Sync {
    /// Idempotent creation keyed by external identifier. Returns the stored
    /// discussion and whether this call created it.
    async fn create_or_get(&self, payload: NewDiscussion) -> Result<(Discussion, bool), Error>;

    /// Discussions whose tag set intersects `tags`, oldest-active first,
    /// capped at `limit`.
    async fn search(&self, tags: &[String], limit: usize) -> Result<Vec<Discussion>, Error>;

    /// Commented discussions, most recently active first, windowed by
    /// `page`.
    async fn list_recent(&self, page: Page) -> Result<Vec<Discussion>, Error>;

    /// One discussion with comment pictures re-resolved against live
    /// profiles.
    async fn get_enriched(&self, id: &DiscussionId) -> Result<Discussion, Error>;

    /// Append a comment as `identity`, then record it in the comment log.
    /// Fails with NotFound when the discussion does not exist.
    async fn append_comment(
        &self,
        identity: &Identity,
        request: AppendCommentRequest,
    ) -> Result<Discussion, Error>;
}
