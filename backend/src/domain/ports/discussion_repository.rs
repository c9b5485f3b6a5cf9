//! Port abstraction for discussion persistence adapters and their errors.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::discussion::{Discussion, DiscussionComment, DiscussionId};
use crate::domain::page::Page;

define_port_error! {
    /// Persistence errors raised by discussion repository adapters.
    pub enum DiscussionRepositoryError {
        /// Backing store unreachable or not responding.
        Unavailable { message: String } =>
            "discussion repository unavailable: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "discussion repository query failed: {message}",
    }
}

/// Result of an idempotent insert keyed by external identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// No record existed; the supplied discussion was stored.
    Created(Discussion),
    /// A record with the identifier already existed and is returned
    /// unchanged.
    Existing(Discussion),
}

/// Port for storing discussion aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscussionRepository: Send + Sync {
    /// Store the discussion unless its external identifier is taken; in
    /// that case return the existing record unchanged.
    async fn insert_if_absent(
        &self,
        discussion: Discussion,
    ) -> Result<CreateOutcome, DiscussionRepositoryError>;

    /// Fetch a discussion by external identifier.
    async fn find_by_id(
        &self,
        id: &DiscussionId,
    ) -> Result<Option<Discussion>, DiscussionRepositoryError>;

    /// Discussions whose tag set intersects `tags`, ordered by
    /// `lastActiveDate` ascending (oldest-active first), capped at `limit`.
    async fn search_by_tags(
        &self,
        tags: &[String],
        limit: usize,
    ) -> Result<Vec<Discussion>, DiscussionRepositoryError>;

    /// Discussions with at least one comment, ordered by `lastActiveDate`
    /// descending, windowed by `page`.
    async fn list_recent(&self, page: Page) -> Result<Vec<Discussion>, DiscussionRepositoryError>;

    /// Atomic conditional update: locate the discussion by identifier and
    /// append `comment` (advancing `lastActiveDate`) in one step, returning
    /// the updated record. Returns `None` when no record matches.
    async fn append_comment(
        &self,
        id: &DiscussionId,
        comment: DiscussionComment,
    ) -> Result<Option<Discussion>, DiscussionRepositoryError>;
}
