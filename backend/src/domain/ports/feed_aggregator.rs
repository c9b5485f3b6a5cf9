//! Driving port for the community feed.

use async_trait::async_trait;

use crate::domain::auth::Identity;
use crate::domain::comment_log::CommentLogEntry;
use crate::domain::page::Page;
use crate::domain::Error;

/// Domain use-case port joining the comment log against live profiles.
#[async_trait]
pub trait FeedAggregator: Send + Sync {
    /// Comments authored by the caller's favorites plus the caller, newest
    /// first, windowed by `page`, with pictures resolved against live
    /// profiles. The author set is recomputed on every call so unfollowing
    /// takes effect on the next query.
    async fn community_feed(
        &self,
        identity: &Identity,
        page: Page,
    ) -> Result<Vec<CommentLogEntry>, Error>;
}
