//! Port abstraction for the append-only comment log.

use std::collections::BTreeSet;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::comment_log::CommentLogEntry;
use crate::domain::page::Page;
use crate::domain::user::Username;

define_port_error! {
    /// Persistence errors raised by comment log adapters.
    pub enum CommentLogError {
        /// Backing store unreachable or not responding.
        Unavailable { message: String } =>
            "comment log unavailable: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "comment log query failed: {message}",
    }
}

/// Port for the secondary comment index.
///
/// Entries are only ever appended; there is no update or delete. The log is
/// derived from confirmed discussion writes and may lag behind them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentLog: Send + Sync {
    /// Append one entry.
    async fn record(&self, entry: CommentLogEntry) -> Result<(), CommentLogError>;

    /// Entries whose author is in `authors`, ordered by post date
    /// descending, windowed by `page`.
    async fn list_by_authors(
        &self,
        authors: &BTreeSet<Username>,
        page: Page,
    ) -> Result<Vec<CommentLogEntry>, CommentLogError>;
}
