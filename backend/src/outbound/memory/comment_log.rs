//! In-process append-only comment log.

use std::collections::BTreeSet;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{CommentLog, CommentLogError};
use crate::domain::{CommentLogEntry, Page, Username};

/// Comment log backed by a process-local vector.
#[derive(Debug, Default)]
pub struct MemoryCommentLog {
    entries: RwLock<Vec<CommentLogEntry>>,
}

impl MemoryCommentLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentLog for MemoryCommentLog {
    async fn record(&self, entry: CommentLogEntry) -> Result<(), CommentLogError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CommentLogError::unavailable("comment log lock poisoned"))?;
        entries.push(entry);
        Ok(())
    }

    async fn list_by_authors(
        &self,
        authors: &BTreeSet<Username>,
        page: Page,
    ) -> Result<Vec<CommentLogEntry>, CommentLogError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CommentLogError::unavailable("comment log lock poisoned"))?;
        let mut matches: Vec<CommentLogEntry> = entries
            .iter()
            .filter(|entry| authors.contains(&entry.username))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matches
            .into_iter()
            .skip(page.skip())
            .take(page.limit())
            .collect())
    }
}
