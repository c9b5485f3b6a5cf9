//! In-process discussion store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{CreateOutcome, DiscussionRepository, DiscussionRepositoryError};
use crate::domain::{Discussion, DiscussionComment, DiscussionId, Page};

/// Discussion repository backed by a process-local map.
///
/// `append_comment` performs its find-and-modify under one write-lock
/// acquisition, which is what serializes concurrent appends to the same
/// discussion.
#[derive(Debug, Default)]
pub struct MemoryDiscussionRepository {
    records: RwLock<HashMap<DiscussionId, Discussion>>,
}

impl MemoryDiscussionRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut HashMap<DiscussionId, Discussion>) -> T,
    ) -> Result<T, DiscussionRepositoryError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| DiscussionRepositoryError::unavailable("discussion store lock poisoned"))?;
        Ok(apply(&mut records))
    }

    fn read<T>(
        &self,
        apply: impl FnOnce(&HashMap<DiscussionId, Discussion>) -> T,
    ) -> Result<T, DiscussionRepositoryError> {
        let records = self
            .records
            .read()
            .map_err(|_| DiscussionRepositoryError::unavailable("discussion store lock poisoned"))?;
        Ok(apply(&records))
    }
}

#[async_trait]
impl DiscussionRepository for MemoryDiscussionRepository {
    async fn insert_if_absent(
        &self,
        discussion: Discussion,
    ) -> Result<CreateOutcome, DiscussionRepositoryError> {
        self.mutate(|records| match records.get(discussion.id()) {
            Some(existing) => CreateOutcome::Existing(existing.clone()),
            None => {
                records.insert(discussion.id().clone(), discussion.clone());
                CreateOutcome::Created(discussion)
            }
        })
    }

    async fn find_by_id(
        &self,
        id: &DiscussionId,
    ) -> Result<Option<Discussion>, DiscussionRepositoryError> {
        self.read(|records| records.get(id).cloned())
    }

    async fn search_by_tags(
        &self,
        tags: &[String],
        limit: usize,
    ) -> Result<Vec<Discussion>, DiscussionRepositoryError> {
        self.read(|records| {
            let mut matches: Vec<Discussion> = records
                .values()
                .filter(|discussion| discussion.matches_any_tag(tags))
                .cloned()
                .collect();
            // Oldest-active first, the inverse of the recency listing.
            matches.sort_by_key(Discussion::last_active_date);
            matches.truncate(limit);
            matches
        })
    }

    async fn list_recent(&self, page: Page) -> Result<Vec<Discussion>, DiscussionRepositoryError> {
        self.read(|records| {
            let mut commented: Vec<Discussion> = records
                .values()
                .filter(|discussion| !discussion.comments().is_empty())
                .cloned()
                .collect();
            commented.sort_by(|a, b| b.last_active_date().cmp(&a.last_active_date()));
            commented
                .into_iter()
                .skip(page.skip())
                .take(page.limit())
                .collect()
        })
    }

    async fn append_comment(
        &self,
        id: &DiscussionId,
        comment: DiscussionComment,
    ) -> Result<Option<Discussion>, DiscussionRepositoryError> {
        self.mutate(|records| {
            records.get_mut(id).map(|discussion| {
                discussion.append(comment);
                discussion.clone()
            })
        })
    }
}
