//! Tag search domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::discussion::Discussion;
use crate::domain::ports::{DiscussionStore, SearchIndex};
use crate::domain::Error;

/// Thin search surface delegating to the discussion store.
#[derive(Clone)]
pub struct TagSearchService {
    discussions: Arc<dyn DiscussionStore>,
}

impl TagSearchService {
    /// Create a new search surface over the store.
    pub fn new(discussions: Arc<dyn DiscussionStore>) -> Self {
        Self { discussions }
    }
}

#[async_trait]
impl SearchIndex for TagSearchService {
    async fn by_any_tag(&self, tags: &[String], limit: usize) -> Result<Vec<Discussion>, Error> {
        self.discussions.search(tags, limit).await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockDiscussionStore;

    #[tokio::test]
    async fn delegates_to_the_store_verbatim() {
        let mut store = MockDiscussionStore::new();
        store
            .expect_search()
            .withf(|tags, limit| tags == ["picasso".to_owned()] && *limit == 10)
            .returning(|_, _| Ok(Vec::new()));

        let search = TagSearchService::new(Arc::new(store));
        let found = search
            .by_any_tag(&["picasso".to_owned()], 10)
            .await
            .expect("search succeeds");
        assert!(found.is_empty());
    }
}
