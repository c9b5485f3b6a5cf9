//! Driving port for tag search over discussions.

use async_trait::async_trait;

use crate::domain::discussion::Discussion;
use crate::domain::Error;

/// Thin query surface over the discussion store's tag sets.
///
/// Tags are caller-supplied opaque strings matched by exact membership; no
/// normalization, stemming, or case folding happens here.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Discussions carrying at least one of `tags`.
    async fn by_any_tag(&self, tags: &[String], limit: usize) -> Result<Vec<Discussion>, Error>;
}
