//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthGate, DiscussionStore, FeedAggregator, IdentityDirectory, SearchIndex};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential verification use-case.
    pub auth: Arc<dyn AuthGate>,
    /// Account management use-cases.
    pub directory: Arc<dyn IdentityDirectory>,
    /// Discussion use-cases.
    pub discussions: Arc<dyn DiscussionStore>,
    /// Community feed use-case.
    pub feed: Arc<dyn FeedAggregator>,
    /// Tag search use-case.
    pub search: Arc<dyn SearchIndex>,
}

impl HttpState {
    /// Bundle the port implementations handlers depend on.
    pub fn new(
        auth: Arc<dyn AuthGate>,
        directory: Arc<dyn IdentityDirectory>,
        discussions: Arc<dyn DiscussionStore>,
        feed: Arc<dyn FeedAggregator>,
        search: Arc<dyn SearchIndex>,
    ) -> Self {
        Self {
            auth,
            directory,
            discussions,
            feed,
            search,
        }
    }
}
