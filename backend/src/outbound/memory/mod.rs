//! Process-local persistence adapters.
//!
//! These satisfy the repository ports with an ordered, queryable,
//! atomically-updatable in-memory store. Each mutation runs its whole
//! find-and-modify under one lock acquisition.

mod comment_log;
mod discussions;
mod users;

pub use comment_log::MemoryCommentLog;
pub use discussions::MemoryDiscussionRepository;
pub use users::MemoryUserRepository;
