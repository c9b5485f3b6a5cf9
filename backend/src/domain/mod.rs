//! Domain primitives, aggregates, services, and ports.
//!
//! Purpose: define strongly typed domain entities used by the inbound and
//! outbound layers, the use-case services over them, and the ports at the
//! hexagon's edges. Types stay immutable where practical; invariants and
//! serialisation contracts (serde) are documented on each type.

pub mod auth;
pub mod comment_log;
mod deadline;
pub mod discussion;
pub mod error;
pub mod page;
pub mod ports;
pub mod user;

mod auth_service;
mod directory_service;
mod discussion_service;
mod feed_service;
mod search_service;

pub use self::auth::{Credentials, CredentialsValidationError, Identity};
pub use self::auth_service::AuthService;
pub use self::comment_log::{CommentLogEntry, DiscussionRef};
pub use self::directory_service::DirectoryService;
pub use self::discussion::{
    Discussion, DiscussionComment, DiscussionId, DiscussionValidationError, NewDiscussion, Venue,
};
pub use self::discussion_service::DiscussionService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed_service::FeedService;
pub use self::page::{Page, PageQuery};
pub use self::search_service::TagSearchService;
pub use self::user::{
    PasswordHash, ProfileChanges, PublicProfile, User, UserId, UserValidationError, Username,
};
