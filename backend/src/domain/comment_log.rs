//! Secondary comment log records.
//!
//! One entry per embedded-comment append, denormalized so feeds can be
//! computed without scanning every discussion. The discussion aggregate
//! stays authoritative; the log may lag behind it but never leads it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::discussion::DiscussionId;
use crate::domain::user::Username;

/// Back-reference from a log entry to its discussion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionRef {
    #[schema(value_type = String, example = "gallery-night-42")]
    pub id: DiscussionId,
    pub name: String,
}

/// Denormalized copy of one posted comment.
///
/// `profile_pic_url` is the author's picture at post time; feed reads
/// overwrite it with the live value when the author still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentLogEntry {
    #[schema(value_type = String, example = "alice")]
    pub username: Username,
    pub profile_pic_url: String,
    pub date: DateTime<Utc>,
    pub text: String,
    pub discussion: DiscussionRef,
}
