//! Discussion aggregate: metadata, embedded comment thread, search tags.
//!
//! The aggregate is the authoritative record for its comment thread; the
//! comment log is a derived index and never feeds back into it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::Username;

/// Validation errors returned by [`DiscussionId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscussionValidationError {
    EmptyId,
}

impl fmt::Display for DiscussionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "discussion id must not be empty"),
        }
    }
}

impl std::error::Error for DiscussionValidationError {}

/// Caller-supplied external discussion identifier.
///
/// ## Invariants
/// - Non-empty after trimming; stored trimmed and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiscussionId(String);

impl DiscussionId {
    /// Validate and construct a [`DiscussionId`] from raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DiscussionValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DiscussionValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DiscussionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DiscussionId> for String {
    fn from(value: DiscussionId) -> Self {
        value.0
    }
}

impl TryFrom<String> for DiscussionId {
    type Error = DiscussionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Physical venue attached to a discussion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub area: String,
}

/// One comment embedded in a discussion's thread.
///
/// `profile_pic_url` is a snapshot of the author's picture at post time;
/// read paths re-resolve it against the live profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionComment {
    pub date: DateTime<Utc>,
    #[schema(value_type = String, example = "alice")]
    pub username: Username,
    pub text: String,
    pub profile_pic_url: String,
}

/// Validated payload for discussion creation.
///
/// Field presence is enforced at the inbound boundary; this type only
/// carries values that passed that check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiscussion {
    pub id: DiscussionId,
    pub href: String,
    pub name: String,
    pub venue: Venue,
    pub description: String,
    pub image: String,
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
    pub search_terms: Vec<String>,
}

/// Discussion aggregate.
///
/// ## Invariants
/// - `last_active_date` equals the newest embedded comment date, or the
///   creation time while the thread is empty.
/// - Comments are append-only; there is no edit or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    #[schema(value_type = String, example = "gallery-night-42")]
    id: DiscussionId,
    href: String,
    name: String,
    venue: Venue,
    description: String,
    image: String,
    date_start: DateTime<Utc>,
    date_end: DateTime<Utc>,
    last_active_date: DateTime<Utc>,
    comments: Vec<DiscussionComment>,
    search_terms: Vec<String>,
}

impl Discussion {
    /// Create a discussion with an empty thread, active as of `created_at`.
    pub fn create(payload: NewDiscussion, created_at: DateTime<Utc>) -> Self {
        let NewDiscussion {
            id,
            href,
            name,
            venue,
            description,
            image,
            date_start,
            date_end,
            search_terms,
        } = payload;
        Self {
            id,
            href,
            name,
            venue,
            description,
            image,
            date_start,
            date_end,
            last_active_date: created_at,
            comments: Vec::new(),
            search_terms,
        }
    }

    /// External identifier.
    pub fn id(&self) -> &DiscussionId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Timestamp of the newest comment, or creation time without comments.
    pub fn last_active_date(&self) -> DateTime<Utc> {
        self.last_active_date
    }

    /// Embedded comment thread, oldest first.
    pub fn comments(&self) -> &[DiscussionComment] {
        &self.comments
    }

    /// Attached search tags, matched verbatim.
    pub fn search_terms(&self) -> &[String] {
        &self.search_terms
    }

    /// True when any query tag appears in the discussion's tag set.
    pub fn matches_any_tag(&self, tags: &[String]) -> bool {
        self.search_terms.iter().any(|term| tags.contains(term))
    }

    /// Append a comment, advancing `last_active_date` to the newest comment
    /// timestamp.
    ///
    /// Callers must invoke this inside the repository's conditional update
    /// so concurrent appends to the same discussion serialize.
    pub fn append(&mut self, comment: DiscussionComment) {
        self.last_active_date = self.last_active_date.max(comment.date);
        self.comments.push(comment);
    }

    /// Replace comment picture snapshots using `resolve`, keeping the
    /// snapshot when `resolve` yields `None` for an author.
    pub fn with_live_pictures(mut self, resolve: impl Fn(&Username) -> Option<String>) -> Self {
        for comment in &mut self.comments {
            if let Some(url) = resolve(&comment.username) {
                comment.profile_pic_url = url;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn payload(id: &str, tags: &[&str]) -> NewDiscussion {
        NewDiscussion {
            id: DiscussionId::new(id).expect("valid id"),
            href: "https://example.com/d".to_owned(),
            name: "Gallery night".to_owned(),
            venue: Venue {
                name: "The Annex".to_owned(),
                address: "1 Main St".to_owned(),
                area: "Brooklyn".to_owned(),
            },
            description: "openings".to_owned(),
            image: "https://example.com/d.png".to_owned(),
            date_start: Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
            date_end: Utc.with_ymd_and_hms(2024, 3, 1, 22, 0, 0).unwrap(),
            search_terms: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        }
    }

    fn comment(username: &str, at: DateTime<Utc>) -> DiscussionComment {
        DiscussionComment {
            date: at,
            username: Username::new(username).expect("valid username"),
            text: "hi".to_owned(),
            profile_pic_url: String::new(),
        }
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn blank_ids_are_rejected(#[case] raw: &str) {
        let err = DiscussionId::new(raw).expect_err("blank id must fail");
        assert_eq!(err, DiscussionValidationError::EmptyId);
    }

    #[test]
    fn creation_initializes_last_active_from_creation_time() {
        let created_at = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        let discussion = Discussion::create(payload("d1", &["a"]), created_at);
        assert_eq!(discussion.last_active_date(), created_at);
        assert!(discussion.comments().is_empty());
    }

    #[test]
    fn append_advances_last_active_to_the_comment_timestamp() {
        let created_at = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        let posted_at = Utc.with_ymd_and_hms(2024, 2, 2, 10, 30, 0).unwrap();
        let mut discussion = Discussion::create(payload("d1", &[]), created_at);

        discussion.append(comment("alice", posted_at));

        assert_eq!(discussion.last_active_date(), posted_at);
        assert_eq!(discussion.comments().len(), 1);
    }

    #[rstest]
    #[case(&["a"], true)]
    #[case(&["b"], true)]
    #[case(&["c"], false)]
    #[case(&["A"], false)]
    fn tag_matching_is_exact_membership(#[case] query: &[&str], #[case] expected: bool) {
        let discussion = Discussion::create(payload("d1", &["a", "b"]), Utc::now());
        let query: Vec<String> = query.iter().map(|tag| (*tag).to_owned()).collect();
        assert_eq!(discussion.matches_any_tag(&query), expected);
    }

    #[test]
    fn live_picture_resolution_keeps_snapshots_for_unknown_authors() {
        let at = Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap();
        let mut discussion = Discussion::create(payload("d1", &[]), at);
        let mut gone = comment("ghost", at);
        gone.profile_pic_url = "https://example.com/old.png".to_owned();
        discussion.append(gone);
        discussion.append(comment("alice", at));

        let enriched = discussion.with_live_pictures(|username| {
            (username.as_str() == "alice").then(|| "https://example.com/new.png".to_owned())
        });

        assert_eq!(enriched.comments()[0].profile_pic_url, "https://example.com/old.png");
        assert_eq!(enriched.comments()[1].profile_pic_url, "https://example.com/new.png");
    }
}
