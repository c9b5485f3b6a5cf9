//! User account model.
//!
//! Usernames are the public identity of an account: favorites, comment
//! attribution, and profile lookups all key on the username string.
//! Deleting an account leaves historical comments attributed to the
//! username, orphaned if the name is later reused.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable account identifier generated at sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique, immutable, case-sensitive account name.
///
/// ## Invariants
/// - Non-empty after trimming; the stored value is the trimmed input.
/// - Compared verbatim; `Alice` and `alice` are distinct accounts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the username as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque one-way credential digest.
///
/// Produced by the password-hasher port; the plaintext never reaches storage
/// and the digest never reaches a serialized response.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an adapter-produced digest string.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Borrow the digest for verification.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Partial profile update; unset fields leave stored values unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub location: Option<String>,
    pub about: Option<String>,
    pub profile_pic_url: Option<String>,
}

/// Account aggregate owned by the identity directory.
///
/// ## Invariants
/// - `username` never changes after creation.
/// - `favorites` is a true set: adding an existing name or removing an
///   absent one are no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password: PasswordHash,
    location: String,
    about: String,
    profile_pic_url: String,
    favorites: BTreeSet<Username>,
}

impl User {
    /// Build a freshly signed-up account.
    pub fn new(id: UserId, username: Username, password: PasswordHash) -> Self {
        Self {
            id,
            username,
            password,
            location: String::new(),
            about: String::new(),
            profile_pic_url: String::new(),
            favorites: BTreeSet::new(),
        }
    }

    /// Stable account identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Public account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored credential digest.
    pub fn password(&self) -> &PasswordHash {
        &self.password
    }

    /// Current profile-picture reference.
    pub fn profile_pic_url(&self) -> &str {
        self.profile_pic_url.as_str()
    }

    /// Followed usernames.
    pub fn favorites(&self) -> &BTreeSet<Username> {
        &self.favorites
    }

    /// Apply a partial profile edit, leaving unset fields untouched.
    pub fn apply(&mut self, changes: &ProfileChanges) {
        if let Some(location) = &changes.location {
            self.location = location.clone();
        }
        if let Some(about) = &changes.about {
            self.about = about.clone();
        }
        if let Some(url) = &changes.profile_pic_url {
            self.profile_pic_url = url.clone();
        }
    }

    /// Add a username to the favorites set. Idempotent; the target account
    /// is not required to exist.
    pub fn add_favorite(&mut self, favorite: Username) {
        self.favorites.insert(favorite);
    }

    /// Remove a username from the favorites set. Idempotent.
    pub fn remove_favorite(&mut self, favorite: &Username) {
        self.favorites.remove(favorite);
    }

    /// Outward representation; never carries the credential digest.
    pub fn public_profile(&self) -> PublicProfile {
        PublicProfile {
            username: self.username.clone(),
            location: self.location.clone(),
            about: self.about.clone(),
            profile_pic_url: self.profile_pic_url.clone(),
            favorites: self.favorites.iter().cloned().collect(),
        }
    }
}

/// Public view of an account returned by the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    #[schema(value_type = String, example = "alice")]
    pub username: Username,
    #[schema(example = "Brooklyn")]
    pub location: String,
    #[schema(example = "Painter and printmaker")]
    pub about: String,
    #[schema(example = "https://example.com/alice.png")]
    pub profile_pic_url: String,
    #[schema(value_type = Vec<String>)]
    pub favorites: Vec<Username>,
}
