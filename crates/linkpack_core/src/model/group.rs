//! Link group domain model.
//!
//! # Responsibility
//! - Define the canonical link/collection records shared by store and state.
//! - Provide creation-time validation and tag normalization helpers.
//!
//! # Invariants
//! - `id` is stable and never reused for another group.
//! - A valid group has a non-empty trimmed title and at least one link with a
//!   non-empty URL.
//! - Tags are trimmed and deduplicated case-sensitively, insertion order
//!   preserved.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a link group.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type GroupId = Uuid;

/// One saved link inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Stable per-link id, used as a form row key by callers.
    pub id: Uuid,
    /// Destination URL. Non-empty for persisted links.
    pub url: String,
    /// Optional free-text description. Empty string when absent.
    #[serde(default)]
    pub description: String,
}

impl Link {
    /// Creates a link with a generated stable id.
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            description: description.into(),
        }
    }
}

/// A user-named collection of links.
///
/// Serialized field names are camelCase to match the external document
/// schema (`createdAt`, `isFavorite`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkGroup {
    /// Stable global id used for replacement, deletion and snapshot joins.
    pub id: GroupId,
    /// User-facing collection title.
    pub title: String,
    /// Ordered link sequence. Never empty for a valid group.
    pub links: Vec<Link>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Free-text labels used for filtering. Deduplicated case-sensitively.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Promotes the group to the top of the default sort order.
    #[serde(default)]
    pub is_favorite: bool,
}

/// Validation failure for group creation/replacement input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// No link with a non-empty URL remains after dropping blank rows.
    NoUsableLinks,
}

impl Display for GroupValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "group title is required"),
            Self::NoUsableLinks => write!(f, "at least one link with a URL is required"),
        }
    }
}

impl Error for GroupValidationError {}

impl LinkGroup {
    /// Creates a group with a generated id and the given creation timestamp.
    ///
    /// # Invariants
    /// - Tags are normalized via [`normalize_tags`].
    /// - This constructor does not validate; call [`LinkGroup::validate`]
    ///   before persisting.
    pub fn new(title: impl Into<String>, links: Vec<Link>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            links,
            created_at,
            tags: Vec::new(),
            is_favorite: false,
        }
    }

    /// Replaces the tag set, applying trim + case-sensitive deduplication.
    pub fn set_tags(&mut self, tags: &[String]) {
        self.tags = normalize_tags(tags);
    }

    /// Flips the favorite flag in place.
    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }

    /// Returns whether the group carries the exact tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Checks creation-time invariants.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty.
    /// - `NoUsableLinks` when no link has a non-empty URL.
    pub fn validate(&self) -> Result<(), GroupValidationError> {
        if self.title.trim().is_empty() {
            return Err(GroupValidationError::EmptyTitle);
        }
        if !self.links.iter().any(|link| !link.url.trim().is_empty()) {
            return Err(GroupValidationError::NoUsableLinks);
        }
        Ok(())
    }
}

/// Normalizes one tag value: trims whitespace, rejects blanks.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trims and deduplicates tags case-sensitively, preserving insertion order.
///
/// Case matters: `Work` and `work` are distinct tags.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
    }
    unique
}
