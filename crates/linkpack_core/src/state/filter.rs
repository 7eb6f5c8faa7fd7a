//! Group filter predicates.
//!
//! # Responsibility
//! - Combine search/tag/file-type/favorite predicates into one match rule.
//! - Derive a file type from a link URL.
//!
//! # Invariants
//! - A group is visible iff every active predicate matches.
//! - Title search is case-insensitive; tag match is exact (case-sensitive).

use crate::model::group::LinkGroup;
use once_cell::sync::Lazy;
use regex::Regex;

static FILE_EXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.([A-Za-z0-9]{1,8})$").expect("valid extension regex"));

/// Active view filters.
///
/// `None`/`false` fields are inactive and match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    /// Case-insensitive substring match on the group title.
    pub search: Option<String>,
    /// Exact tag match.
    pub tag: Option<String>,
    /// File type any link URL must carry (ASCII case-insensitive).
    pub file_type: Option<String>,
    /// Restrict to favorited groups.
    pub favorites_only: bool,
}

impl GroupFilter {
    /// Returns whether any predicate is active.
    pub fn is_active(&self) -> bool {
        self.search.is_some() || self.tag.is_some() || self.file_type.is_some() || self.favorites_only
    }

    /// Applies all active predicates to one group.
    pub fn matches(&self, group: &LinkGroup) -> bool {
        if let Some(term) = self.search.as_deref() {
            if !group.title.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }

        if let Some(tag) = self.tag.as_deref() {
            if !group.has_tag(tag) {
                return false;
            }
        }

        if let Some(file_type) = self.file_type.as_deref() {
            let wanted = file_type.to_ascii_lowercase();
            let any_link = group
                .links
                .iter()
                .any(|link| file_type_of(&link.url).as_deref() == Some(wanted.as_str()));
            if !any_link {
                return false;
            }
        }

        if self.favorites_only && !group.is_favorite {
            return false;
        }

        true
    }
}

/// Derives a lowercase file type from a URL path extension.
///
/// Query strings and fragments are ignored; a URL without a path (only a
/// host) has no file type, so `https://example.com` never yields `com`.
pub fn file_type_of(url: &str) -> Option<String> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);

    let after_scheme = match without_query.find("://") {
        Some(index) => &without_query[index + 3..],
        None => without_query,
    };
    let path = after_scheme.find('/').map(|index| &after_scheme[index + 1..])?;
    let segment = path.rsplit('/').next().unwrap_or(path);

    FILE_EXT_RE
        .captures(segment)
        .map(|caps| caps[1].to_ascii_lowercase())
}
