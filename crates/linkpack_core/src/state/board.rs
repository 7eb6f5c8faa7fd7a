//! Link board view state.
//!
//! # Responsibility
//! - Hold the group list plus filter/pagination/editing state.
//! - Translate user interactions into state updates.
//!
//! # Invariants
//! - An incoming snapshot fully replaces local state (last-write-wins).
//! - The visible view is filtered, then favorite-first sorted (stable), then
//!   cut into fixed-size pages with no item duplicated or omitted.
//! - Activating a tag filter clears the search term; re-activating the same
//!   tag deactivates it.

use crate::model::group::{GroupId, LinkGroup};
use crate::state::filter::GroupFilter;
use std::collections::BTreeSet;

/// Groups shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Single-threaded UI state for the collection list.
#[derive(Debug)]
pub struct LinkBoard {
    groups: Vec<LinkGroup>,
    filter: GroupFilter,
    page: usize,
    page_size: usize,
    editing_id: Option<GroupId>,
}

impl Default for LinkBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkBoard {
    /// Creates an empty board with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Creates an empty board with a custom page size (minimum 1).
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            groups: Vec::new(),
            filter: GroupFilter::default(),
            page: 1,
            page_size: page_size.max(1),
            editing_id: None,
        }
    }

    /// Replaces local state with an authoritative snapshot.
    ///
    /// Keeps the current filters, clamps the page into the new range, and
    /// drops the editing marker when its group no longer exists.
    pub fn apply_snapshot(&mut self, groups: Vec<LinkGroup>) {
        self.groups = groups;
        if let Some(editing) = self.editing_id {
            if !self.groups.iter().any(|group| group.id == editing) {
                self.editing_id = None;
            }
        }
        self.clamp_page();
    }

    /// All groups in snapshot order.
    pub fn groups(&self) -> &[LinkGroup] {
        &self.groups
    }

    /// Active filter state.
    pub fn filter(&self) -> &GroupFilter {
        &self.filter
    }

    // Local mutations used by the write-all-on-change variant; the
    // subscription path replaces everything via `apply_snapshot` instead.

    /// Appends a group.
    pub fn add_group(&mut self, group: LinkGroup) {
        self.groups.push(group);
        self.clamp_page();
    }

    /// Replaces a group by id and leaves edit mode.
    pub fn replace_group(&mut self, group: LinkGroup) {
        if let Some(slot) = self.groups.iter_mut().find(|slot| slot.id == group.id) {
            *slot = group;
        }
        self.editing_id = None;
    }

    /// Removes a group by id, clearing the editing marker when it matches.
    pub fn remove_group(&mut self, id: GroupId) {
        self.groups.retain(|group| group.id != id);
        if self.editing_id == Some(id) {
            self.editing_id = None;
        }
        self.clamp_page();
    }

    /// Flips one group's favorite flag in place.
    pub fn toggle_favorite(&mut self, id: GroupId) {
        if let Some(group) = self.groups.iter_mut().find(|group| group.id == id) {
            group.toggle_favorite();
        }
    }

    /// Sets the title search term; blank input clears it.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        let trimmed = term.trim();
        self.filter.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.page = 1;
    }

    /// Toggles a tag filter.
    ///
    /// Clicking the active tag deactivates it; activating a tag clears the
    /// search term.
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.filter.tag.as_deref() == Some(tag) {
            self.filter.tag = None;
        } else {
            self.filter.tag = Some(tag.to_string());
            self.filter.search = None;
        }
        self.page = 1;
    }

    /// Sets or clears the file-type filter.
    pub fn set_file_type(&mut self, file_type: Option<String>) {
        self.filter.file_type = file_type.filter(|value| !value.trim().is_empty());
        self.page = 1;
    }

    /// Toggles the favorites-only filter.
    pub fn toggle_favorites_only(&mut self) {
        self.filter.favorites_only = !self.filter.favorites_only;
        self.page = 1;
    }

    /// Resets every filter and returns to the first page.
    pub fn clear_filters(&mut self) {
        self.filter = GroupFilter::default();
        self.page = 1;
    }

    /// Filtered and favorite-first sorted view, unpaginated.
    ///
    /// The sort is stable: relative snapshot order is preserved within the
    /// favorited and non-favorited partitions.
    pub fn visible(&self) -> Vec<&LinkGroup> {
        let mut view: Vec<&LinkGroup> = self
            .groups
            .iter()
            .filter(|group| self.filter.matches(group))
            .collect();
        view.sort_by_key(|group| !group.is_favorite);
        view
    }

    /// The current fixed-size page of the visible view.
    pub fn visible_page(&self) -> Vec<&LinkGroup> {
        self.visible()
            .into_iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// Current 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Configured page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages in the visible view; at least 1 even when empty.
    pub fn page_count(&self) -> usize {
        self.visible().len().div_ceil(self.page_size).max(1)
    }

    /// Moves to a page, clamped into `1..=page_count()`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    /// Unique tags across all groups, sorted ascending.
    pub fn all_tags(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self
            .groups
            .iter()
            .flat_map(|group| group.tags.iter().map(String::as_str))
            .collect();
        unique.into_iter().map(str::to_string).collect()
    }

    /// Number of favorited groups, ignoring active filters.
    pub fn favorites_count(&self) -> usize {
        self.groups.iter().filter(|group| group.is_favorite).count()
    }

    /// Marks a group as being edited.
    pub fn start_editing(&mut self, id: GroupId) {
        self.editing_id = Some(id);
    }

    /// Leaves edit mode.
    pub fn cancel_editing(&mut self) {
        self.editing_id = None;
    }

    /// The group currently being edited, if any.
    pub fn editing_id(&self) -> Option<GroupId> {
        self.editing_id
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.page_count());
    }
}
