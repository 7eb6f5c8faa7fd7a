//! Group use-case service.
//!
//! # Responsibility
//! - Build validated groups from form drafts (blank link rows dropped,
//!   tags deduplicated, creation timestamp stamped).
//! - Persist create/replace/delete/toggle-favorite through the group store.
//!
//! # Invariants
//! - Store failures are caught, logged and swallowed; the caller only learns
//!   whether persistence happened. No retry, no rollback.
//! - Validation failures are returned: the form surfaces them to the user.

use crate::model::group::{GroupId, GroupValidationError, Link, LinkGroup};
use crate::store::document::{DocumentStore, SubscriptionId};
use crate::store::groups::GroupStore;
use crate::store::StoreResult;
use log::{error, info};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// One link row as entered in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDraft {
    pub url: String,
    pub description: String,
}

/// Form input for creating or resubmitting a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDraft {
    pub title: String,
    pub links: Vec<LinkDraft>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
}

impl GroupDraft {
    /// Builds a validated group from this draft.
    ///
    /// Link rows with a blank URL are dropped before validation, matching
    /// form submission behavior.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty.
    /// - `NoUsableLinks` when no non-blank link row remains.
    pub fn into_group(self, created_at: i64) -> Result<LinkGroup, GroupValidationError> {
        let links: Vec<Link> = self
            .links
            .into_iter()
            .filter(|draft| !draft.url.trim().is_empty())
            .map(|draft| Link {
                id: Uuid::new_v4(),
                url: draft.url,
                description: draft.description,
            })
            .collect();

        let mut group = LinkGroup::new(self.title.trim().to_string(), links, created_at);
        group.set_tags(&self.tags);
        group.is_favorite = self.is_favorite;
        group.validate()?;
        Ok(group)
    }
}

/// Use-case facade wiring drafts and persistence.
pub struct GroupService<S: DocumentStore> {
    groups: GroupStore<S>,
}

impl<S: DocumentStore> GroupService<S> {
    /// Creates a service over a document store.
    pub fn new(store: S) -> Self {
        Self {
            groups: GroupStore::new(store),
        }
    }

    /// Validates a draft and persists the new group.
    ///
    /// Returns the store-generated id, or `None` when persistence failed
    /// (the failure is logged, not propagated).
    ///
    /// # Errors
    /// - Validation failures from [`GroupDraft::into_group`].
    pub fn create_group(
        &mut self,
        draft: GroupDraft,
    ) -> Result<Option<String>, GroupValidationError> {
        let group = draft.into_group(now_epoch_ms())?;

        match self.groups.create_group(&group) {
            Ok(id) => {
                info!("event=group_create module=service status=ok group_id={id}");
                Ok(Some(id))
            }
            Err(err) => {
                error!("event=group_create module=service status=error error={err}");
                Ok(None)
            }
        }
    }

    /// Persists a full-group replacement (edit-and-resubmit).
    ///
    /// Returns whether persistence happened.
    ///
    /// # Errors
    /// - Validation failures; the edited group must still be valid.
    pub fn update_group(&mut self, group: &LinkGroup) -> Result<bool, GroupValidationError> {
        group.validate()?;

        match self.groups.replace_group(group) {
            Ok(()) => {
                info!(
                    "event=group_update module=service status=ok group_id={}",
                    group.id
                );
                Ok(true)
            }
            Err(err) => {
                error!(
                    "event=group_update module=service status=error group_id={} error={err}",
                    group.id
                );
                Ok(false)
            }
        }
    }

    /// Deletes a group. Returns whether persistence happened.
    pub fn delete_group(&mut self, id: &GroupId) -> bool {
        match self.groups.delete_group(id) {
            Ok(()) => {
                info!("event=group_delete module=service status=ok group_id={id}");
                true
            }
            Err(err) => {
                error!("event=group_delete module=service status=error group_id={id} error={err}");
                false
            }
        }
    }

    /// Persists a favorite flip as a full-record replacement.
    ///
    /// Returns whether persistence happened.
    pub fn toggle_favorite(&mut self, group: &LinkGroup) -> bool {
        let mut flipped = group.clone();
        flipped.toggle_favorite();

        match self.groups.replace_group(&flipped) {
            Ok(()) => {
                info!(
                    "event=group_favorite module=service status=ok group_id={} is_favorite={}",
                    flipped.id, flipped.is_favorite
                );
                true
            }
            Err(err) => {
                error!(
                    "event=group_favorite module=service status=error group_id={} error={err}",
                    flipped.id
                );
                false
            }
        }
    }

    /// Registers a snapshot observer receiving decoded groups.
    ///
    /// # Errors
    /// - Store failures loading the initial snapshot.
    pub fn subscribe(
        &mut self,
        on_update: impl FnMut(Vec<LinkGroup>) + 'static,
    ) -> StoreResult<SubscriptionId> {
        self.groups.subscribe(on_update)
    }

    /// Removes a snapshot observer.
    pub fn unsubscribe(&mut self, subscription_id: SubscriptionId) {
        self.groups.unsubscribe(subscription_id);
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// A clock before the epoch reads as 0 rather than panicking.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
