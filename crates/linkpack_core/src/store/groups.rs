//! Typed group adapter over the document store.
//!
//! # Responsibility
//! - Pin the collection name and ordering field used for link groups.
//! - Encode/decode `LinkGroup` bodies at the store boundary.
//!
//! # Invariants
//! - Snapshot decoding re-attaches the record id into the body before
//!   deserializing, so the store id always wins over any stale inline id.
//! - Records that fail to decode are logged and skipped; one bad record
//!   never suppresses the rest of the snapshot.

use crate::model::group::LinkGroup;
use crate::store::document::{DocumentRecord, DocumentStore, SubscriptionId};
use crate::store::StoreResult;
use log::warn;
use serde_json::Value;
use uuid::Uuid;

/// Collection name holding link groups.
pub const GROUPS_COLLECTION: &str = "linkGroups";
/// Body field snapshots are ordered by (descending).
pub const GROUPS_ORDERING_FIELD: &str = "createdAt";

/// Typed facade pinning group persistence to one collection.
pub struct GroupStore<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> GroupStore<S> {
    /// Wraps a document store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists a new group and returns its store-generated id.
    ///
    /// The store id is authoritative; the next snapshot carries it back.
    pub fn create_group(&mut self, group: &LinkGroup) -> StoreResult<String> {
        let body = serde_json::to_value(group)?;
        self.store.create(GROUPS_COLLECTION, &body)
    }

    /// Replaces a group record in full (edit-and-resubmit, favorite toggle).
    pub fn replace_group(&mut self, group: &LinkGroup) -> StoreResult<()> {
        let body = serde_json::to_value(group)?;
        self.store
            .replace(GROUPS_COLLECTION, &group.id.to_string(), &body)
    }

    /// Deletes a group record.
    pub fn delete_group(&mut self, id: &Uuid) -> StoreResult<()> {
        self.store.delete(GROUPS_COLLECTION, &id.to_string())
    }

    /// Registers a snapshot observer receiving decoded groups.
    ///
    /// Delivery order matches the store snapshot: newest `createdAt` first.
    pub fn subscribe(
        &mut self,
        mut on_update: impl FnMut(Vec<LinkGroup>) + 'static,
    ) -> StoreResult<SubscriptionId> {
        self.store.subscribe(
            GROUPS_COLLECTION,
            GROUPS_ORDERING_FIELD,
            Box::new(move |records| on_update(decode_snapshot(records))),
        )
    }

    /// Removes a snapshot observer.
    pub fn unsubscribe(&mut self, subscription_id: SubscriptionId) {
        self.store.unsubscribe(subscription_id);
    }

    /// Returns the wrapped store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

fn decode_snapshot(records: &[DocumentRecord]) -> Vec<LinkGroup> {
    let mut groups = Vec::with_capacity(records.len());
    for record in records {
        match decode_group(record) {
            Ok(group) => groups.push(group),
            Err(err) => warn!(
                "event=snapshot_decode module=store status=error collection={GROUPS_COLLECTION} id={} error={err}",
                record.id
            ),
        }
    }
    groups
}

fn decode_group(record: &DocumentRecord) -> Result<LinkGroup, serde_json::Error> {
    let mut body = record.body.clone();
    if let Some(map) = body.as_object_mut() {
        map.insert("id".to_string(), Value::String(record.id.clone()));
    }
    serde_json::from_value(body)
}
