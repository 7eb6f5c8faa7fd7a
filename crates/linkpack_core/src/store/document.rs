//! Document store contract.
//!
//! # Responsibility
//! - Define the collaborator interface the application persists through:
//!   create, replace, delete, and push-style subscription.
//!
//! # Invariants
//! - `create` generates the record id; callers never supply one.
//! - Every mutation in a collection re-delivers the full ordered record set
//!   to each subscriber of that collection (last-write-wins, no merge).
//! - Snapshot order is descending by the numeric ordering field, id ascending
//!   among ties.

use crate::store::StoreResult;
use serde_json::Value;

/// Opaque handle for an active subscription.
pub type SubscriptionId = u64;

/// Callback receiving the full current record set on every change.
pub type SnapshotFn = Box<dyn FnMut(&[DocumentRecord])>;

/// One record in a snapshot: generated id plus the stored JSON body.
///
/// The id lives alongside the body rather than inside it; consumers that
/// need it inline re-attach it during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub id: String,
    pub body: Value,
}

/// Store collaborator interface.
///
/// Mutations take `&mut self`: the application is single-threaded and
/// event-driven, and subscriber fan-out happens synchronously inside each
/// mutating call.
pub trait DocumentStore {
    /// Persists a new record and returns its generated id.
    fn create(&mut self, collection: &str, body: &Value) -> StoreResult<String>;

    /// Replaces an existing record body in full.
    ///
    /// # Errors
    /// - `NotFound` when no record with this id exists in the collection.
    fn replace(&mut self, collection: &str, id: &str, body: &Value) -> StoreResult<()>;

    /// Deletes a record.
    ///
    /// # Errors
    /// - `NotFound` when no record with this id exists in the collection.
    fn delete(&mut self, collection: &str, id: &str) -> StoreResult<()>;

    /// Registers a snapshot observer for one collection.
    ///
    /// The callback fires once immediately with the current record set, then
    /// after every subsequent mutation in the collection, until the returned
    /// id is passed to [`DocumentStore::unsubscribe`]. Records are ordered
    /// descending by the numeric `ordering_field` in the body; records where
    /// the field is missing or non-numeric sort as 0.
    fn subscribe(
        &mut self,
        collection: &str,
        ordering_field: &str,
        callback: SnapshotFn,
    ) -> StoreResult<SubscriptionId>;

    /// Removes a subscription. Unknown ids are ignored.
    fn unsubscribe(&mut self, subscription_id: SubscriptionId);
}

/// Extracts the snapshot ordering key from a record body.
///
/// Integer values are used directly; float values are truncated. Anything
/// else sorts as 0.
pub fn ordering_key(body: &Value, ordering_field: &str) -> i64 {
    match body.get(ordering_field) {
        Some(value) => value
            .as_i64()
            .or_else(|| value.as_f64().map(|float| float as i64))
            .unwrap_or(0),
        None => 0,
    }
}

/// Sorts snapshot records descending by ordering key, id ascending for ties.
pub fn sort_snapshot(records: &mut [DocumentRecord], ordering_field: &str) {
    records.sort_by(|a, b| {
        ordering_key(&b.body, ordering_field)
            .cmp(&ordering_key(&a.body, ordering_field))
            .then_with(|| a.id.cmp(&b.id))
    });
}
