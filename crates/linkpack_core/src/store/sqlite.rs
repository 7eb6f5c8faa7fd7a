//! SQLite-backed document store.
//!
//! # Responsibility
//! - Persist JSON record bodies in the `documents` table.
//! - Fan snapshots out to registered subscribers after every mutation.
//!
//! # Invariants
//! - Record ids are generated v4 UUIDs and never reused.
//! - Snapshot delivery failures are logged per subscriber and never fail the
//!   mutation that triggered them.

use crate::db::{open_db, open_db_in_memory};
use crate::store::document::{
    sort_snapshot, DocumentRecord, DocumentStore, SnapshotFn, SubscriptionId,
};
use crate::store::{StoreError, StoreResult};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use uuid::Uuid;

struct Subscriber {
    id: SubscriptionId,
    collection: String,
    ordering_field: String,
    callback: SnapshotFn,
}

/// Document store persisting into SQLite.
pub struct SqliteDocumentStore {
    conn: Connection,
    subscribers: Vec<Subscriber>,
    next_subscription_id: SubscriptionId,
}

impl SqliteDocumentStore {
    /// Opens a file-backed store with migrations applied.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens an in-memory store, mainly for tests and probes.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            subscribers: Vec::new(),
            next_subscription_id: 1,
        }
    }

    /// Loads the current ordered record set for one collection.
    pub fn snapshot(
        &self,
        collection: &str,
        ordering_field: &str,
    ) -> StoreResult<Vec<DocumentRecord>> {
        load_snapshot(&self.conn, collection, ordering_field)
    }

    /// Returns one record body, mainly for probes and tests.
    pub fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let body_text: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2;",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        match body_text {
            Some(text) => Ok(Some(parse_body(collection, id, &text)?)),
            None => Ok(None),
        }
    }

    fn notify_collection(&mut self, collection: &str) {
        let conn = &self.conn;
        for subscriber in self
            .subscribers
            .iter_mut()
            .filter(|subscriber| subscriber.collection == collection)
        {
            match load_snapshot(conn, collection, &subscriber.ordering_field) {
                Ok(records) => (subscriber.callback)(&records),
                Err(err) => warn!(
                    "event=snapshot_deliver module=store status=error collection={collection} subscription_id={} error={err}",
                    subscriber.id
                ),
            }
        }
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn create(&mut self, collection: &str, body: &Value) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        let body_text = serde_json::to_string(body)?;
        self.conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3);",
            params![collection, id, body_text],
        )?;

        self.notify_collection(collection);
        Ok(id)
    }

    fn replace(&mut self, collection: &str, id: &str, body: &Value) -> StoreResult<()> {
        let body_text = serde_json::to_string(body)?;
        let changed = self.conn.execute(
            "UPDATE documents SET body = ?3 WHERE collection = ?1 AND id = ?2;",
            params![collection, id, body_text],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        self.notify_collection(collection);
        Ok(())
    }

    fn delete(&mut self, collection: &str, id: &str) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2;",
            params![collection, id],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        self.notify_collection(collection);
        Ok(())
    }

    fn subscribe(
        &mut self,
        collection: &str,
        ordering_field: &str,
        mut callback: SnapshotFn,
    ) -> StoreResult<SubscriptionId> {
        // Initial delivery happens before registration so a failing first
        // load surfaces to the caller instead of being logged away.
        let records = load_snapshot(&self.conn, collection, ordering_field)?;
        callback(&records);

        let id = self.next_subscription_id;
        self.next_subscription_id += 1;
        self.subscribers.push(Subscriber {
            id,
            collection: collection.to_string(),
            ordering_field: ordering_field.to_string(),
            callback,
        });
        Ok(id)
    }

    fn unsubscribe(&mut self, subscription_id: SubscriptionId) {
        self.subscribers
            .retain(|subscriber| subscriber.id != subscription_id);
    }
}

fn load_snapshot(
    conn: &Connection,
    collection: &str,
    ordering_field: &str,
) -> StoreResult<Vec<DocumentRecord>> {
    let mut stmt =
        conn.prepare("SELECT id, body FROM documents WHERE collection = ?1 ORDER BY id ASC;")?;
    let mut rows = stmt.query([collection])?;

    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let id: String = row.get("id")?;
        let body_text: String = row.get("body")?;
        let body = parse_body(collection, &id, &body_text)?;
        records.push(DocumentRecord { id, body });
    }

    sort_snapshot(&mut records, ordering_field);
    Ok(records)
}

fn parse_body(collection: &str, id: &str, body_text: &str) -> StoreResult<Value> {
    serde_json::from_str(body_text).map_err(|err| {
        StoreError::InvalidData(format!(
            "unparseable body for {collection}/{id}: {err}"
        ))
    })
}
