//! Document store adapters.
//!
//! # Responsibility
//! - Define the store collaborator contract (create/replace/delete/subscribe).
//! - Provide the SQLite-backed implementation and the JSON-file variant.
//! - Keep persistence details out of state/service orchestration.
//!
//! # Invariants
//! - Subscribers always receive the full ordered record set, never deltas.
//! - Store APIs return semantic errors (`NotFound`) in addition to transport
//!   errors.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod document;
pub mod groups;
pub mod local;
pub mod sqlite;

pub use document::{DocumentRecord, DocumentStore, SnapshotFn, SubscriptionId};
pub use groups::{GroupStore, GROUPS_COLLECTION, GROUPS_ORDERING_FIELD};
pub use local::LocalStore;
pub use sqlite::SqliteDocumentStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store collaborator failure.
#[derive(Debug)]
pub enum StoreError {
    /// Backing database failure.
    Db(DbError),
    /// Target record does not exist.
    NotFound { collection: String, id: String },
    /// Persisted state that cannot be interpreted.
    InvalidData(String),
    /// Filesystem failure from the file-backed variant.
    Io(std::io::Error),
    /// JSON encode/decode failure.
    Json(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => {
                write!(f, "record not found: {collection}/{id}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted record: {message}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
