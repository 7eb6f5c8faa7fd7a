//! Core domain logic for LinkPack.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod state;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::group::{GroupId, GroupValidationError, Link, LinkGroup};
pub use service::group_service::{now_epoch_ms, GroupDraft, GroupService, LinkDraft};
pub use state::board::{LinkBoard, DEFAULT_PAGE_SIZE};
pub use state::filter::{file_type_of, GroupFilter};
pub use store::{
    DocumentRecord, DocumentStore, GroupStore, LocalStore, SqliteDocumentStore, StoreError,
    StoreResult, SubscriptionId,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
