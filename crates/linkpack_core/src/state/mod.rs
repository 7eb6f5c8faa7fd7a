//! In-memory application state over the latest snapshot.
//!
//! # Responsibility
//! - Hold the authoritative group list delivered by store subscriptions.
//! - Derive the visible view: filter, favorite-first sort, pagination.
//!
//! # Invariants
//! - All derivations are linear scans; the snapshot is never mutated by a
//!   view query.
//! - Filter changes always reset pagination to the first page.

pub mod board;
pub mod filter;

pub use board::{LinkBoard, DEFAULT_PAGE_SIZE};
pub use filter::{file_type_of, GroupFilter};
