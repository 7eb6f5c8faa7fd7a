//! Use-case services over store adapters.
//!
//! # Responsibility
//! - Turn form drafts into validated groups and drive store persistence.
//! - Apply the store error policy: log and swallow, never propagate.
//!
//! # Invariants
//! - Validation failures are returned to the caller; store failures are not.
//! - Services never bypass model validation before persisting.

pub mod group_service;

pub use group_service::{now_epoch_ms, GroupDraft, GroupService, LinkDraft};
