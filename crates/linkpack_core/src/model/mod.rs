//! Domain model for link collections.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one group-centric shape shared by store, state and services.
//!
//! # Invariants
//! - Every domain object is identified by a stable `GroupId`.
//! - Deletion is a hard delete; the backing store keeps no tombstones.

pub mod group;
