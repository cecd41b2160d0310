//! Poker Tavern — JSON file snapshot persistence.
//!
//! File-backed implementation of the `SnapshotStore` contract: one record
//! per device for the session snapshot, plus one standalone record for the
//! participant identity.

mod json_store;

pub use json_store::JsonFileStore;
