//! Poker Tavern API — HTTP surface over the session engine.
//!
//! Exposed as a library so integration tests can build the router
//! in-process.

pub mod error;
pub mod routes;
pub mod state;
