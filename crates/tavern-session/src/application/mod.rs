//! Application layer: the local participant context, derived views, and
//! the snapshot persistence contract.

pub mod client;
pub mod store;
pub mod views;
