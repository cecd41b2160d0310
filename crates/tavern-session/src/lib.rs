//! Poker Tavern — session and voting state machine.
//!
//! Responsible for the vote ledger, session completion and reveal rules,
//! story navigation, the local participant context, and the snapshot
//! persistence contract.

pub mod application;
pub mod domain;

#[cfg(test)]
pub(crate) mod testing;
