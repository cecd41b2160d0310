//! Domain model for the estimation session.

pub mod card;
pub mod character;
pub mod chat;
pub mod ledger;
pub mod participant;
pub mod phase;
pub mod session;
pub mod story;
