//! Poker Tavern Core — shared domain abstractions.
//!
//! This crate defines the fundamental types that all other crates depend
//! on. It contains no game logic and no infrastructure code.

pub mod clock;
pub mod error;
