//! Shared test mocks and utilities for the Poker Tavern engine.

mod clock;
mod fixtures;

pub use clock::FixedClock;
pub use fixtures::{sample_stories, story};
