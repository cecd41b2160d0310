//! Participants at the table.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::card::CardValue;
use super::character::CharacterClass;

/// A participant as seen in the roster.
///
/// `vote` and `has_voted` are derived from the vote ledger for whichever
/// story is currently displayed; the ledger, not this record, is the
/// authoritative source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Stable identifier, persisted independently so it survives reconnects.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Chosen avatar class.
    pub character: CharacterClass,
    /// The vote on the active story, once submitted.
    pub vote: Option<CardValue>,
    /// Whether a ledger entry exists for the active story.
    pub has_voted: bool,
    /// Readiness flag.
    pub is_ready: bool,
}

impl Participant {
    /// Creates a participant with no vote on record.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>, character: CharacterClass) -> Self {
        Self {
            id,
            name: name.into(),
            character,
            vote: None,
            has_voted: false,
            is_ready: true,
        }
    }
}
