//! Derived view functions.
//!
//! Pure computations over the current state, recomputed on every read and
//! never cached. Anything a renderer needs that can be derived lives here
//! rather than being stored alongside the authoritative state.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::card::CardValue;
use crate::domain::character::CharacterClass;
use crate::domain::ledger::VoteLedger;
use crate::domain::participant::Participant;

/// One row of revealed results.
#[derive(Debug, Clone, Serialize)]
pub struct VoteResult {
    /// Voter display name; falls back to the raw id for voters missing
    /// from the roster.
    pub participant: String,
    /// The raw submitted value.
    pub value: CardValue,
    /// The voter's avatar class, when known.
    pub character: Option<CharacterClass>,
}

/// Mean of the numeric votes for one story, rounded to one decimal place.
///
/// The `?` and `☕` cards are excluded from the mean, not coerced to zero.
/// `None` when the story has no numeric entries at all.
#[must_use]
pub fn average_vote(ledger: &VoteLedger, story_id: Uuid) -> Option<f64> {
    let numeric: Vec<f64> = ledger
        .votes_for(story_id)
        .iter()
        .filter_map(|(_, value)| value.numeric_value())
        .collect();

    if numeric.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = numeric.iter().sum::<f64>() / numeric.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// Revealed results for one story, in ledger (submission) order.
#[must_use]
pub fn vote_results(ledger: &VoteLedger, story_id: Uuid, roster: &[Participant]) -> Vec<VoteResult> {
    ledger
        .votes_for(story_id)
        .iter()
        .map(|(participant_id, value)| {
            let member = roster.iter().find(|p| p.id == *participant_id);
            VoteResult {
                participant: member.map_or_else(
                    || participant_id.to_string(),
                    |p| p.name.clone(),
                ),
                value: *value,
                character: member.map(|p| p.character),
            }
        })
        .collect()
}
