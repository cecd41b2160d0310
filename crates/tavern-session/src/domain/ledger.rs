//! The vote ledger — authoritative record of submitted votes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::card::CardValue;

/// Submitted votes, keyed by `(story, participant)`.
///
/// An entry exists if and only if that participant has submitted for that
/// story; absence means "not yet voted", never an empty vote. Keying by the
/// pair rather than storing votes on participant records is what lets one
/// participant carry distinct votes across stories and lets completion be
/// computed per story without touching participant state.
///
/// Per-story insertion order is preserved; results are reported in the
/// order votes arrived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteLedger {
    by_story: HashMap<Uuid, Vec<(Uuid, CardValue)>>,
}

impl VoteLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the entry for `(story, participant)`.
    ///
    /// Re-voting is allowed and indistinguishable from a first vote; there
    /// is no locked-after-submit rule.
    pub fn record_vote(&mut self, story_id: Uuid, participant_id: Uuid, value: CardValue) {
        let votes = self.by_story.entry(story_id).or_default();
        match votes.iter_mut().find(|(id, _)| *id == participant_id) {
            Some((_, existing)) => *existing = value,
            None => votes.push((participant_id, value)),
        }
    }

    /// Whether an entry exists for `(story, participant)`.
    #[must_use]
    pub fn has_voted(&self, story_id: Uuid, participant_id: Uuid) -> bool {
        self.vote_of(story_id, participant_id).is_some()
    }

    /// The recorded vote for `(story, participant)`, if any.
    #[must_use]
    pub fn vote_of(&self, story_id: Uuid, participant_id: Uuid) -> Option<CardValue> {
        self.votes_for(story_id)
            .iter()
            .find(|(id, _)| *id == participant_id)
            .map(|(_, value)| *value)
    }

    /// All entries for one story, in submission order.
    ///
    /// A story with no entries yields an empty slice, never an error.
    #[must_use]
    pub fn votes_for(&self, story_id: Uuid) -> &[(Uuid, CardValue)] {
        self.by_story.get(&story_id).map_or(&[], Vec::as_slice)
    }

    /// Whether the ledger holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_story.values().all(Vec::is_empty)
    }

    /// Removes every entry. Whole-game reset only.
    pub fn clear(&mut self) {
        self.by_story.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absence_means_not_yet_voted() {
        let ledger = VoteLedger::new();
        let story = Uuid::new_v4();
        assert!(!ledger.has_voted(story, Uuid::new_v4()));
        assert!(ledger.votes_for(story).is_empty());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_record_then_query() {
        let mut ledger = VoteLedger::new();
        let story = Uuid::new_v4();
        let voter = Uuid::new_v4();

        ledger.record_vote(story, voter, CardValue::Points(5));

        assert!(ledger.has_voted(story, voter));
        assert_eq!(ledger.vote_of(story, voter), Some(CardValue::Points(5)));
        assert_eq!(ledger.votes_for(story), &[(voter, CardValue::Points(5))]);
    }

    #[test]
    fn test_revote_overwrites_in_place() {
        let mut ledger = VoteLedger::new();
        let story = Uuid::new_v4();
        let voter = Uuid::new_v4();

        ledger.record_vote(story, voter, CardValue::Points(3));
        ledger.record_vote(story, voter, CardValue::Points(8));

        assert_eq!(ledger.votes_for(story).len(), 1);
        assert_eq!(ledger.vote_of(story, voter), Some(CardValue::Points(8)));
    }

    #[test]
    fn test_votes_are_independent_across_stories() {
        let mut ledger = VoteLedger::new();
        let story_a = Uuid::new_v4();
        let story_b = Uuid::new_v4();
        let voter = Uuid::new_v4();

        ledger.record_vote(story_a, voter, CardValue::Points(2));
        ledger.record_vote(story_b, voter, CardValue::Unknown);

        assert_eq!(ledger.vote_of(story_a, voter), Some(CardValue::Points(2)));
        assert_eq!(ledger.vote_of(story_b, voter), Some(CardValue::Unknown));
    }

    #[test]
    fn test_submission_order_is_preserved() {
        let mut ledger = VoteLedger::new();
        let story = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let third = Uuid::new_v4();

        ledger.record_vote(story, first, CardValue::Points(1));
        ledger.record_vote(story, second, CardValue::Points(2));
        ledger.record_vote(story, third, CardValue::Points(3));
        // A re-vote must not move the voter to the back.
        ledger.record_vote(story, first, CardValue::Points(13));

        let order: Vec<Uuid> = ledger.votes_for(story).iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec![first, second, third]);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut ledger = VoteLedger::new();
        let story = Uuid::new_v4();
        ledger.record_vote(story, Uuid::new_v4(), CardValue::Break);

        ledger.clear();

        assert!(ledger.is_empty());
        assert!(ledger.votes_for(story).is_empty());
    }

    #[test]
    fn test_serde_round_trip_preserves_entries() {
        let mut ledger = VoteLedger::new();
        let story = Uuid::new_v4();
        let voter = Uuid::new_v4();
        ledger.record_vote(story, voter, CardValue::Points(13));
        ledger.record_vote(story, Uuid::new_v4(), CardValue::Unknown);

        let json = serde_json::to_string(&ledger).unwrap();
        let back: VoteLedger = serde_json::from_str(&json).unwrap();

        assert_eq!(back, ledger);
    }
}
