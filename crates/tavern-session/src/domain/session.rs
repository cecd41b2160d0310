//! The estimation session and its completion/reveal rules.

use chrono::{DateTime, Utc};
use tavern_core::clock::Clock;
use uuid::Uuid;

use super::card::CardValue;
use super::ledger::VoteLedger;
use super::story::Story;

/// One estimation session: an ordered backlog of stories, the vote ledger,
/// and the session-wide reveal flag.
///
/// The required-participant set is session-scoped and externally supplied —
/// it is never recomputed from who happens to be present. A participant who
/// is listed as required but never joined blocks completion until they vote.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the session is live.
    pub is_active: bool,
    stories: Vec<Story>,
    ledger: VoteLedger,
    revealed: bool,
    required_participants: Vec<Uuid>,
}

impl Session {
    /// Creates an active session over the given backlog.
    ///
    /// Story order is the navigation order and is significant.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>, stories: Vec<Story>, clock: &dyn Clock) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: clock.now(),
            is_active: true,
            stories,
            ledger: VoteLedger::new(),
            revealed: false,
            required_participants: Vec::new(),
        }
    }

    /// The backlog, in navigation order.
    #[must_use]
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Number of stories in the backlog.
    #[must_use]
    pub fn story_count(&self) -> usize {
        self.stories.len()
    }

    /// The story at a navigation index, if in range.
    #[must_use]
    pub fn story_at(&self, index: usize) -> Option<&Story> {
        self.stories.get(index)
    }

    /// Whether the backlog contains the given story.
    #[must_use]
    pub fn has_story(&self, story_id: Uuid) -> bool {
        self.stories.iter().any(|story| story.id == story_id)
    }

    /// Read access to the vote ledger.
    #[must_use]
    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    /// Replaces the ledger wholesale. Used when restoring a snapshot.
    pub fn install_ledger(&mut self, ledger: VoteLedger) {
        self.ledger = ledger;
    }

    /// Records a vote for `(story, participant)`, overwriting any prior one.
    pub fn record_vote(&mut self, story_id: Uuid, participant_id: Uuid, value: CardValue) {
        self.ledger.record_vote(story_id, participant_id, value);
    }

    /// Identifiers whose votes count toward completion.
    #[must_use]
    pub fn required_participants(&self) -> &[Uuid] {
        &self.required_participants
    }

    /// Replaces the required-participant set.
    pub fn set_required_participants(&mut self, participants: Vec<Uuid>) {
        self.required_participants = participants;
    }

    /// Adds one identifier to the required set, if not already present.
    pub fn require_participant(&mut self, participant_id: Uuid) {
        if !self.required_participants.contains(&participant_id) {
            self.required_participants.push(participant_id);
        }
    }

    /// Whether every required participant has a ledger entry for the story.
    #[must_use]
    pub fn story_complete(&self, story_id: Uuid) -> bool {
        self.required_participants
            .iter()
            .all(|participant| self.ledger.has_voted(story_id, *participant))
    }

    /// Whether `story_complete` holds for every story in the backlog.
    ///
    /// This, not per-story completion, is what gates the reveal: the reveal
    /// flag is session-wide, so it may only be set once the whole backlog
    /// is complete.
    #[must_use]
    pub fn all_stories_complete(&self) -> bool {
        self.stories
            .iter()
            .all(|story| self.story_complete(story.id))
    }

    /// Whether votes have been revealed.
    #[must_use]
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// Sets the session-wide reveal flag.
    ///
    /// A silent no-op returning `false` unless every required participant
    /// has voted on every story at the moment of the call.
    pub fn reveal(&mut self) -> bool {
        if self.all_stories_complete() {
            self.revealed = true;
        }
        self.revealed
    }

    /// Whole-game reset: clears the ledger and the reveal flag.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.revealed = false;
    }
}
