//! The local participant context.
//!
//! `GameClient` owns everything scoped to one connected client: the
//! installed session, the visible roster, the local identity and in-flight
//! card selection, the navigation cursor, the phase, and the chat log. It
//! is an explicit state object with a constructor and an explicit reset —
//! there is no process-wide singleton.
//!
//! Every operation is total: unmet preconditions resolve as silent no-ops,
//! never as caller-visible errors, because they correspond to UI states
//! that are prevented upstream.

use std::sync::Arc;

use tavern_core::clock::Clock;
use uuid::Uuid;

use crate::domain::card::CardValue;
use crate::domain::character::CharacterClass;
use crate::domain::chat::ChatMessage;
use crate::domain::participant::Participant;
use crate::domain::phase::Phase;
use crate::domain::session::Session;
use crate::domain::story::Story;

use super::store::{SavedState, SnapshotStore};
use super::views::{self, VoteResult};

/// Client-side state machine for one participant.
pub struct GameClient {
    session: Option<Session>,
    roster: Vec<Participant>,
    current_player: Option<Participant>,
    local_player_id: Option<Uuid>,
    player_name: String,
    selected_card: Option<CardValue>,
    phase: Phase,
    cursor: usize,
    connected: bool,
    chat: Vec<ChatMessage>,
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
}

impl GameClient {
    /// Creates a disconnected client in the `Waiting` phase.
    ///
    /// A previously persisted participant identity is picked up
    /// immediately, so a re-opened client recovers its own prior votes
    /// instead of appearing as a new voter.
    #[must_use]
    pub fn new(store: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>) -> Self {
        let local_player_id = store.load_participant_id();
        Self {
            session: None,
            roster: Vec::new(),
            current_player: None,
            local_player_id,
            player_name: "You".to_string(),
            selected_card: None,
            phase: Phase::Waiting,
            cursor: 0,
            connected: false,
            chat: Vec::new(),
            store,
            clock,
        }
    }

    // --- accessors -------------------------------------------------------

    /// Current local phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The installed session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The visible roster.
    #[must_use]
    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    /// The local participant, once a character is selected.
    #[must_use]
    pub fn current_player(&self) -> Option<&Participant> {
        self.current_player.as_ref()
    }

    /// The persisted local identity, if one exists.
    #[must_use]
    pub fn local_player_id(&self) -> Option<Uuid> {
        self.local_player_id
    }

    /// The pending, unsubmitted card selection.
    #[must_use]
    pub fn selected_card(&self) -> Option<CardValue> {
        self.selected_card
    }

    /// The local navigation cursor.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether a session is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The chat log.
    #[must_use]
    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    // --- derived views ---------------------------------------------------

    /// The story under the cursor.
    #[must_use]
    pub fn current_story(&self) -> Option<&Story> {
        self.session.as_ref().and_then(|s| s.story_at(self.cursor))
    }

    /// `(cursor + 1, story count)`, or `(0, 0)` with no session.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        self.session
            .as_ref()
            .map_or((0, 0), |s| (self.cursor + 1, s.story_count()))
    }

    /// Whether a story exists after the cursor.
    #[must_use]
    pub fn can_navigate_next(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| self.cursor + 1 < s.story_count())
    }

    /// Whether a story exists before the cursor.
    #[must_use]
    pub fn can_navigate_prev(&self) -> bool {
        self.cursor > 0
    }

    /// Whether the reveal action would succeed right now.
    ///
    /// Requires the `Voting` phase and global completeness: every required
    /// participant must hold a ledger entry for every story, not just the
    /// one on screen.
    #[must_use]
    pub fn can_reveal(&self) -> bool {
        self.phase == Phase::Voting
            && self
                .session
                .as_ref()
                .is_some_and(Session::all_stories_complete)
    }

    /// Whether the story on screen is revealed.
    #[must_use]
    pub fn is_current_story_revealed(&self) -> bool {
        self.current_story().is_some() && self.session.as_ref().is_some_and(Session::revealed)
    }

    /// Whether the local participant has a ledger entry for the story on
    /// screen.
    #[must_use]
    pub fn has_local_player_voted(&self) -> bool {
        self.local_vote().is_some()
    }

    /// Mean of the numeric votes for the story on screen.
    #[must_use]
    pub fn average_vote(&self) -> Option<f64> {
        let session = self.session.as_ref()?;
        let story = session.story_at(self.cursor)?;
        views::average_vote(session.ledger(), story.id)
    }

    /// Revealed results for the story on screen, in ledger order.
    ///
    /// Empty unless the phase is `Revealed` — votes are never listed
    /// before reveal.
    #[must_use]
    pub fn voting_results(&self) -> Vec<VoteResult> {
        if self.phase != Phase::Revealed {
            return Vec::new();
        }
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let Some(story) = session.story_at(self.cursor) else {
            return Vec::new();
        };
        views::vote_results(session.ledger(), story.id, &self.roster)
    }

    // --- session lifecycle -----------------------------------------------

    /// Sets the display name used for the local participant.
    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    /// Creates a session locally and installs it.
    pub fn create_session(&mut self, name: &str, stories: Vec<Story>) -> Uuid {
        let id = Uuid::new_v4();
        let session = Session::new(id, name, stories, self.clock.as_ref());
        self.install_session(session);
        id
    }

    /// Installs a session snapshot delivered by the session-join
    /// collaborator.
    pub fn connect(&mut self, session: Session) {
        let id = session.id;
        self.install_session(session);
        self.push_system(format!("Connected to session {id}"));
    }

    fn install_session(&mut self, session: Session) {
        self.connected = true;
        self.cursor = 0;
        self.selected_card = None;
        self.phase = Phase::Waiting;
        self.session = Some(session);
        self.restore_persisted();
    }

    /// Best-effort restore of the persisted snapshot for the installed
    /// session. Snapshots for a different session are never merged in.
    fn restore_persisted(&mut self) {
        let Some(session_id) = self.session.as_ref().map(|s| s.id) else {
            return;
        };
        if let Some(saved) = self.store.restore(session_id) {
            if let Some(session) = self.session.as_mut() {
                session.install_ledger(saved.votes);
            }
            if saved.participant_id.is_some() {
                self.local_player_id = saved.participant_id;
            }
            tracing::info!(session_id = %session_id, "restored persisted session state");
        }
    }

    /// Drops the session and resets to `Waiting`.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.reset_game();
        self.push_system("Disconnected from session");
    }

    /// Explicit whole-game reset of all client state.
    pub fn reset_game(&mut self) {
        self.roster.clear();
        self.session = None;
        self.chat.clear();
        self.selected_card = None;
        self.phase = Phase::Waiting;
        self.cursor = 0;
        self.current_player = None;
    }

    /// Disconnects and forgets the persisted identity.
    pub fn logout(&mut self) {
        self.disconnect();
        self.current_player = None;
        self.local_player_id = None;
        if let Err(err) = self.store.clear_participant_id() {
            tracing::warn!(error = %err, "failed to clear persisted identity");
        }
        self.push_system("Logged out");
    }

    // --- participant actions ---------------------------------------------

    /// Binds the local identity to an avatar class.
    ///
    /// Mints and immediately persists a participant id if none exists yet;
    /// the id must survive process restarts.
    pub fn select_character(&mut self, character: CharacterClass) {
        let id = match self.local_player_id {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                self.local_player_id = Some(id);
                if let Err(err) = self.store.save_participant_id(id) {
                    tracing::warn!(error = %err, "failed to persist participant identity");
                }
                id
            }
        };

        let mut player = Participant::new(id, self.player_name.clone(), character);
        player.vote = self.local_vote();
        player.has_voted = player.vote.is_some();
        self.current_player = Some(player);
    }

    /// Records a pending card choice. No-op unless the phase is `Voting`.
    pub fn select_card(&mut self, value: CardValue) {
        if self.phase == Phase::Voting {
            self.selected_card = Some(value);
        }
    }

    /// Submits the pending card as the local vote for the story on screen.
    ///
    /// Needs a pending choice, a resolved identity, and a current story;
    /// otherwise a silent no-op. Writes the ledger, upserts the roster,
    /// and snapshots state. Re-submission overwrites silently.
    pub fn submit_vote(&mut self) {
        let Some(value) = self.selected_card else {
            return;
        };
        let Some(story_id) = self.current_story_id() else {
            return;
        };
        let Some(mut player) = self.current_player.clone() else {
            return;
        };
        if self.session.is_none() {
            return;
        }

        if let Some(session) = self.session.as_mut() {
            session.record_vote(story_id, player.id, value);
        }

        player.vote = Some(value);
        player.has_voted = true;
        match self.roster.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player.clone(),
            None => self.roster.push(player.clone()),
        }
        let name = player.name.clone();
        self.current_player = Some(player);

        self.persist();
        self.push_system(format!("{name} voted"));
    }

    /// Reveals all votes for the whole session.
    ///
    /// A silent no-op unless the phase is `Voting` and every required
    /// participant has voted on every story at the moment of the call.
    pub fn reveal(&mut self) {
        if !self.can_reveal() {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.reveal();
        }
        self.phase = Phase::Revealed;
        self.push_system("All votes revealed for all stories!");
    }

    // --- navigation ------------------------------------------------------

    /// Moves the cursor to `index`. No-op outside `[0, story_count)`.
    ///
    /// On success the in-flight selection is cleared and the local vote for
    /// the target story is reloaded from the ledger. Reveal is sticky per
    /// session but re-evaluated against global completeness on every
    /// navigation: the phase re-enters `Revealed` only when the session
    /// flag is set AND every story is still complete.
    pub fn go_to(&mut self, index: usize) {
        let in_range = self
            .session
            .as_ref()
            .is_some_and(|s| index < s.story_count());
        if !in_range {
            return;
        }

        self.cursor = index;
        self.selected_card = None;
        self.phase = Phase::Voting;

        let local_vote = self.local_vote();
        if let Some(player) = self.current_player.as_mut() {
            player.vote = local_vote;
            player.has_voted = local_vote.is_some();
        }
        self.selected_card = local_vote;

        self.refresh_roster_voted_status();

        let sticky_reveal = self
            .session
            .as_ref()
            .is_some_and(|s| s.revealed() && s.all_stories_complete());
        if sticky_reveal {
            self.phase = Phase::Revealed;
        }

        if let Some(title) = self.current_story().map(|s| s.title.clone()) {
            self.push_system(format!("Navigated to: {title}"));
        }
    }

    /// Moves to the next story, if any.
    pub fn next_story(&mut self) {
        if self.can_navigate_next() {
            self.go_to(self.cursor + 1);
        }
    }

    /// Moves to the previous story, if any.
    pub fn previous_story(&mut self) {
        if self.can_navigate_prev() {
            self.go_to(self.cursor - 1);
        }
    }

    // --- chat ------------------------------------------------------------

    /// Posts a participant-authored chat line. Ignored when empty or when
    /// no identity is bound.
    pub fn send_chat_message(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        let Some(author) = self.current_player.as_ref().map(|p| p.name.clone()) else {
            return;
        };
        let now = self.clock.now();
        self.chat.push(ChatMessage::player(author, trimmed, now));
    }

    // --- internals -------------------------------------------------------

    fn current_story_id(&self) -> Option<Uuid> {
        self.current_story().map(|s| s.id)
    }

    fn local_vote(&self) -> Option<CardValue> {
        let story_id = self.current_story_id()?;
        let player_id = self.local_player_id?;
        self.session
            .as_ref()?
            .ledger()
            .vote_of(story_id, player_id)
    }

    fn refresh_roster_voted_status(&mut self) {
        let Some(story_id) = self.current_story_id() else {
            return;
        };
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let ledger = session.ledger();
        for player in &mut self.roster {
            player.vote = ledger.vote_of(story_id, player.id);
            player.has_voted = player.vote.is_some();
        }
    }

    fn persist(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let state = SavedState {
            session_id: session.id,
            votes: session.ledger().clone(),
            participant_id: self.local_player_id,
        };
        if let Err(err) = self.store.save(&state) {
            tracing::warn!(error = %err, "failed to persist vote snapshot");
        }
    }

    fn push_system(&mut self, text: impl Into<String>) {
        let now = self.clock.now();
        self.chat.push(ChatMessage::system(text, now));
    }
}
