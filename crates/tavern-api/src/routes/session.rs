//! Session lifecycle and voting endpoints.
//!
//! The API layer is the session-join collaborator: it owns the
//! required-participant set (every joiner becomes required) and it is the
//! only writer of server-held session state. Votes are never serialized
//! into a response before the session's reveal flag is set.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tavern_core::error::DomainError;
use tavern_session::application::views::{self, VoteResult};
use tavern_session::domain::card::CardValue;
use tavern_session::domain::character::CharacterClass;
use tavern_session::domain::participant::Participant;
use tavern_session::domain::session::Session;
use tavern_session::domain::story::Story;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{AppState, SessionEntry};

/// Story payload for session creation.
#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    /// Story title.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Optional external tracker key.
    #[serde(default)]
    pub tracker_key: Option<String>,
}

/// Request body for `POST /`.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Session display name.
    pub name: String,
    /// The backlog, in navigation order.
    pub stories: Vec<StoryRequest>,
}

/// Response body for `POST /`.
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    /// Identifier of the created session.
    pub session_id: Uuid,
}

/// Request body for `POST /{id}/join`.
#[derive(Debug, Deserialize)]
pub struct JoinSessionRequest {
    /// Participant display name.
    pub name: String,
    /// Chosen avatar class.
    pub character: CharacterClass,
}

/// Response body for `POST /{id}/join`.
#[derive(Debug, Serialize)]
pub struct JoinSessionResponse {
    /// Identifier minted for the joining participant.
    pub participant_id: Uuid,
    /// Session state after the join.
    pub session: SessionView,
}

/// Request body for `POST /{id}/vote`.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// Voting participant.
    pub participant_id: Uuid,
    /// Story being voted on.
    pub story_id: Uuid,
    /// Card token, e.g. `"5"`, `"?"`, `"☕"`.
    pub value: String,
}

/// Response body for `POST /{id}/reveal`.
#[derive(Debug, Serialize)]
pub struct RevealResponse {
    /// Whether the session is revealed after the call. `false` means the
    /// reveal was a no-op because some required vote is still missing.
    pub revealed: bool,
}

/// Read model of one story.
#[derive(Debug, Serialize)]
pub struct StoryView {
    /// Story identifier.
    pub id: Uuid,
    /// Story title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Optional external tracker key.
    pub tracker_key: Option<String>,
    /// Agreed estimate, if settled.
    pub estimate: Option<f64>,
    /// Whether every required participant has voted on this story.
    pub complete: bool,
    /// Who has voted, in submission order. Values stay hidden.
    pub voted_participants: Vec<Uuid>,
    /// Raw votes in submission order. `None` until the session is revealed.
    pub results: Option<Vec<VoteResult>>,
    /// Mean of the numeric votes. `None` until the session is revealed.
    pub average: Option<f64>,
}

/// Read model of one roster member.
#[derive(Debug, Serialize)]
pub struct ParticipantView {
    /// Participant identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Avatar class.
    pub character: CharacterClass,
}

/// Read model of a hosted session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    /// Session identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the session is live.
    pub is_active: bool,
    /// Session-wide reveal flag.
    pub revealed: bool,
    /// Whether every required participant has voted on every story.
    pub all_stories_complete: bool,
    /// Identifiers whose votes gate completion.
    pub required_participants: Vec<Uuid>,
    /// The backlog, in navigation order.
    pub stories: Vec<StoryView>,
    /// Joined participants, in join order.
    pub participants: Vec<ParticipantView>,
}

/// Returns the router for the session endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/{id}", get(get_session))
        .route("/{id}/join", post(join_session))
        .route("/{id}/vote", post(record_vote))
        .route("/{id}/reveal", post(reveal))
}

/// POST / — create a session over a backlog of stories.
async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ApiError> {
    if request.name.trim().is_empty() {
        return Err(DomainError::Validation("session name must not be empty".into()).into());
    }

    let stories: Vec<Story> = request
        .stories
        .into_iter()
        .map(|s| {
            let mut story = Story::new(s.title, s.description);
            story.tracker_key = s.tracker_key;
            story
        })
        .collect();

    let session = Session::new(Uuid::new_v4(), request.name.trim(), stories, state.clock());
    let session_id = session.id;
    state.insert_session(session).await;

    tracing::info!(session_id = %session_id, "session created");
    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id }),
    ))
}

/// GET /{id} — the current read model of a session.
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let entry = state
        .session(id)
        .await
        .ok_or(DomainError::SessionNotFound(id))?;
    let entry = entry.lock().await;
    Ok(Json(session_view(&entry)))
}

/// POST /{id}/join — join the session and become a required voter.
async fn join_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<JoinSessionRequest>,
) -> Result<Json<JoinSessionResponse>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(DomainError::Validation("participant name must not be empty".into()).into());
    }

    let entry = state
        .session(id)
        .await
        .ok_or(DomainError::SessionNotFound(id))?;
    let mut entry = entry.lock().await;

    let participant_id = Uuid::new_v4();
    let participant = Participant::new(participant_id, request.name.trim(), request.character);
    entry.roster.push(participant);
    entry.session.require_participant(participant_id);

    tracing::info!(session_id = %id, participant_id = %participant_id, "participant joined");
    Ok(Json(JoinSessionResponse {
        participant_id,
        session: session_view(&entry),
    }))
}

/// POST /{id}/vote — record or overwrite one vote.
async fn record_vote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let value: CardValue = request.value.parse().map_err(ApiError::from)?;

    let entry = state
        .session(id)
        .await
        .ok_or(DomainError::SessionNotFound(id))?;
    let mut entry = entry.lock().await;

    if !entry.session.has_story(request.story_id) {
        return Err(DomainError::Validation(format!(
            "story {} is not part of this session",
            request.story_id
        ))
        .into());
    }
    if !entry.roster.iter().any(|p| p.id == request.participant_id) {
        return Err(DomainError::Validation(format!(
            "participant {} has not joined this session",
            request.participant_id
        ))
        .into());
    }

    entry
        .session
        .record_vote(request.story_id, request.participant_id, value);

    tracing::debug!(
        session_id = %id,
        participant_id = %request.participant_id,
        story_id = %request.story_id,
        "vote recorded"
    );
    Ok(Json(session_view(&entry)))
}

/// POST /{id}/reveal — reveal all votes, gated on global completeness.
async fn reveal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RevealResponse>, ApiError> {
    let entry = state
        .session(id)
        .await
        .ok_or(DomainError::SessionNotFound(id))?;
    let mut entry = entry.lock().await;

    let revealed = entry.session.reveal();
    if revealed {
        tracing::info!(session_id = %id, "votes revealed");
    }
    Ok(Json(RevealResponse { revealed }))
}

/// Builds the read model. Votes and averages are only included once the
/// session-wide reveal flag is set.
fn session_view(entry: &SessionEntry) -> SessionView {
    let session = &entry.session;
    let revealed = session.revealed();

    let stories = session
        .stories()
        .iter()
        .map(|story| {
            let votes = session.ledger().votes_for(story.id);
            StoryView {
                id: story.id,
                title: story.title.clone(),
                description: story.description.clone(),
                tracker_key: story.tracker_key.clone(),
                estimate: story.estimate,
                complete: session.story_complete(story.id),
                voted_participants: votes.iter().map(|(id, _)| *id).collect(),
                results: revealed
                    .then(|| views::vote_results(session.ledger(), story.id, &entry.roster)),
                average: revealed
                    .then(|| views::average_vote(session.ledger(), story.id))
                    .flatten(),
            }
        })
        .collect();

    let participants = entry
        .roster
        .iter()
        .map(|p| ParticipantView {
            id: p.id,
            name: p.name.clone(),
            character: p.character,
        })
        .collect();

    SessionView {
        id: session.id,
        name: session.name.clone(),
        created_at: session.created_at,
        is_active: session.is_active,
        revealed,
        all_stories_complete: session.all_stories_complete(),
        required_participants: session.required_participants().to_vec(),
        stories,
        participants,
    }
}
