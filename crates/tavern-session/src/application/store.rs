//! Snapshot persistence contract.
//!
//! Persistence is a synchronous local write: it is invoked after every vote
//! mutation and on session entry, and it is best-effort — a failed save is
//! logged and swallowed, a malformed snapshot reads as absent.

use serde::{Deserialize, Serialize};
use tavern_core::error::DomainError;
use uuid::Uuid;

use crate::domain::ledger::VoteLedger;

/// The device-local snapshot: enough to recover a client's own votes and
/// identity after a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    /// Session the snapshot belongs to. A restore for a different session
    /// must never merge this snapshot in.
    pub session_id: Uuid,
    /// Full ledger at snapshot time.
    pub votes: VoteLedger,
    /// The local participant identity, if one was minted.
    pub participant_id: Option<Uuid>,
}

/// Durable storage for the device-local snapshot and the standalone
/// participant identity record.
///
/// The identity record is kept separately from the session snapshot so the
/// identity survives even without an active session.
pub trait SnapshotStore: Send + Sync {
    /// Persists the snapshot, overwriting any prior one.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] when the write fails. Callers treat
    /// this as non-fatal.
    fn save(&self, state: &SavedState) -> Result<(), DomainError>;

    /// Returns the stored snapshot only when its embedded session id
    /// matches `session_id`. Stale snapshots for a different session and
    /// malformed payloads both read as `None`.
    fn restore(&self, session_id: Uuid) -> Option<SavedState>;

    /// Persists the standalone participant identity.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] when the write fails.
    fn save_participant_id(&self, participant_id: Uuid) -> Result<(), DomainError>;

    /// Loads the standalone participant identity, if stored and readable.
    fn load_participant_id(&self) -> Option<Uuid>;

    /// Forgets the standalone participant identity (logout).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] when the delete fails.
    fn clear_participant_id(&self) -> Result<(), DomainError>;
}
