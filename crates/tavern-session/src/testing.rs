//! Crate-local test doubles.
//!
//! The unit tests in this crate cannot pull fakes from a helper crate that
//! itself depends on `tavern-session`: Cargo would build two instances of
//! this crate for the lib-test target, and the fakes would implement the
//! trait from the wrong one. So the clock and the snapshot-store fakes used
//! by the unit tests live here.

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use tavern_core::clock::Clock;
use tavern_core::error::DomainError;
use uuid::Uuid;

use crate::application::store::{SavedState, SnapshotStore};

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A snapshot store backed by plain memory. Behaves like the real thing —
/// saves are visible to later restores — and records everything for
/// inspection.
#[derive(Debug, Default)]
pub struct RecordingSnapshotStore {
    snapshot: Mutex<Option<SavedState>>,
    participant_id: Mutex<Option<Uuid>>,
}

impl RecordingSnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent snapshot passed to `save`, if any.
    #[must_use]
    pub fn last_saved(&self) -> Option<SavedState> {
        self.snapshot.lock().unwrap().clone()
    }

    /// The currently stored standalone identity, if any.
    #[must_use]
    pub fn stored_participant_id(&self) -> Option<Uuid> {
        *self.participant_id.lock().unwrap()
    }
}

impl SnapshotStore for RecordingSnapshotStore {
    fn save(&self, state: &SavedState) -> Result<(), DomainError> {
        *self.snapshot.lock().unwrap() = Some(state.clone());
        Ok(())
    }

    fn restore(&self, session_id: Uuid) -> Option<SavedState> {
        self.snapshot
            .lock()
            .unwrap()
            .clone()
            .filter(|state| state.session_id == session_id)
    }

    fn save_participant_id(&self, participant_id: Uuid) -> Result<(), DomainError> {
        *self.participant_id.lock().unwrap() = Some(participant_id);
        Ok(())
    }

    fn load_participant_id(&self) -> Option<Uuid> {
        *self.participant_id.lock().unwrap()
    }

    fn clear_participant_id(&self) -> Result<(), DomainError> {
        *self.participant_id.lock().unwrap() = None;
        Ok(())
    }
}

/// A store that persists nothing and restores nothing. For tests that do
/// not care about persistence.
#[derive(Debug)]
pub struct NullSnapshotStore;

impl SnapshotStore for NullSnapshotStore {
    fn save(&self, _state: &SavedState) -> Result<(), DomainError> {
        Ok(())
    }

    fn restore(&self, _session_id: Uuid) -> Option<SavedState> {
        None
    }

    fn save_participant_id(&self, _participant_id: Uuid) -> Result<(), DomainError> {
        Ok(())
    }

    fn load_participant_id(&self) -> Option<Uuid> {
        None
    }

    fn clear_participant_id(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// A store whose writes always fail. For exercising the fail-soft
/// persistence paths.
#[derive(Debug)]
pub struct FailingSnapshotStore;

impl SnapshotStore for FailingSnapshotStore {
    fn save(&self, _state: &SavedState) -> Result<(), DomainError> {
        Err(DomainError::Storage("disk full".into()))
    }

    fn restore(&self, _session_id: Uuid) -> Option<SavedState> {
        None
    }

    fn save_participant_id(&self, _participant_id: Uuid) -> Result<(), DomainError> {
        Err(DomainError::Storage("disk full".into()))
    }

    fn load_participant_id(&self) -> Option<Uuid> {
        None
    }

    fn clear_participant_id(&self) -> Result<(), DomainError> {
        Err(DomainError::Storage("disk full".into()))
    }
}
