//! JSON file store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tavern_core::error::DomainError;
use tavern_session::application::store::{SavedState, SnapshotStore};
use uuid::Uuid;

const SNAPSHOT_FILE: &str = "snapshot.json";
const PARTICIPANT_FILE: &str = "participant.json";

/// Snapshot store backed by two JSON files in a directory.
///
/// Restore is best-effort and fails closed: a missing, unreadable, or
/// malformed file reads as absence, never as an error. Only a snapshot
/// whose embedded session id matches the requested one is returned.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    fn participant_path(&self) -> PathBuf {
        self.dir.join(PARTICIPANT_FILE)
    }

    fn write_json(&self, path: &Path, json: &[u8]) -> Result<(), DomainError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| DomainError::Storage(format!("creating {}: {e}", self.dir.display())))?;
        fs::write(path, json)
            .map_err(|e| DomainError::Storage(format!("writing {}: {e}", path.display())))
    }

    /// Reads and parses a JSON file, treating every failure as absence.
    /// Only unexpected failures are logged; a missing file is normal.
    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read persisted state");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "malformed persisted state, ignoring");
                None
            }
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&self, state: &SavedState) -> Result<(), DomainError> {
        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| DomainError::Storage(format!("serializing snapshot: {e}")))?;
        self.write_json(&self.snapshot_path(), &json)
    }

    fn restore(&self, session_id: Uuid) -> Option<SavedState> {
        let state: SavedState = Self::read_json(&self.snapshot_path())?;
        if state.session_id == session_id {
            Some(state)
        } else {
            tracing::debug!(
                stored = %state.session_id,
                requested = %session_id,
                "ignoring snapshot for a different session"
            );
            None
        }
    }

    fn save_participant_id(&self, participant_id: Uuid) -> Result<(), DomainError> {
        let json = serde_json::to_vec(&participant_id)
            .map_err(|e| DomainError::Storage(format!("serializing participant id: {e}")))?;
        self.write_json(&self.participant_path(), &json)
    }

    fn load_participant_id(&self) -> Option<Uuid> {
        Self::read_json(&self.participant_path())
    }

    fn clear_participant_id(&self) -> Result<(), DomainError> {
        match fs::remove_file(self.participant_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(DomainError::Storage(format!(
                "removing participant record: {err}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tavern_session::domain::card::CardValue;
    use tavern_session::domain::ledger::VoteLedger;

    use super::*;

    fn saved_state(session_id: Uuid) -> SavedState {
        let mut votes = VoteLedger::new();
        votes.record_vote(Uuid::new_v4(), Uuid::new_v4(), CardValue::Points(5));
        votes.record_vote(Uuid::new_v4(), Uuid::new_v4(), CardValue::Break);
        SavedState {
            session_id,
            votes,
            participant_id: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn test_save_then_restore_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let session_id = Uuid::new_v4();
        let state = saved_state(session_id);

        store.save(&state).unwrap();
        let restored = store.restore(session_id).unwrap();

        assert_eq!(restored, state);
    }

    #[test]
    fn test_restore_for_a_different_session_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save(&saved_state(Uuid::new_v4())).unwrap();

        assert!(store.restore(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_restore_with_no_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.restore(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_malformed_snapshot_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(dir.path().join("snapshot.json"), b"{not json").unwrap();

        assert!(store.restore(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_save_overwrites_the_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let old = saved_state(Uuid::new_v4());
        let new = saved_state(Uuid::new_v4());

        store.save(&old).unwrap();
        store.save(&new).unwrap();

        assert!(store.restore(old.session_id).is_none());
        assert_eq!(store.restore(new.session_id), Some(new));
    }

    #[test]
    fn test_participant_id_record_is_independent_of_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let id = Uuid::new_v4();

        store.save_participant_id(id).unwrap();
        assert_eq!(store.load_participant_id(), Some(id));
        // No snapshot has ever been written.
        assert!(store.restore(Uuid::new_v4()).is_none());

        store.clear_participant_id().unwrap();
        assert_eq!(store.load_participant_id(), None);
        // Clearing twice is fine.
        store.clear_participant_id().unwrap();
    }

    #[test]
    fn test_malformed_participant_record_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(dir.path().join("participant.json"), b"42garbage").unwrap();

        assert_eq!(store.load_participant_id(), None);
    }
}
