//! Shared application state.

use std::collections::HashMap;
use std::sync::Arc;

use tavern_core::clock::Clock;
use tavern_session::domain::participant::Participant;
use tavern_session::domain::session::Session;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// One hosted session plus its server-side roster.
///
/// Guarded by a single mutex: the session is its own serialization point,
/// so concurrent vote submissions never race on ledger inserts and a
/// reveal check always observes a consistent set of entries. Handlers never
/// hold the lock across an `.await`.
#[derive(Debug)]
pub struct SessionEntry {
    /// The authoritative session state.
    pub session: Session,
    /// Participants who have joined, in join order.
    pub roster: Vec<Participant>,
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    clock: Arc<dyn Clock>,
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<SessionEntry>>>>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The clock used for session timestamps.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Registers a freshly created session.
    pub async fn insert_session(&self, session: Session) {
        let id = session.id;
        let entry = SessionEntry {
            session,
            roster: Vec::new(),
        };
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(entry)));
    }

    /// Looks a hosted session up by id.
    pub async fn session(&self, id: Uuid) -> Option<Arc<Mutex<SessionEntry>>> {
        self.sessions.read().await.get(&id).cloned()
    }
}
