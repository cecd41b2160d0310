//! Stories — the units of work being estimated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One unit of work being estimated.
///
/// Immutable once added to a session; only the optional final `estimate` is
/// ever filled in after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Stable story identifier.
    pub id: Uuid,
    /// Short title shown during navigation.
    pub title: String,
    /// Longer description of the work.
    pub description: String,
    /// Key in an external tracker, if the story is linked to one.
    pub tracker_key: Option<String>,
    /// Agreed estimate, once the group settles on one.
    pub estimate: Option<f64>,
}

impl Story {
    /// Creates a new story with a freshly minted identifier.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            tracker_key: None,
            estimate: None,
        }
    }

    /// Attaches an external tracker key.
    #[must_use]
    pub fn with_tracker_key(mut self, key: impl Into<String>) -> Self {
        self.tracker_key = Some(key.into());
        self
    }
}
