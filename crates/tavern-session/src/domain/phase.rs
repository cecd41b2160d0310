//! The local client's stage in the voting cycle.

use serde::{Deserialize, Serialize};

/// Stage of the voting cycle for the currently displayed story.
///
/// Scoped to the local client, not to the session record: each participant
/// browses stories independently, so two clients can be in different phases
/// at the same moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No session yet, or state was reset.
    Waiting,
    /// A story is on screen and cards can be played.
    Voting,
    /// Reserved for a post-reveal talk stage. No transition enters this
    /// state today.
    Discussion,
    /// Votes for the displayed story are visible.
    Revealed,
}
