//! Table chat log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Typed by a participant.
    Message,
    /// Emitted by the game itself (votes, reveals, navigation).
    System,
}

/// One line in the table chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message identifier.
    pub id: Uuid,
    /// Author display name.
    pub author: String,
    /// Message body.
    pub text: String,
    /// When the line was posted.
    pub timestamp: DateTime<Utc>,
    /// Player message or system announcement.
    pub kind: MessageKind,
}

impl ChatMessage {
    /// A system announcement.
    #[must_use]
    pub fn system(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: "System".to_string(),
            text: text.into(),
            timestamp,
            kind: MessageKind::System,
        }
    }

    /// A participant-authored message.
    #[must_use]
    pub fn player(
        author: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: author.into(),
            text: text.into(),
            timestamp,
            kind: MessageKind::Message,
        }
    }
}
