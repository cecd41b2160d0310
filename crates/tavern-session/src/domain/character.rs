//! The avatar roster a participant chooses from.

use serde::{Deserialize, Serialize};

/// The fixed set of avatar classes available at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    /// 🧙‍♂️
    Mage,
    /// ⚔️
    Paladin,
    /// 🗡️
    Rogue,
    /// ✨
    Priest,
    /// 🛡️
    Warrior,
    /// 🏹
    Hunter,
    /// 😈
    Warlock,
    /// 🌿
    Druid,
}

impl CharacterClass {
    /// Every selectable class, in display order.
    pub const ALL: [Self; 8] = [
        Self::Mage,
        Self::Paladin,
        Self::Rogue,
        Self::Priest,
        Self::Warrior,
        Self::Hunter,
        Self::Warlock,
        Self::Druid,
    ];

    /// Stable identifier, also the serialized form.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Mage => "mage",
            Self::Paladin => "paladin",
            Self::Rogue => "rogue",
            Self::Priest => "priest",
            Self::Warrior => "warrior",
            Self::Hunter => "hunter",
            Self::Warlock => "warlock",
            Self::Druid => "druid",
        }
    }

    /// Display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mage => "Mage",
            Self::Paladin => "Paladin",
            Self::Rogue => "Rogue",
            Self::Priest => "Priest",
            Self::Warrior => "Warrior",
            Self::Hunter => "Hunter",
            Self::Warlock => "Warlock",
            Self::Druid => "Druid",
        }
    }

    /// Emoji shown on the avatar card.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Mage => "🧙‍♂️",
            Self::Paladin => "⚔️",
            Self::Rogue => "🗡️",
            Self::Priest => "✨",
            Self::Warrior => "🛡️",
            Self::Hunter => "🏹",
            Self::Warlock => "😈",
            Self::Druid => "🌿",
        }
    }

    /// Looks a class up by its stable identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.id() == id)
    }
}
