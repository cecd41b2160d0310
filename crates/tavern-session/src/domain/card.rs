//! Card values and the playable deck.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tavern_core::error::DomainError;

/// The numeric magnitudes recognized on the deck.
pub const DECK_POINTS: [u8; 8] = [0, 1, 2, 3, 5, 8, 13, 21];

/// A single vote token.
///
/// The token set is closed: the eight deck magnitudes plus the two special
/// cards. Serialized as the raw token string (`"5"`, `"?"`, `"☕"`), which is
/// also the wire and snapshot representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardValue {
    /// A numeric magnitude card.
    Points(u8),
    /// The "no idea" card.
    Unknown,
    /// The coffee-break card.
    Break,
}

impl CardValue {
    /// Returns the magnitude as a float, or `None` for the special cards.
    ///
    /// The special cards are excluded from averages, never coerced to 0.
    #[must_use]
    pub fn numeric_value(self) -> Option<f64> {
        match self {
            Self::Points(n) => Some(f64::from(n)),
            Self::Unknown | Self::Break => None,
        }
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points(n) => write!(f, "{n}"),
            Self::Unknown => f.write_str("?"),
            Self::Break => f.write_str("☕"),
        }
    }
}

impl FromStr for CardValue {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "?" => Ok(Self::Unknown),
            "☕" => Ok(Self::Break),
            other => other
                .parse::<u8>()
                .ok()
                .filter(|n| DECK_POINTS.contains(n))
                .map(Self::Points)
                .ok_or_else(|| DomainError::Validation(format!("unrecognized card token: {other}"))),
        }
    }
}

impl Serialize for CardValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CardValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(D::Error::custom)
    }
}

/// One entry of the playable deck, with display copy for the table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PokerCard {
    /// The token submitted when this card is played.
    pub value: CardValue,
    /// Label printed on the card face.
    pub label: &'static str,
    /// Short description shown on hover.
    pub description: &'static str,
}

/// Returns the full ten-card deck in display order.
#[must_use]
pub fn deck() -> [PokerCard; 10] {
    [
        PokerCard {
            value: CardValue::Points(0),
            label: "0",
            description: "Nothing to do",
        },
        PokerCard {
            value: CardValue::Points(1),
            label: "1",
            description: "Very simple",
        },
        PokerCard {
            value: CardValue::Points(2),
            label: "2",
            description: "Simple",
        },
        PokerCard {
            value: CardValue::Points(3),
            label: "3",
            description: "Medium",
        },
        PokerCard {
            value: CardValue::Points(5),
            label: "5",
            description: "Complex",
        },
        PokerCard {
            value: CardValue::Points(8),
            label: "8",
            description: "Very complex",
        },
        PokerCard {
            value: CardValue::Points(13),
            label: "13",
            description: "Huge",
        },
        PokerCard {
            value: CardValue::Points(21),
            label: "21",
            description: "Too big",
        },
        PokerCard {
            value: CardValue::Unknown,
            label: "?",
            description: "No idea",
        },
        PokerCard {
            value: CardValue::Break,
            label: "☕",
            description: "Coffee break",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_magnitudes_round_trip_through_tokens() {
        for n in DECK_POINTS {
            let parsed: CardValue = n.to_string().parse().unwrap();
            assert_eq!(parsed, CardValue::Points(n));
            assert_eq!(parsed.numeric_value(), Some(f64::from(n)));
        }
    }

    #[test]
    fn test_special_tokens_parse_and_have_no_magnitude() {
        assert_eq!("?".parse::<CardValue>().unwrap(), CardValue::Unknown);
        assert_eq!("☕".parse::<CardValue>().unwrap(), CardValue::Break);
        assert_eq!(CardValue::Unknown.numeric_value(), None);
        assert_eq!(CardValue::Break.numeric_value(), None);
    }

    #[test]
    fn test_unrecognized_tokens_are_rejected() {
        assert!("4".parse::<CardValue>().is_err());
        assert!("".parse::<CardValue>().is_err());
        assert!("five".parse::<CardValue>().is_err());
        assert!("-1".parse::<CardValue>().is_err());
    }

    #[test]
    fn test_serde_uses_the_raw_token_string() {
        let json = serde_json::to_string(&CardValue::Points(13)).unwrap();
        assert_eq!(json, "\"13\"");
        let back: CardValue = serde_json::from_str("\"?\"").unwrap();
        assert_eq!(back, CardValue::Unknown);
        assert!(serde_json::from_str::<CardValue>("\"4\"").is_err());
    }

    #[test]
    fn test_deck_has_ten_cards_in_display_order() {
        let deck = deck();
        assert_eq!(deck.len(), 10);
        assert_eq!(deck[0].value, CardValue::Points(0));
        assert_eq!(deck[8].value, CardValue::Unknown);
        assert_eq!(deck[9].value, CardValue::Break);
    }
}
