//! Core type aliases and identifiers used throughout the crate.

use serde::{Deserialize, Serialize};

/// Player number (1-based, up to 6 players).
pub type PlayerId = u8;

/// Dense index of a territory in the world table.
pub type TerritoryId = u16;

/// Dense index of a continent in the world table.
pub type ContinentId = u8;

/// Display colors for players.
///
/// Colors are keyed by the original player id and never reassigned, even
/// after a player is eliminated from the rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl PlayerColor {
    /// Get the default color for a player id.
    pub const fn default_for_player(id: PlayerId) -> PlayerColor {
        match id % 6 {
            1 => PlayerColor::Red,
            2 => PlayerColor::Blue,
            3 => PlayerColor::Green,
            4 => PlayerColor::Yellow,
            5 => PlayerColor::Purple,
            _ => PlayerColor::Orange,
        }
    }

    /// Get all color variants in player order.
    pub const fn all() -> &'static [PlayerColor] {
        &[
            PlayerColor::Red,
            PlayerColor::Blue,
            PlayerColor::Green,
            PlayerColor::Yellow,
            PlayerColor::Purple,
            PlayerColor::Orange,
        ]
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerColor::Red => write!(f, "Red"),
            PlayerColor::Blue => write!(f, "Blue"),
            PlayerColor::Green => write!(f, "Green"),
            PlayerColor::Yellow => write!(f, "Yellow"),
            PlayerColor::Purple => write!(f, "Purple"),
            PlayerColor::Orange => write!(f, "Orange"),
        }
    }
}
