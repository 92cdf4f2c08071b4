//! Game settings and configuration.

use crate::types::PlayerId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest supported player count.
pub const MIN_PLAYERS: u8 = 2;

/// Largest supported player count.
pub const MAX_PLAYERS: u8 = 6;

/// Configuration for a game session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSettings {
    /// Number of players (2-6).
    pub player_count: u8,
    /// The distinguished human-controlled player, if any. Every other
    /// player is an NPC. `None` runs an all-NPC game.
    pub human_player: Option<PlayerId>,
    /// Place initial armies at random instead of asking each player.
    pub random_placement: bool,
    /// NPC attack phases run to exhaustion in a single entry point. When
    /// false the NPC performs one attack round per `advance_ai` call so
    /// the presentation layer can pace the action.
    pub exhaustive_npc_attacks: bool,
    /// End the game after this many full rotations, awarding the win to
    /// the largest territory holder (0 = unlimited).
    pub max_rounds: u32,
}

impl GameSettings {
    /// Create default settings for the given player count: player 1 is
    /// human, placement is manual, NPC attacks run to exhaustion.
    pub fn new(player_count: u8) -> Self {
        Self {
            player_count,
            human_player: Some(1),
            random_placement: false,
            exhaustive_npc_attacks: true,
            max_rounds: 0,
        }
    }

    /// Settings for a game with no human player, useful for simulations.
    pub fn all_npc(player_count: u8) -> Self {
        Self {
            player_count,
            human_player: None,
            random_placement: true,
            exhaustive_npc_attacks: true,
            max_rounds: 500,
        }
    }

    /// Validate settings and return any errors.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.player_count < MIN_PLAYERS {
            return Err(SettingsError::TooFewPlayers);
        }
        if self.player_count > MAX_PLAYERS {
            return Err(SettingsError::TooManyPlayers);
        }
        if let Some(human) = self.human_player {
            if human == 0 || human > self.player_count {
                return Err(SettingsError::HumanPlayerOutOfRange);
            }
        }
        Ok(())
    }

    /// Starting armies per player during initial placement, keyed by the
    /// configured player count (standard board-game table).
    pub const fn initial_armies_per_player(&self) -> u32 {
        match self.player_count {
            2 => 40,
            3 => 35,
            4 => 30,
            5 => 25,
            _ => 20,
        }
    }

    /// Is this player id controlled by a human?
    pub fn is_human(&self, player: PlayerId) -> bool {
        self.human_player == Some(player)
    }
}

/// Validation errors for game settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("at least {MIN_PLAYERS} players are required")]
    TooFewPlayers,
    #[error("at most {MAX_PLAYERS} players are supported")]
    TooManyPlayers,
    #[error("human player id is outside the configured player range")]
    HumanPlayerOutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        for count in MIN_PLAYERS..=MAX_PLAYERS {
            assert!(GameSettings::new(count).validate().is_ok());
        }
    }

    #[test]
    fn test_player_count_bounds() {
        assert_eq!(
            GameSettings::new(1).validate(),
            Err(SettingsError::TooFewPlayers)
        );
        assert_eq!(
            GameSettings::new(7).validate(),
            Err(SettingsError::TooManyPlayers)
        );
    }

    #[test]
    fn test_human_player_range() {
        let mut settings = GameSettings::new(3);
        settings.human_player = Some(4);
        assert_eq!(
            settings.validate(),
            Err(SettingsError::HumanPlayerOutOfRange)
        );
        settings.human_player = Some(0);
        assert_eq!(
            settings.validate(),
            Err(SettingsError::HumanPlayerOutOfRange)
        );
        settings.human_player = None;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_initial_army_table() {
        assert_eq!(GameSettings::new(2).initial_armies_per_player(), 40);
        assert_eq!(GameSettings::new(3).initial_armies_per_player(), 35);
        assert_eq!(GameSettings::new(4).initial_armies_per_player(), 30);
        assert_eq!(GameSettings::new(5).initial_armies_per_player(), 25);
        assert_eq!(GameSettings::new(6).initial_armies_per_player(), 20);
    }
}
