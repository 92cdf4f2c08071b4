//! Errors returned by the rules engine.

use crate::settings::SettingsError;
use crate::types::{PlayerId, TerritoryId};
use thiserror::Error;

/// Errors that can occur during game operations.
///
/// All variants are recoverable: a failed entry point leaves the engine
/// state untouched. `NoLegalMoves` is informational rather than a true
/// failure; it reports that the phase auto-advanced because the player had
/// nothing legal to do.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// The operation was invoked in the wrong game state or turn phase.
    #[error("operation is not valid in the current game state")]
    InvalidStateTransition,
    /// The player has exhausted their placement allotment.
    #[error("player {0} has no armies remaining to place")]
    NoArmiesRemaining(PlayerId),
    /// During setup, the chosen territory already holds an army.
    #[error("territory {0} is already claimed during setup")]
    TerritoryAlreadyClaimedDuringSetup(TerritoryId),
    /// The territory belongs to another player.
    #[error("territory {territory} is not controlled by player {player}")]
    NotYourTerritory {
        player: PlayerId,
        territory: TerritoryId,
    },
    /// The submitted move fails the validity rules.
    #[error("move is not legal")]
    IllegalMove,
    /// The player has no legal move; the turn phase has auto-advanced.
    #[error("player {0} has no legal moves")]
    NoLegalMoves(PlayerId),
    /// A territory or continent name in the map configuration resolves to
    /// nothing.
    #[error("unknown territory `{0}` in map configuration")]
    UnknownTerritory(String),
    /// A continent reference in the map configuration resolves to nothing.
    #[error("unknown continent `{0}` in map configuration")]
    UnknownContinent(String),
    /// Duplicate territory or continent name in the map configuration.
    #[error("duplicate name `{0}` in map configuration")]
    DuplicateName(String),
    /// The engine is suspended waiting for input and cannot accept other
    /// entry points until it is resumed.
    #[error("engine is awaiting input (resume token {0})")]
    AwaitingInput(u64),
    /// A resume call carried a token that does not match the suspension.
    #[error("resume token {given} does not match pending token {expected}")]
    WrongResumeToken { given: u64, expected: u64 },
    /// The game settings failed validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
