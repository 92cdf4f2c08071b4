//! Outbound notifications for the presentation layer.
//!
//! The engine appends notifications to an internal queue as state
//! changes; the UI drains the queue after each entry point returns and
//! renders accordingly. Everything is serializable so a host can forward
//! the stream across a process boundary.

use crate::combat::DiceRollOutcome;
use crate::engine::{GamePhase, TurnPhase};
use crate::types::{PlayerId, TerritoryId};
use serde::{Deserialize, Serialize};

/// How the game ended, from the point of view of the distinguished human
/// player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// The given player is the last one in the rotation.
    Win(PlayerId),
    /// The human player was eliminated.
    Loss,
}

/// A state-change notification for the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// Fired after every placement, combat round, and invasion.
    TerritoryUpdated {
        territory: TerritoryId,
        owner: Option<PlayerId>,
        armies: u32,
    },
    /// Fired on every state/phase transition.
    PhaseChanged {
        phase: GamePhase,
        turn_phase: Option<TurnPhase>,
        current_player: Option<PlayerId>,
    },
    /// Fired after every combat round, and after the first-player roll
    /// (with one die per player in `attacker` and no outcome).
    DiceRolled {
        attacker: Vec<u8>,
        defender: Vec<u8>,
        outcome: Option<DiceRollOutcome>,
    },
    /// Fired once when the game ends; no further notifications follow.
    GameOver { result: GameResult },
}
