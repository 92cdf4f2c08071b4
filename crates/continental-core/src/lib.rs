//! Continental Core Library
//!
//! This crate contains the rules engine for Continental, a Risk-style
//! territory-conquest board game: game and turn state, army placement,
//! move legality, dice-based combat resolution, and win/elimination
//! detection.
//!
//! # Design Principles
//!
//! - **No UI dependencies**: rendering, audio, and dialogs live in a
//!   separate presentation layer that drives the engine through its entry
//!   points and consumes its notification stream
//! - **Deterministic**: all dice flow through one seeded RNG, so the same
//!   seed and the same inputs replay the same game
//! - **Serializable**: the whole session can be snapshotted and restored
//!   via serde
//! - **Single actor**: every entry point runs to completion or to an
//!   explicit suspension point before the next is accepted

// Core modules
pub mod error;
pub mod map;
pub mod settings;
pub mod types;

// Game state modules
pub mod engine;
pub mod events;
pub mod player;

// Rules
pub mod combat;
pub mod moves;
pub mod placement;
pub mod reinforcement;

// Re-exports for convenience
pub use combat::{
    dice_per_side, resolve_combat_round, roll_dice, roll_first_player, DiceRollOutcome,
};
pub use engine::{AwaitKind, AwaitingInput, GameEngine, GamePhase, TurnContext, TurnPhase};
pub use error::GameError;
pub use events::{GameResult, Notification};
pub use map::{classic, Continent, ContinentDef, Territory, TerritoryDef, WorldMap};
pub use moves::{
    has_any_legal_move, is_valid_move, next_ai_attack, next_ai_non_combat_move, Move, MoveKind,
};
pub use placement::Allotment;
pub use player::{Player, Roster};
pub use reinforcement::{reinforcement_armies, MIN_REINFORCEMENT_ARMIES};
pub use settings::{GameSettings, SettingsError, MAX_PLAYERS, MIN_PLAYERS};
pub use types::{ContinentId, PlayerColor, PlayerId, TerritoryId};
