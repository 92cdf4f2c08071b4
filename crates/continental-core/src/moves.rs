//! Move legality rules and heuristic move selection for NPC players.
//!
//! A [`Move`] is a plain value produced by the selector functions or by
//! human input and consumed immediately by the combat resolver; it is
//! never aliased through shared state.

use crate::map::WorldMap;
use crate::types::{PlayerId, TerritoryId};
use serde::{Deserialize, Serialize};

/// What a move does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Dice-resolved attack on an adjacent enemy territory.
    Attack,
    /// Relocation of armies between two friendly territories.
    NonCombatTransfer,
}

/// A source/target territory pair plus the kind of move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub kind: MoveKind,
}

/// Is the move legal? Both kinds require adjacency and at least two
/// armies on the source; attacks require different controllers, transfers
/// the same controller.
pub fn is_valid_move(world: &WorldMap, from: TerritoryId, to: TerritoryId, attacking: bool) -> bool {
    if from == to || !world.are_neighbors(from, to) {
        return false;
    }
    let source = world.territory(from);
    let target = world.territory(to);
    if source.armies < 2 || source.owner.is_none() {
        return false;
    }
    if attacking {
        source.owner != target.owner
    } else {
        source.owner == target.owner
    }
}

/// First attack the NPC heuristic finds: a deterministic scan over the
/// player's territories in world iteration order, and over each one's
/// neighbors, returning the first pair where the source outnumbers the
/// target and the attack is legal. Greedy, not globally optimal.
pub fn next_ai_attack(world: &WorldMap, player: PlayerId) -> Option<Move> {
    for from in world.territories_owned_by(player) {
        let source = world.territory(from);
        for &to in &source.neighbors {
            if source.armies > world.territory(to).armies && is_valid_move(world, from, to, true) {
                return Some(Move {
                    from,
                    to,
                    kind: MoveKind::Attack,
                });
            }
        }
    }
    None
}

/// First legal non-combat transfer, found with the same scan pattern as
/// [`next_ai_attack`].
pub fn next_ai_non_combat_move(world: &WorldMap, player: PlayerId) -> Option<Move> {
    for from in world.territories_owned_by(player) {
        for &to in &world.territory(from).neighbors {
            if is_valid_move(world, from, to, false) {
                return Some(Move {
                    from,
                    to,
                    kind: MoveKind::NonCombatTransfer,
                });
            }
        }
    }
    None
}

/// Does the player have anything legal to do this phase? For attacks this
/// requires a weaker adjacent enemy somewhere; otherwise any garrisoned
/// territory counts. A false result means the phase must auto-advance.
pub fn has_any_legal_move(world: &WorldMap, player: PlayerId, attacking: bool) -> bool {
    if attacking {
        next_ai_attack(world, player).is_some()
    } else {
        world
            .territories_owned_by(player)
            .any(|t| world.territory(t).armies > 0)
    }
}
