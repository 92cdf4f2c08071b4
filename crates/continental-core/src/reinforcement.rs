//! Per-turn reinforcement allotment.

use crate::map::WorldMap;
use crate::types::PlayerId;

/// Every player receives at least this many armies each turn.
pub const MIN_REINFORCEMENT_ARMIES: u32 = 3;

/// Armies granted to a player at the start of their turn:
/// `max(MIN, ceil(owned / 3) + bonuses of fully controlled continents)`.
///
/// Pure function of current world state; no side effects.
pub fn reinforcement_armies(world: &WorldMap, player: PlayerId) -> u32 {
    let owned = world.owned_count(player) as u32;
    let from_territories = owned.div_ceil(3);
    let from_continents = world.controlled_continent_bonus(player);
    (from_territories + from_continents).max(MIN_REINFORCEMENT_ARMIES)
}
