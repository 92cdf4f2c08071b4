//! Dice-based combat resolution.
//!
//! An attack is settled one round at a time: each side rolls its dice,
//! the sorted dice are compared pairwise, and ties go to the defender.
//! When the defending territory is emptied the attacker invades, moving
//! half its armies in and taking control.

use crate::map::WorldMap;
use crate::types::{PlayerId, TerritoryId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Result of a single combat round: the dice each side rolled and the
/// armies each side lost. Produced and consumed within one resolution
/// call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollOutcome {
    /// Attacker dice, in rolled order.
    pub attacker: Vec<u8>,
    /// Defender dice, in rolled order.
    pub defender: Vec<u8>,
    /// Dice lost by the attacker (one army per lost die).
    pub attacker_losses: u32,
    /// Dice lost by the defender.
    pub defender_losses: u32,
}

/// How many dice each side rolls: the attacker `min(3, armies - 1)`, the
/// defender `min(2, armies)`.
pub fn dice_per_side(attacker_armies: u32, defender_armies: u32) -> (u8, u8) {
    let attacker = attacker_armies.saturating_sub(1).min(3) as u8;
    let defender = defender_armies.min(2) as u8;
    (attacker, defender)
}

/// Roll `n` independent dice, each uniform in 1..=6.
pub fn roll_dice<R: Rng>(rng: &mut R, n: u8) -> Vec<u8> {
    (0..n).map(|_| rng.gen_range(1..=6)).collect()
}

/// Compare both sides' dice and tally losses.
///
/// Dice are sorted descending and compared pairwise up to the shorter
/// side's count; the higher die wins its pair and **ties are won by the
/// defender**.
pub fn resolve_combat_round(attacker: Vec<u8>, defender: Vec<u8>) -> DiceRollOutcome {
    let mut attacker_sorted = attacker.clone();
    let mut defender_sorted = defender.clone();
    attacker_sorted.sort_unstable_by(|a, b| b.cmp(a));
    defender_sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut attacker_losses = 0;
    let mut defender_losses = 0;
    for (a, d) in attacker_sorted.iter().zip(defender_sorted.iter()) {
        if a > d {
            defender_losses += 1;
        } else {
            attacker_losses += 1;
        }
    }

    DiceRollOutcome {
        attacker,
        defender,
        attacker_losses,
        defender_losses,
    }
}

/// Subtract the round's losses from both territories. The dice counts
/// guarantee neither count goes negative and the attacker retains at
/// least one army.
pub(crate) fn apply_round(
    world: &mut WorldMap,
    from: TerritoryId,
    to: TerritoryId,
    outcome: &DiceRollOutcome,
) {
    let source = world.territory_mut(from);
    source.armies = source.armies.saturating_sub(outcome.attacker_losses);
    let target = world.territory_mut(to);
    target.armies = target.armies.saturating_sub(outcome.defender_losses);
}

/// Take control of an emptied territory, moving `round(armies / 2)` in
/// from the attacking territory (the attacker always keeps at least one
/// army behind). Returns the number of armies transferred.
pub(crate) fn invade(world: &mut WorldMap, from: TerritoryId, to: TerritoryId) -> u32 {
    let attacker_armies = world.territory(from).armies;
    let owner = world.territory(from).owner;
    let transferred = ((attacker_armies + 1) / 2).min(attacker_armies.saturating_sub(1));

    let source = world.territory_mut(from);
    source.armies -= transferred;
    let target = world.territory_mut(to);
    target.owner = owner;
    target.armies = transferred;
    transferred
}

/// Decide who goes first: one die per player, re-rolled as a batch until
/// all values are distinct, highest value wins. Returns the winning
/// player id and the final batch of dice in player-id order.
pub fn roll_first_player<R: Rng>(rng: &mut R, player_count: u8) -> (PlayerId, Vec<u8>) {
    loop {
        let dice = roll_dice(rng, player_count);
        let mut seen = [false; 7];
        let mut distinct = true;
        for &d in &dice {
            if seen[d as usize] {
                distinct = false;
                break;
            }
            seen[d as usize] = true;
        }
        if !distinct {
            continue;
        }
        let winner = dice
            .iter()
            .enumerate()
            .max_by_key(|(_, &d)| d)
            .map(|(i, _)| i as PlayerId + 1)
            .unwrap_or(1);
        return (winner, dice);
    }
}
