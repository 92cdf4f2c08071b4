//! Army placement during setup and reinforcement.
//!
//! The remaining-allotment bookkeeping is a tagged union keyed by the
//! game phase: a per-player mapping while everyone is placing their
//! starting armies, a single scalar while one player spends their turn's
//! reinforcements. Callers never have to infer which representation is in
//! play from control flow.

use crate::engine::{AwaitKind, GameEngine, GamePhase};
use crate::error::GameError;
use crate::types::{PlayerId, TerritoryId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Armies still to be placed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Allotment {
    /// No placement in progress.
    Inactive,
    /// Initial placement: armies remaining per player.
    Initial(BTreeMap<PlayerId, u32>),
    /// Reinforcement: armies remaining for the current player.
    Turn(u32),
}

impl Allotment {
    /// Build the initial-placement mapping, giving every player in the
    /// rotation the same starting count.
    pub fn initial(players: &[PlayerId], per_player: u32) -> Self {
        Allotment::Initial(players.iter().map(|&p| (p, per_player)).collect())
    }

    /// Armies the given player may still place.
    pub fn remaining(&self, player: PlayerId) -> u32 {
        match self {
            Allotment::Inactive => 0,
            Allotment::Initial(map) => map.get(&player).copied().unwrap_or(0),
            Allotment::Turn(n) => *n,
        }
    }

    /// Armies left to place across all players.
    pub fn total_remaining(&self) -> u32 {
        match self {
            Allotment::Inactive => 0,
            Allotment::Initial(map) => map.values().sum(),
            Allotment::Turn(n) => *n,
        }
    }

    /// Forfeit everything the player had left to place.
    pub(crate) fn clear(&mut self, player: PlayerId) {
        match self {
            Allotment::Inactive => {}
            Allotment::Initial(map) => {
                map.remove(&player);
            }
            Allotment::Turn(n) => *n = 0,
        }
    }

    pub(crate) fn consume(&mut self, player: PlayerId) {
        match self {
            Allotment::Inactive => {}
            Allotment::Initial(map) => {
                if let Some(n) = map.get_mut(&player) {
                    *n = n.saturating_sub(1);
                }
            }
            Allotment::Turn(n) => *n = n.saturating_sub(1),
        }
    }
}

impl GameEngine {
    /// Place one army for the player.
    ///
    /// With an explicit territory the placement is validated: during
    /// setup an already-garrisoned territory is rejected, and a territory
    /// controlled by someone else is always rejected. Without one, an NPC
    /// (or anyone, in random-placement mode during initial placement)
    /// gets a uniformly random legal candidate; a human without a choice
    /// is a no-op so the caller can retry once input arrives.
    pub(crate) fn place_army(
        &mut self,
        player: PlayerId,
        territory: Option<TerritoryId>,
    ) -> Result<(), GameError> {
        if self.ctx.allotment.remaining(player) == 0 {
            return Err(GameError::NoArmiesRemaining(player));
        }
        let target = match territory {
            Some(t) => {
                if !self.world.contains(t) {
                    return Err(GameError::UnknownTerritory(t.to_string()));
                }
                if !self.world.all_claimed() && self.world.territory(t).armies > 0 {
                    return Err(GameError::TerritoryAlreadyClaimedDuringSetup(t));
                }
                if let Some(owner) = self.world.territory(t).owner {
                    if owner != player {
                        return Err(GameError::NotYourTerritory {
                            player,
                            territory: t,
                        });
                    }
                }
                t
            }
            None => {
                if !self.places_automatically(player) {
                    return Ok(());
                }
                let candidates: Vec<TerritoryId> = if !self.world.all_claimed() {
                    self.world.unclaimed().collect()
                } else {
                    self.world.territories_owned_by(player).collect()
                };
                if candidates.is_empty() {
                    return Err(GameError::NoLegalMoves(player));
                }
                candidates[self.rng.gen_range(0..candidates.len())]
            }
        };
        self.world.place_one(target, player);
        self.ctx.allotment.consume(player);
        self.notify_territory(target);
        Ok(())
    }

    /// Does this player place without being asked? NPCs always do; humans
    /// do during initial placement when random placement is enabled.
    pub(crate) fn places_automatically(&self, player: PlayerId) -> bool {
        !self.settings.is_human(player)
            || (self.settings.random_placement && self.phase == GamePhase::InitialPlacement)
    }

    /// One step of the initial-placement loop. Returns false when the
    /// engine must wait for a human to choose a territory.
    pub(crate) fn initial_placement_step(&mut self) -> bool {
        if self.ctx.allotment.total_remaining() == 0 {
            self.begin_play();
            return true;
        }
        let player = self.ctx.current_player;
        if self.ctx.allotment.remaining(player) == 0 {
            self.ctx.current_player = self.roster.next_after(player);
            return true;
        }
        if self.places_automatically(player) {
            // A player with no legal candidate forfeits their remaining
            // allotment; otherwise the loop would revisit them forever.
            if self.place_army(player, None).is_err() {
                self.ctx.allotment.clear(player);
            }
            self.ctx.current_player = self.roster.next_after(player);
            true
        } else {
            self.suspend(AwaitKind::Placement);
            false
        }
    }

    /// One step of the reinforcement-placement loop for the current
    /// player. Returns false when a human must choose.
    pub(crate) fn reinforcement_step(&mut self) -> bool {
        let player = self.ctx.current_player;
        if self.ctx.allotment.remaining(player) == 0 {
            self.enter_attack();
            return true;
        }
        if self.settings.is_human(player) {
            self.suspend(AwaitKind::Placement);
            false
        } else {
            if self.place_army(player, None).is_err() {
                self.enter_attack();
            }
            true
        }
    }
}
