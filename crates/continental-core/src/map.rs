//! The world model: a static territory/continent graph plus per-territory
//! mutable state (controller and army count).
//!
//! The graph is supplied as name-keyed configuration records at game
//! configuration time and resolved into dense indices for cheap lookups.
//! Only the placement engine and the combat resolver mutate territory
//! state, and only through the methods here.

use crate::error::GameError;
use crate::types::{ContinentId, PlayerId, TerritoryId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration record for one territory, as supplied by the host.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TerritoryDef {
    /// Unique display name.
    pub name: String,
    /// Name of the continent this territory belongs to.
    pub continent: String,
    /// Names of adjacent territories.
    pub neighbors: Vec<String>,
}

impl TerritoryDef {
    /// Convenience constructor for static map data.
    pub fn new(name: &str, continent: &str, neighbors: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            continent: continent.to_string(),
            neighbors: neighbors.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Configuration record for one continent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContinentDef {
    /// Unique display name.
    pub name: String,
    /// Reinforcement bonus granted for controlling every member territory.
    pub bonus: u32,
}

impl ContinentDef {
    /// Convenience constructor for static map data.
    pub fn new(name: &str, bonus: u32) -> Self {
        Self {
            name: name.to_string(),
            bonus,
        }
    }
}

/// A single territory on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    /// Unique display name.
    pub name: String,
    /// The continent this territory belongs to.
    pub continent: ContinentId,
    /// Adjacent territories.
    pub neighbors: Vec<TerritoryId>,
    /// The player currently controlling this territory. `None` only
    /// before the world has been fully claimed during setup.
    pub owner: Option<PlayerId>,
    /// Number of armies stationed here.
    pub armies: u32,
}

/// A fixed group of territories granting a reinforcement bonus when fully
/// controlled. Immutable after load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continent {
    /// Unique display name.
    pub name: String,
    /// Reinforcement bonus for full control.
    pub bonus: u32,
    /// Member territories, derived from the territory definitions.
    pub members: Vec<TerritoryId>,
}

/// The resolved world: territory table, continent table, and the running
/// claimed-territory counter used during setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMap {
    territories: Vec<Territory>,
    continents: Vec<Continent>,
    claimed: u16,
}

impl WorldMap {
    /// Resolve name-keyed configuration records into a world map.
    ///
    /// Every neighbor and continent reference must name a defined entry.
    /// Adjacency is treated as undirected: if either side lists the other,
    /// both ends get the edge.
    pub fn from_defs(
        territory_defs: &[TerritoryDef],
        continent_defs: &[ContinentDef],
    ) -> Result<WorldMap, GameError> {
        let mut continent_index: HashMap<&str, ContinentId> = HashMap::new();
        let mut continents: Vec<Continent> = Vec::with_capacity(continent_defs.len());
        for def in continent_defs {
            if continent_index
                .insert(def.name.as_str(), continents.len() as ContinentId)
                .is_some()
            {
                return Err(GameError::DuplicateName(def.name.clone()));
            }
            continents.push(Continent {
                name: def.name.clone(),
                bonus: def.bonus,
                members: Vec::new(),
            });
        }

        let mut territory_index: HashMap<&str, TerritoryId> = HashMap::new();
        for (i, def) in territory_defs.iter().enumerate() {
            if territory_index
                .insert(def.name.as_str(), i as TerritoryId)
                .is_some()
            {
                return Err(GameError::DuplicateName(def.name.clone()));
            }
        }

        let mut territories: Vec<Territory> = Vec::with_capacity(territory_defs.len());
        for (i, def) in territory_defs.iter().enumerate() {
            let continent = *continent_index
                .get(def.continent.as_str())
                .ok_or_else(|| GameError::UnknownContinent(def.continent.clone()))?;
            continents[continent as usize].members.push(i as TerritoryId);
            let mut neighbors = Vec::with_capacity(def.neighbors.len());
            for name in &def.neighbors {
                let id = *territory_index
                    .get(name.as_str())
                    .ok_or_else(|| GameError::UnknownTerritory(name.clone()))?;
                neighbors.push(id);
            }
            territories.push(Territory {
                name: def.name.clone(),
                continent,
                neighbors,
                owner: None,
                armies: 0,
            });
        }

        // Symmetrize adjacency so a one-sided listing still yields an edge
        // in both directions.
        for from in 0..territories.len() {
            let neighbors = territories[from].neighbors.clone();
            for to in neighbors {
                let back = &mut territories[to as usize].neighbors;
                if !back.contains(&(from as TerritoryId)) {
                    back.push(from as TerritoryId);
                }
            }
        }

        Ok(WorldMap {
            territories,
            continents,
            claimed: 0,
        })
    }

    /// Number of territories on the board.
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    /// Is the board empty? Only true for a degenerate configuration.
    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// All territory ids in world iteration order.
    pub fn ids(&self) -> std::ops::Range<TerritoryId> {
        0..self.territories.len() as TerritoryId
    }

    /// Get a territory by id. Panics on an out-of-range id, which cannot
    /// be produced through `find`.
    pub fn territory(&self, id: TerritoryId) -> &Territory {
        &self.territories[id as usize]
    }

    pub(crate) fn territory_mut(&mut self, id: TerritoryId) -> &mut Territory {
        &mut self.territories[id as usize]
    }

    /// Is this a valid territory id for this world?
    pub fn contains(&self, id: TerritoryId) -> bool {
        (id as usize) < self.territories.len()
    }

    /// Look up a territory id by name.
    pub fn find(&self, name: &str) -> Option<TerritoryId> {
        self.territories
            .iter()
            .position(|t| t.name == name)
            .map(|i| i as TerritoryId)
    }

    /// All continents.
    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    /// Are two territories adjacent?
    pub fn are_neighbors(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self.territory(a).neighbors.contains(&b)
    }

    /// Territory ids controlled by the given player, in world iteration
    /// order.
    pub fn territories_owned_by(&self, player: PlayerId) -> impl Iterator<Item = TerritoryId> + '_ {
        self.territories
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.owner == Some(player))
            .map(|(i, _)| i as TerritoryId)
    }

    /// Number of territories controlled by the given player.
    pub fn owned_count(&self, player: PlayerId) -> usize {
        self.territories
            .iter()
            .filter(|t| t.owner == Some(player))
            .count()
    }

    /// Territory ids with no controller yet.
    pub fn unclaimed(&self) -> impl Iterator<Item = TerritoryId> + '_ {
        self.territories
            .iter()
            .enumerate()
            .filter(|(_, t)| t.owner.is_none())
            .map(|(i, _)| i as TerritoryId)
    }

    /// A continent is controlled iff every member territory's controller
    /// equals the player.
    pub fn is_continent_controlled_by(&self, continent: ContinentId, player: PlayerId) -> bool {
        let continent = &self.continents[continent as usize];
        !continent.members.is_empty()
            && continent
                .members
                .iter()
                .all(|&t| self.territory(t).owner == Some(player))
    }

    /// Sum of bonuses for every continent fully controlled by the player.
    pub fn controlled_continent_bonus(&self, player: PlayerId) -> u32 {
        self.continents
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_continent_controlled_by(*i as ContinentId, player))
            .map(|(_, c)| c.bonus)
            .sum()
    }

    /// Number of territories claimed so far during setup.
    pub fn claimed_count(&self) -> u16 {
        self.claimed
    }

    /// Has every territory been claimed? Once true this never reverts,
    /// since controllers change hands but are never cleared mid-game.
    pub fn all_claimed(&self) -> bool {
        self.claimed as usize == self.territories.len()
    }

    /// Place a single army for the player, claiming the territory if it
    /// had no controller. Setting the controller is idempotent when the
    /// player already holds the territory.
    pub(crate) fn place_one(&mut self, id: TerritoryId, player: PlayerId) {
        let territory = &mut self.territories[id as usize];
        if territory.owner.is_none() {
            self.claimed += 1;
        }
        territory.owner = Some(player);
        territory.armies += 1;
    }

    /// Total armies currently on the board.
    pub fn total_armies(&self) -> u64 {
        self.territories.iter().map(|t| t.armies as u64).sum()
    }

    /// Zero all armies and clear all controllers for a new game.
    pub fn reset(&mut self) {
        for territory in &mut self.territories {
            territory.owner = None;
            territory.armies = 0;
        }
        self.claimed = 0;
    }
}

pub mod classic;
