//! Player registry: the ordered active-player rotation, colors, and
//! elimination handling.

use crate::map::WorldMap;
use crate::settings::GameSettings;
use crate::types::{PlayerColor, PlayerId};
use serde::{Deserialize, Serialize};

/// A player in the game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Player number (1-based).
    pub id: PlayerId,
    /// Display color, keyed by the original id and never reassigned.
    pub color: PlayerColor,
    /// Human-controlled? All other players are NPCs.
    pub is_human: bool,
    /// False once eliminated from the rotation.
    pub alive: bool,
}

impl Player {
    /// Create a new player.
    pub fn new(id: PlayerId, is_human: bool) -> Self {
        Self {
            id,
            color: PlayerColor::default_for_player(id),
            is_human,
            alive: true,
        }
    }
}

/// The player registry: every player ever created plus the active
/// rotation. Eliminated players stay in the registry (their colors remain
/// assigned) but leave the rotation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
    rotation: Vec<PlayerId>,
}

impl Roster {
    /// Build the registry from the configured player count. The rotation
    /// starts in ascending id order; `rotate_to_first` reorders it once
    /// the first player has been rolled.
    pub fn new(settings: &GameSettings) -> Self {
        let players: Vec<Player> = (1..=settings.player_count)
            .map(|id| Player::new(id, settings.is_human(id)))
            .collect();
        let rotation = players.iter().map(|p| p.id).collect();
        Self { players, rotation }
    }

    /// Get a player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// All players ever created, eliminated ones included.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The active rotation, in turn order.
    pub fn rotation(&self) -> &[PlayerId] {
        &self.rotation
    }

    /// Is this player still in the rotation?
    pub fn is_active(&self, id: PlayerId) -> bool {
        self.rotation.contains(&id)
    }

    /// Reorder the rotation to start from the given player, keeping the
    /// ascending-id wrap direction.
    pub fn rotate_to_first(&mut self, first: PlayerId) {
        if let Some(pos) = self.rotation.iter().position(|&p| p == first) {
            self.rotation.rotate_left(pos);
        }
    }

    /// The next active player after the given one, wrapping. Returns the
    /// same id if it is the only one left (or not in the rotation).
    pub fn next_after(&self, id: PlayerId) -> PlayerId {
        match self.rotation.iter().position(|&p| p == id) {
            Some(pos) => self.rotation[(pos + 1) % self.rotation.len()],
            None => self.rotation.first().copied().unwrap_or(id),
        }
    }

    /// Remove a player from the rotation and mark them dead. The player
    /// record and its color assignment stay.
    pub fn eliminate(&mut self, id: PlayerId) {
        self.rotation.retain(|&p| p != id);
        if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
            player.alive = false;
        }
    }

    /// Remove every player owning zero territories. Repeats until a pass
    /// removes nobody, since removal shifts rotation positions. Returns
    /// the eliminated ids in removal order.
    pub fn remove_dead_players(&mut self, world: &WorldMap) -> Vec<PlayerId> {
        let mut removed = Vec::new();
        loop {
            let dead = self
                .rotation
                .iter()
                .copied()
                .find(|&p| world.owned_count(p) == 0);
            match dead {
                Some(id) => {
                    self.eliminate(id);
                    removed.push(id);
                }
                None => break,
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{ContinentDef, TerritoryDef, WorldMap};

    fn roster(count: u8) -> Roster {
        Roster::new(&GameSettings::new(count))
    }

    #[test]
    fn test_roster_creation() {
        let roster = roster(3);
        assert_eq!(roster.rotation(), &[1, 2, 3]);
        assert!(roster.player(1).unwrap().is_human);
        assert!(!roster.player(2).unwrap().is_human);
        assert!(roster.player(4).is_none());
    }

    #[test]
    fn test_rotation_wraps_ascending() {
        let roster = roster(3);
        assert_eq!(roster.next_after(1), 2);
        assert_eq!(roster.next_after(3), 1);
    }

    #[test]
    fn test_rotate_to_first() {
        let mut roster = roster(4);
        roster.rotate_to_first(3);
        assert_eq!(roster.rotation(), &[3, 4, 1, 2]);
        assert_eq!(roster.next_after(2), 3);
    }

    #[test]
    fn test_eliminate_keeps_color() {
        let mut roster = roster(3);
        let color = roster.player(2).unwrap().color;
        roster.eliminate(2);
        assert_eq!(roster.rotation(), &[1, 3]);
        assert!(!roster.is_active(2));
        let player = roster.player(2).unwrap();
        assert!(!player.alive);
        assert_eq!(player.color, color);
    }

    #[test]
    fn test_remove_dead_players_until_stable() {
        let territories = vec![
            TerritoryDef::new("A", "West", &["B"]),
            TerritoryDef::new("B", "West", &["A"]),
        ];
        let continents = vec![ContinentDef::new("West", 2)];
        let mut world = WorldMap::from_defs(&territories, &continents).unwrap();

        let mut roster = roster(4);
        // Players 1 and 3 own land; 2 and 4 own nothing.
        world.place_one(0, 1);
        world.place_one(1, 3);

        let removed = roster.remove_dead_players(&world);
        assert_eq!(removed, vec![2, 4]);
        assert_eq!(roster.rotation(), &[1, 3]);

        // A second pass is stable.
        assert!(roster.remove_dead_players(&world).is_empty());
    }
}
