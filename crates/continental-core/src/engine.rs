//! The game session and its turn/phase state machine.
//!
//! [`GameEngine`] owns the world model, the player registry, and the turn
//! context; nothing outside this crate mutates them except through the
//! entry points here. There is a single logical actor: every entry point
//! runs to completion or to an explicit suspension point (a human choice
//! or a dice acknowledgement) before another call is accepted, so no
//! locking is needed and two moves are never evaluated against the same
//! state concurrently.

use crate::combat;
use crate::error::GameError;
use crate::events::{GameResult, Notification};
use crate::map::{ContinentDef, TerritoryDef, WorldMap};
use crate::moves::{self, MoveKind};
use crate::placement::Allotment;
use crate::player::Roster;
use crate::reinforcement::reinforcement_armies;
use crate::settings::GameSettings;
use crate::types::{PlayerId, TerritoryId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Top-level game state, advanced strictly forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No configuration yet.
    Setup,
    /// Configured and waiting for `start_game`.
    Ready,
    /// Players are placing their starting armies.
    InitialPlacement,
    /// Turns are running.
    Playing,
}

/// Phase within a player's turn, cycling while the game is `Playing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Reinforcement,
    Attack,
    NonCombat,
    End,
}

/// Mutable per-turn bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnContext {
    /// Whose turn it is (or who places next during initial placement).
    pub current_player: PlayerId,
    /// Full rotations completed plus one.
    pub round: u32,
    /// Player turns taken plus one.
    pub turn: u32,
    /// Armies left to place.
    pub allotment: Allotment,
}

impl TurnContext {
    fn new() -> Self {
        Self {
            current_player: 1,
            round: 0,
            turn: 0,
            allotment: Allotment::Inactive,
        }
    }
}

/// What kind of input the engine is suspended on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AwaitKind {
    /// A human must pick a territory for an army.
    Placement,
    /// A human must submit a move or advance the phase.
    Move,
    /// A human must acknowledge the dice of a resolved attack round.
    DiceAcknowledgement,
}

/// Marker for a suspended operation; the token identifies which
/// suspension a resume call continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwaitingInput {
    pub token: u64,
    pub kind: AwaitKind,
}

/// The rules engine for one game session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEngine {
    pub(crate) settings: GameSettings,
    pub(crate) world: WorldMap,
    pub(crate) roster: Roster,
    pub(crate) phase: GamePhase,
    pub(crate) turn_phase: Option<TurnPhase>,
    pub(crate) ctx: TurnContext,
    /// Seed this session's dice stream was created from.
    seed: [u8; 32],
    pub(crate) rng: ChaCha8Rng,
    notifications: VecDeque<Notification>,
    pending: Option<AwaitingInput>,
    result: Option<GameResult>,
    next_token: u64,
}

impl GameEngine {
    /// Configure a new game: validates the settings, resolves the
    /// territory/continent graph, and builds the player registry. The
    /// engine comes up in the `Ready` phase waiting for `start_game`.
    pub fn new(
        settings: GameSettings,
        territory_defs: &[TerritoryDef],
        continent_defs: &[ContinentDef],
        seed: [u8; 32],
    ) -> Result<Self, GameError> {
        settings.validate()?;
        let world = WorldMap::from_defs(territory_defs, continent_defs)?;
        let roster = Roster::new(&settings);
        Ok(Self {
            settings,
            world,
            roster,
            phase: GamePhase::Ready,
            turn_phase: None,
            ctx: TurnContext::new(),
            seed,
            rng: ChaCha8Rng::from_seed(seed),
            notifications: VecDeque::new(),
            pending: None,
            result: None,
            next_token: 1,
        })
    }

    // ----- Read-only accessors -----

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn world(&self) -> &WorldMap {
        &self.world
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn_phase(&self) -> Option<TurnPhase> {
        self.turn_phase
    }

    pub fn current_player(&self) -> PlayerId {
        self.ctx.current_player
    }

    /// Full rotations completed plus one.
    pub fn round(&self) -> u32 {
        self.ctx.round
    }

    /// Player turns taken plus one.
    pub fn turn(&self) -> u32 {
        self.ctx.turn
    }

    /// Armies left to place, in whichever representation the phase uses.
    pub fn allotment(&self) -> &Allotment {
        &self.ctx.allotment
    }

    /// The suspension the engine is currently waiting on, if any.
    pub fn awaiting(&self) -> Option<AwaitingInput> {
        self.pending
    }

    /// The final result once the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// The seed this session's dice stream was created from.
    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }

    /// Take all queued notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    // ----- Entry points -----

    /// Roll for first player, fix the rotation order, and begin initial
    /// placement. NPC (and random-mode) placements run immediately; the
    /// engine suspends when a human must choose.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Ready {
            return Err(GameError::InvalidStateTransition);
        }
        let (first, dice) = combat::roll_first_player(&mut self.rng, self.settings.player_count);
        self.notify(Notification::DiceRolled {
            attacker: dice,
            defender: Vec::new(),
            outcome: None,
        });
        self.roster.rotate_to_first(first);
        self.ctx.current_player = first;
        self.ctx.round = 1;
        self.ctx.turn = 1;
        self.ctx.allotment = Allotment::initial(
            self.roster.rotation(),
            self.settings.initial_armies_per_player(),
        );
        self.phase = GamePhase::InitialPlacement;
        self.emit_phase_changed();
        self.pump();
        Ok(())
    }

    /// A human places one army during initial placement or reinforcement.
    pub fn submit_placement(&mut self, territory: TerritoryId) -> Result<(), GameError> {
        if self.result.is_some() {
            return Err(GameError::InvalidStateTransition);
        }
        let placing = self.phase == GamePhase::InitialPlacement
            || (self.phase == GamePhase::Playing
                && self.turn_phase == Some(TurnPhase::Reinforcement));
        if !placing {
            return Err(GameError::InvalidStateTransition);
        }
        match self.pending {
            Some(AwaitingInput {
                kind: AwaitKind::Placement,
                ..
            }) => {}
            Some(AwaitingInput {
                token,
                kind: AwaitKind::DiceAcknowledgement,
            }) => return Err(GameError::AwaitingInput(token)),
            _ => return Err(GameError::InvalidStateTransition),
        }
        let player = self.ctx.current_player;
        self.place_army(player, Some(territory))?;
        self.pending = None;
        if self.phase == GamePhase::InitialPlacement {
            self.ctx.current_player = self.roster.next_after(player);
        }
        self.pump();
        Ok(())
    }

    /// A human submits an attack or a non-combat transfer.
    ///
    /// An attack resolves one combat round and then suspends; the
    /// returned token must be passed to [`confirm_dice_roll`] before any
    /// other entry point is accepted. A transfer moves all armies but one
    /// and ends the turn.
    ///
    /// [`confirm_dice_roll`]: GameEngine::confirm_dice_roll
    pub fn submit_move(
        &mut self,
        from: TerritoryId,
        to: TerritoryId,
        kind: MoveKind,
    ) -> Result<Option<u64>, GameError> {
        if self.result.is_some() || self.phase != GamePhase::Playing {
            return Err(GameError::InvalidStateTransition);
        }
        let expected = match kind {
            MoveKind::Attack => TurnPhase::Attack,
            MoveKind::NonCombatTransfer => TurnPhase::NonCombat,
        };
        if self.turn_phase != Some(expected) {
            return Err(GameError::InvalidStateTransition);
        }
        match self.pending {
            Some(AwaitingInput {
                kind: AwaitKind::Move,
                ..
            }) => {}
            Some(AwaitingInput {
                token,
                kind: AwaitKind::DiceAcknowledgement,
            }) => return Err(GameError::AwaitingInput(token)),
            _ => return Err(GameError::InvalidStateTransition),
        }
        if !self.world.contains(from) || !self.world.contains(to) {
            return Err(GameError::IllegalMove);
        }
        let player = self.ctx.current_player;
        if self.world.territory(from).owner != Some(player) {
            return Err(GameError::NotYourTerritory {
                player,
                territory: from,
            });
        }
        if !moves::is_valid_move(&self.world, from, to, kind == MoveKind::Attack) {
            return Err(GameError::IllegalMove);
        }
        self.pending = None;
        match kind {
            MoveKind::Attack => {
                self.resolve_attack_round(from, to);
                if self.result.is_some() {
                    return Ok(None);
                }
                let token = self.suspend(AwaitKind::DiceAcknowledgement);
                Ok(Some(token))
            }
            MoveKind::NonCombatTransfer => {
                self.transfer(from, to);
                self.enter_end();
                self.pump();
                Ok(None)
            }
        }
    }

    /// Acknowledge the dice of the last resolved attack round, resuming
    /// the suspended attack phase. When the player has no legal attack
    /// left the phase auto-advances and `NoLegalMoves` reports it.
    pub fn confirm_dice_roll(&mut self, token: u64) -> Result<(), GameError> {
        match self.pending {
            Some(AwaitingInput {
                token: expected,
                kind: AwaitKind::DiceAcknowledgement,
            }) => {
                if token != expected {
                    return Err(GameError::WrongResumeToken {
                        given: token,
                        expected,
                    });
                }
                self.pending = None;
                if self.turn_phase == Some(TurnPhase::Attack) {
                    let player = self.ctx.current_player;
                    if !moves::has_any_legal_move(&self.world, player, true) {
                        self.enter_non_combat();
                        self.pump();
                        return Err(GameError::NoLegalMoves(player));
                    }
                    self.suspend(AwaitKind::Move);
                }
                Ok(())
            }
            _ => Err(GameError::InvalidStateTransition),
        }
    }

    /// A human declines further action in the current phase: Attack moves
    /// on to NonCombat, NonCombat ends the turn.
    pub fn advance_phase(&mut self) -> Result<(), GameError> {
        if self.result.is_some() || self.phase != GamePhase::Playing {
            return Err(GameError::InvalidStateTransition);
        }
        if let Some(AwaitingInput {
            token,
            kind: AwaitKind::DiceAcknowledgement,
        }) = self.pending
        {
            return Err(GameError::AwaitingInput(token));
        }
        if !self.settings.is_human(self.ctx.current_player) {
            return Err(GameError::InvalidStateTransition);
        }
        match self.turn_phase {
            Some(TurnPhase::Attack) => {
                self.pending = None;
                self.enter_non_combat();
                self.pump();
                Ok(())
            }
            Some(TurnPhase::NonCombat) => {
                self.pending = None;
                self.enter_end();
                self.pump();
                Ok(())
            }
            _ => Err(GameError::InvalidStateTransition),
        }
    }

    /// Perform the next NPC attack step in single-step mode. The
    /// presentation layer calls this on its own pacing timer; each call
    /// is an interruption boundary, never mid-combat-round.
    pub fn advance_ai(&mut self) -> Result<(), GameError> {
        if self.result.is_some()
            || self.phase != GamePhase::Playing
            || self.pending.is_some()
            || self.settings.is_human(self.ctx.current_player)
        {
            return Err(GameError::InvalidStateTransition);
        }
        self.pump();
        Ok(())
    }

    /// Abort the current game and return to `Ready` with the same
    /// configuration. Valid at any suspension or AI interruption
    /// boundary; the world is always left consistent because entry
    /// points never stop mid-combat-round.
    pub fn request_new_game(&mut self) {
        self.world.reset();
        self.roster = Roster::new(&self.settings);
        self.ctx = TurnContext::new();
        self.phase = GamePhase::Ready;
        self.turn_phase = None;
        self.pending = None;
        self.result = None;
        self.notifications.clear();
        self.emit_phase_changed();
    }

    // ----- State machine internals -----

    /// Drive the state machine until it needs input, pauses for pacing,
    /// or the game ends.
    fn pump(&mut self) {
        while self.result.is_none() && self.pending.is_none() {
            let keep_going = match self.phase {
                GamePhase::Setup | GamePhase::Ready => false,
                GamePhase::InitialPlacement => self.initial_placement_step(),
                GamePhase::Playing => match self.turn_phase {
                    Some(TurnPhase::Reinforcement) => self.reinforcement_step(),
                    Some(TurnPhase::Attack) => self.attack_step(),
                    Some(TurnPhase::NonCombat) => self.non_combat_step(),
                    Some(TurnPhase::End) => {
                        self.end_turn_step();
                        true
                    }
                    None => false,
                },
            };
            if !keep_going {
                return;
            }
        }
    }

    /// Initial placement finished; the rotation's first player opens the
    /// first turn.
    pub(crate) fn begin_play(&mut self) {
        self.phase = GamePhase::Playing;
        if let Some(&first) = self.roster.rotation().first() {
            self.ctx.current_player = first;
        }
        self.enter_reinforcement();
    }

    fn enter_reinforcement(&mut self) {
        self.turn_phase = Some(TurnPhase::Reinforcement);
        let armies = reinforcement_armies(&self.world, self.ctx.current_player);
        self.ctx.allotment = Allotment::Turn(armies);
        self.emit_phase_changed();
    }

    pub(crate) fn enter_attack(&mut self) {
        self.turn_phase = Some(TurnPhase::Attack);
        self.emit_phase_changed();
    }

    fn enter_non_combat(&mut self) {
        self.turn_phase = Some(TurnPhase::NonCombat);
        self.emit_phase_changed();
    }

    fn enter_end(&mut self) {
        self.turn_phase = Some(TurnPhase::End);
        self.emit_phase_changed();
    }

    /// One attack-phase step. Humans suspend (or auto-advance when they
    /// have no legal attack); NPCs resolve one round, pausing afterwards
    /// in single-step mode.
    fn attack_step(&mut self) -> bool {
        let player = self.ctx.current_player;
        if self.settings.is_human(player) {
            if !moves::has_any_legal_move(&self.world, player, true) {
                self.enter_non_combat();
                return true;
            }
            self.suspend(AwaitKind::Move);
            return false;
        }
        match moves::next_ai_attack(&self.world, player) {
            None => {
                self.enter_non_combat();
                true
            }
            Some(mv) => {
                self.resolve_attack_round(mv.from, mv.to);
                self.settings.exhaustive_npc_attacks
            }
        }
    }

    /// One non-combat-phase step. An NPC attempts a single transfer,
    /// gated by a die roll above 3 so it fortifies on roughly half of its
    /// turns.
    fn non_combat_step(&mut self) -> bool {
        let player = self.ctx.current_player;
        if self.settings.is_human(player) {
            if !moves::has_any_legal_move(&self.world, player, false) {
                self.enter_end();
                return true;
            }
            self.suspend(AwaitKind::Move);
            return false;
        }
        let gate = combat::roll_dice(&mut self.rng, 1)[0];
        if gate > 3 {
            if let Some(mv) = moves::next_ai_non_combat_move(&self.world, player) {
                self.transfer(mv.from, mv.to);
            }
        }
        self.enter_end();
        true
    }

    /// Advance the rotation, bump the turn counter, bump the round
    /// counter on wrap, and open the next player's reinforcement phase.
    /// When a round limit is configured and exceeded, the largest
    /// territory holder wins instead.
    fn end_turn_step(&mut self) {
        let next = self.roster.next_after(self.ctx.current_player);
        self.ctx.turn += 1;
        if self.roster.rotation().first() == Some(&next) {
            self.ctx.round += 1;
            if self.settings.max_rounds > 0 && self.ctx.round > self.settings.max_rounds {
                self.end_by_territories();
                return;
            }
        }
        self.ctx.current_player = next;
        self.enter_reinforcement();
    }

    /// Round limit reached: whoever holds the most territories wins
    /// (lowest id on a tie).
    fn end_by_territories(&mut self) {
        let leader = self
            .roster
            .rotation()
            .iter()
            .copied()
            .max_by_key(|&p| (self.world.owned_count(p), std::cmp::Reverse(p)));
        if let Some(winner) = leader {
            self.finish(GameResult::Win(winner));
        }
    }

    /// Roll and settle one combat round, invading if the defender was
    /// emptied, then run elimination and winner checks.
    fn resolve_attack_round(&mut self, from: TerritoryId, to: TerritoryId) {
        let (attacker_dice, defender_dice) =
            combat::dice_per_side(self.world.territory(from).armies, self.world.territory(to).armies);
        let attacker = combat::roll_dice(&mut self.rng, attacker_dice);
        let defender = combat::roll_dice(&mut self.rng, defender_dice);
        let outcome = combat::resolve_combat_round(attacker, defender);
        combat::apply_round(&mut self.world, from, to, &outcome);
        self.notify(Notification::DiceRolled {
            attacker: outcome.attacker.clone(),
            defender: outcome.defender.clone(),
            outcome: Some(outcome.clone()),
        });
        self.notify_territory(from);
        self.notify_territory(to);
        if self.world.territory(to).armies == 0 {
            combat::invade(&mut self.world, from, to);
            self.notify_territory(from);
            self.notify_territory(to);
        }
        self.roster.remove_dead_players(&self.world);
        self.check_for_winner();
    }

    /// Move all armies but one between two friendly territories.
    fn transfer(&mut self, from: TerritoryId, to: TerritoryId) {
        let moved = self.world.territory(from).armies.saturating_sub(1);
        self.world.territory_mut(from).armies = 1;
        self.world.territory_mut(to).armies += moved;
        self.notify_territory(from);
        self.notify_territory(to);
    }

    /// Loss when the distinguished human player has left the rotation,
    /// win when exactly one player remains. Runs after every combat
    /// resolution and elimination pass.
    fn check_for_winner(&mut self) {
        if self.result.is_some() {
            return;
        }
        if let Some(human) = self.settings.human_player {
            if !self.roster.is_active(human) {
                self.finish(GameResult::Loss);
                return;
            }
        }
        if self.roster.rotation().len() == 1 {
            let last = self.roster.rotation()[0];
            self.finish(GameResult::Win(last));
        }
    }

    fn finish(&mut self, result: GameResult) {
        self.result = Some(result);
        self.pending = None;
        self.notify(Notification::GameOver { result });
    }

    // ----- Plumbing shared with the placement engine -----

    pub(crate) fn suspend(&mut self, kind: AwaitKind) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        self.pending = Some(AwaitingInput { token, kind });
        token
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }

    pub(crate) fn notify_territory(&mut self, id: TerritoryId) {
        let territory = self.world.territory(id);
        let notification = Notification::TerritoryUpdated {
            territory: id,
            owner: territory.owner,
            armies: territory.armies,
        };
        self.notify(notification);
    }

    fn emit_phase_changed(&mut self) {
        let current_player = match self.phase {
            GamePhase::InitialPlacement | GamePhase::Playing => Some(self.ctx.current_player),
            _ => None,
        };
        let notification = Notification::PhaseChanged {
            phase: self.phase,
            turn_phase: self.turn_phase,
            current_player,
        };
        self.notify(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{ContinentDef, TerritoryDef};

    /// A four-territory line: Alpha - Bravo - Charlie - Delta, split into
    /// two continents.
    fn defs() -> (Vec<TerritoryDef>, Vec<ContinentDef>) {
        let territories = vec![
            TerritoryDef::new("Alpha", "West", &["Bravo"]),
            TerritoryDef::new("Bravo", "West", &["Alpha", "Charlie"]),
            TerritoryDef::new("Charlie", "East", &["Bravo", "Delta"]),
            TerritoryDef::new("Delta", "East", &["Charlie"]),
        ];
        let continents = vec![ContinentDef::new("West", 2), ContinentDef::new("East", 3)];
        (territories, continents)
    }

    fn engine(settings: GameSettings) -> GameEngine {
        let (territories, continents) = defs();
        GameEngine::new(settings, &territories, &continents, [9u8; 32]).unwrap()
    }

    fn claim(engine: &mut GameEngine, id: TerritoryId, owner: PlayerId, armies: u32) {
        engine.world.place_one(id, owner);
        engine.world.territory_mut(id).armies = armies;
    }

    /// Engine mid-game in the human attack phase, suspended on a move.
    fn staged_attack_engine() -> GameEngine {
        let mut engine = engine(GameSettings::new(2));
        claim(&mut engine, 0, 1, 5);
        claim(&mut engine, 1, 1, 4);
        claim(&mut engine, 2, 2, 2);
        claim(&mut engine, 3, 2, 1);
        engine.phase = GamePhase::Playing;
        engine.turn_phase = Some(TurnPhase::Attack);
        engine.ctx.current_player = 1;
        engine.ctx.round = 1;
        engine.ctx.turn = 1;
        engine.suspend(AwaitKind::Move);
        engine
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let (territories, continents) = defs();
        let result = GameEngine::new(GameSettings::new(9), &territories, &continents, [0u8; 32]);
        assert!(matches!(result, Err(GameError::Settings(_))));
    }

    #[test]
    fn test_entry_points_rejected_before_start() {
        let mut engine = engine(GameSettings::new(2));
        assert_eq!(engine.phase(), GamePhase::Ready);
        assert_eq!(
            engine.submit_placement(0),
            Err(GameError::InvalidStateTransition)
        );
        assert_eq!(
            engine.submit_move(0, 1, MoveKind::Attack),
            Err(GameError::InvalidStateTransition)
        );
        assert_eq!(engine.advance_phase(), Err(GameError::InvalidStateTransition));
        assert_eq!(
            engine.confirm_dice_roll(1),
            Err(GameError::InvalidStateTransition)
        );
        assert_eq!(engine.advance_ai(), Err(GameError::InvalidStateTransition));
    }

    #[test]
    fn test_start_game_only_from_ready() {
        let mut engine = engine(GameSettings::all_npc(2));
        assert!(engine.start_game().is_ok());
        assert_eq!(engine.start_game(), Err(GameError::InvalidStateTransition));
    }

    #[test]
    fn test_first_player_roll_reported() {
        let mut engine = engine(GameSettings::new(2));
        engine.start_game().unwrap();
        let notifications = engine.drain_notifications();
        match &notifications[0] {
            Notification::DiceRolled {
                attacker,
                defender,
                outcome,
            } => {
                assert_eq!(attacker.len(), 2);
                assert_ne!(attacker[0], attacker[1]);
                assert!(attacker.iter().all(|&d| (1..=6).contains(&d)));
                assert!(defender.is_empty());
                assert!(outcome.is_none());
            }
            other => panic!("expected the first-player roll, got {:?}", other),
        }
    }

    #[test]
    fn test_all_npc_game_runs_to_completion() {
        let mut engine = engine(GameSettings::all_npc(2));
        engine.start_game().unwrap();
        assert!(engine.is_over());
        assert!(engine.awaiting().is_none());
        let winner = match engine.result() {
            Some(GameResult::Win(p)) => p,
            other => panic!("an all-NPC game must end in a win, got {:?}", other),
        };
        assert!(engine.roster.rotation().contains(&winner));
        let game_overs: Vec<_> = engine
            .drain_notifications()
            .into_iter()
            .filter(|n| matches!(n, Notification::GameOver { .. }))
            .collect();
        assert_eq!(game_overs.len(), 1);
    }

    #[test]
    fn test_human_initial_placement_suspends() {
        let mut engine = engine(GameSettings::new(2));
        engine.start_game().unwrap();
        assert_eq!(engine.phase(), GamePhase::InitialPlacement);
        assert_eq!(engine.current_player(), 1);
        let awaiting = engine.awaiting().unwrap();
        assert_eq!(awaiting.kind, AwaitKind::Placement);
    }

    #[test]
    fn test_human_places_every_starting_army() {
        let mut engine = engine(GameSettings::new(2));
        engine.start_game().unwrap();
        let mut placements = 0;
        for _ in 0..1000 {
            if engine.phase() != GamePhase::InitialPlacement {
                break;
            }
            let target = engine
                .world()
                .unclaimed()
                .next()
                .or_else(|| engine.world().territories_owned_by(1).next())
                .unwrap();
            engine.submit_placement(target).unwrap();
            placements += 1;
        }
        assert_eq!(placements, 40);
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert!(engine.world().all_claimed());
    }

    #[test]
    fn test_setup_rejects_occupied_territory() {
        let mut engine = engine(GameSettings::new(2));
        engine.phase = GamePhase::InitialPlacement;
        engine.ctx.allotment = Allotment::initial(&[1, 2], 5);
        engine.ctx.current_player = 1;
        claim(&mut engine, 0, 2, 1);
        engine.suspend(AwaitKind::Placement);
        assert_eq!(
            engine.submit_placement(0),
            Err(GameError::TerritoryAlreadyClaimedDuringSetup(0))
        );
        assert_eq!(
            engine.submit_placement(99),
            Err(GameError::UnknownTerritory("99".to_string()))
        );
        // The suspension survives a rejected placement so it can be retried.
        assert!(engine.awaiting().is_some());
    }

    #[test]
    fn test_setup_rejects_foreign_territory_once_all_claimed() {
        let mut engine = engine(GameSettings::new(2));
        engine.phase = GamePhase::InitialPlacement;
        engine.ctx.allotment = Allotment::initial(&[1, 2], 5);
        engine.ctx.current_player = 1;
        claim(&mut engine, 0, 1, 1);
        claim(&mut engine, 1, 1, 1);
        claim(&mut engine, 2, 2, 1);
        claim(&mut engine, 3, 2, 1);
        engine.suspend(AwaitKind::Placement);
        assert_eq!(
            engine.submit_placement(2),
            Err(GameError::NotYourTerritory {
                player: 1,
                territory: 2
            })
        );
        assert!(engine.submit_placement(0).is_ok());
        assert_eq!(engine.world().territory(0).armies, 2);
    }

    #[test]
    fn test_placement_requires_remaining_armies() {
        let mut engine = engine(GameSettings::new(2));
        engine.phase = GamePhase::Playing;
        engine.turn_phase = Some(TurnPhase::Reinforcement);
        engine.ctx.allotment = Allotment::Turn(0);
        engine.ctx.current_player = 1;
        claim(&mut engine, 0, 1, 1);
        engine.suspend(AwaitKind::Placement);
        assert_eq!(
            engine.submit_placement(0),
            Err(GameError::NoArmiesRemaining(1))
        );
    }

    #[test]
    fn test_submit_move_validation() {
        let mut engine = staged_attack_engine();
        assert_eq!(
            engine.submit_move(2, 1, MoveKind::Attack),
            Err(GameError::NotYourTerritory {
                player: 1,
                territory: 2
            })
        );
        // Friendly target is not an attack.
        assert_eq!(
            engine.submit_move(0, 1, MoveKind::Attack),
            Err(GameError::IllegalMove)
        );
        // Alpha and Charlie are not adjacent.
        assert_eq!(
            engine.submit_move(0, 2, MoveKind::Attack),
            Err(GameError::IllegalMove)
        );
        // A transfer is not accepted during the attack phase.
        assert_eq!(
            engine.submit_move(1, 0, MoveKind::NonCombatTransfer),
            Err(GameError::InvalidStateTransition)
        );
    }

    #[test]
    fn test_attack_round_suspends_until_acknowledged() {
        let mut engine = staged_attack_engine();
        let before = engine.world().total_armies();
        let token = engine.submit_move(1, 2, MoveKind::Attack).unwrap().unwrap();
        assert_eq!(
            engine.awaiting(),
            Some(AwaitingInput {
                token,
                kind: AwaitKind::DiceAcknowledgement
            })
        );
        // Every other entry point reports the outstanding acknowledgement.
        assert_eq!(
            engine.submit_move(1, 2, MoveKind::Attack),
            Err(GameError::AwaitingInput(token))
        );
        assert_eq!(engine.advance_phase(), Err(GameError::AwaitingInput(token)));
        assert_eq!(
            engine.confirm_dice_roll(token + 999),
            Err(GameError::WrongResumeToken {
                given: token + 999,
                expected: token
            })
        );
        // Dice losses are the only way armies left the board.
        let outcome = engine
            .drain_notifications()
            .into_iter()
            .find_map(|n| match n {
                Notification::DiceRolled {
                    outcome: Some(o), ..
                } => Some(o),
                _ => None,
            })
            .unwrap();
        let losses = (outcome.attacker_losses + outcome.defender_losses) as u64;
        assert_eq!(engine.world().total_armies(), before - losses);
        match engine.confirm_dice_roll(token) {
            Ok(()) => assert_eq!(engine.awaiting().unwrap().kind, AwaitKind::Move),
            Err(GameError::NoLegalMoves(1)) => {
                assert_ne!(engine.turn_phase(), Some(TurnPhase::Attack));
            }
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_confirm_requires_pending_roll() {
        let mut engine = staged_attack_engine();
        assert_eq!(
            engine.confirm_dice_roll(1),
            Err(GameError::InvalidStateTransition)
        );
    }

    #[test]
    fn test_non_combat_transfer_ends_turn() {
        let mut engine = engine(GameSettings::new(2));
        claim(&mut engine, 0, 1, 5);
        claim(&mut engine, 1, 1, 1);
        claim(&mut engine, 2, 2, 1);
        claim(&mut engine, 3, 2, 1);
        engine.phase = GamePhase::Playing;
        engine.turn_phase = Some(TurnPhase::NonCombat);
        engine.ctx.current_player = 1;
        engine.ctx.round = 1;
        engine.ctx.turn = 1;
        engine.suspend(AwaitKind::Move);
        assert_eq!(engine.submit_move(0, 1, MoveKind::NonCombatTransfer), Ok(None));
        assert_eq!(engine.world().territory(0).armies, 1);
        assert_eq!(engine.world().territory(1).armies, 5);
        // The NPC cannot out-stack Bravo from a single reinforcement, so
        // its whole turn runs without combat and play returns to the human.
        assert_eq!(engine.current_player(), 1);
        assert_eq!(engine.round(), 2);
        assert_eq!(engine.turn(), 3);
        assert_eq!(engine.turn_phase(), Some(TurnPhase::Reinforcement));
        assert_eq!(engine.awaiting().unwrap().kind, AwaitKind::Placement);
        // Two owned territories and full control of West: max(3, 1 + 2).
        assert_eq!(engine.allotment(), &Allotment::Turn(3));
    }

    #[test]
    fn test_advance_phase_steps_through_turn() {
        let mut engine = engine(GameSettings::new(2));
        claim(&mut engine, 0, 1, 5);
        claim(&mut engine, 1, 1, 1);
        claim(&mut engine, 2, 2, 1);
        claim(&mut engine, 3, 2, 1);
        engine.phase = GamePhase::Playing;
        engine.turn_phase = Some(TurnPhase::Attack);
        engine.ctx.current_player = 1;
        engine.ctx.round = 1;
        engine.ctx.turn = 1;
        engine.suspend(AwaitKind::Move);
        engine.advance_phase().unwrap();
        assert_eq!(engine.turn_phase(), Some(TurnPhase::NonCombat));
        assert_eq!(engine.awaiting().unwrap().kind, AwaitKind::Move);
        engine.advance_phase().unwrap();
        // The NPC turn runs to completion and the human's next turn opens.
        assert!(!engine.is_over());
        assert_eq!(engine.current_player(), 1);
        assert_eq!(engine.round(), 2);
        assert_eq!(engine.turn_phase(), Some(TurnPhase::Reinforcement));
        assert_eq!(engine.awaiting().unwrap().kind, AwaitKind::Placement);
    }

    #[test]
    fn test_conquering_the_last_territory_wins() {
        let mut engine = engine(GameSettings::new(2));
        claim(&mut engine, 0, 1, 1);
        claim(&mut engine, 1, 1, 1);
        claim(&mut engine, 2, 1, 30);
        claim(&mut engine, 3, 2, 1);
        engine.phase = GamePhase::Playing;
        engine.turn_phase = Some(TurnPhase::Attack);
        engine.ctx.current_player = 1;
        engine.ctx.round = 1;
        engine.ctx.turn = 1;
        engine.suspend(AwaitKind::Move);
        for _ in 0..200 {
            if engine.is_over() {
                break;
            }
            match engine.submit_move(2, 3, MoveKind::Attack).unwrap() {
                Some(token) => engine.confirm_dice_roll(token).unwrap(),
                None => break,
            }
        }
        assert_eq!(engine.result(), Some(GameResult::Win(1)));
        assert_eq!(engine.roster.rotation(), &[1]);
        assert_eq!(engine.world().territory(3).owner, Some(1));
        assert!(engine.world().territory(3).armies >= 1);
    }

    #[test]
    fn test_human_elimination_is_a_loss() {
        let mut engine = engine(GameSettings::new(2));
        claim(&mut engine, 0, 2, 1);
        claim(&mut engine, 1, 2, 1);
        claim(&mut engine, 2, 2, 1);
        claim(&mut engine, 3, 2, 1);
        engine.phase = GamePhase::Playing;
        let world = engine.world.clone();
        engine.roster.remove_dead_players(&world);
        engine.check_for_winner();
        assert_eq!(engine.result(), Some(GameResult::Loss));
    }

    #[test]
    fn test_round_limit_awards_largest_holder() {
        let mut engine = engine(GameSettings::all_npc(2));
        engine.settings.max_rounds = 3;
        claim(&mut engine, 0, 1, 1);
        claim(&mut engine, 1, 1, 1);
        claim(&mut engine, 2, 1, 1);
        claim(&mut engine, 3, 2, 1);
        engine.phase = GamePhase::Playing;
        engine.turn_phase = Some(TurnPhase::End);
        engine.ctx.current_player = 2;
        engine.ctx.round = 3;
        engine.ctx.turn = 6;
        engine.end_turn_step();
        assert_eq!(engine.result(), Some(GameResult::Win(1)));
    }

    #[test]
    fn test_round_limit_tie_goes_to_lowest_id() {
        let mut engine = engine(GameSettings::all_npc(2));
        claim(&mut engine, 0, 1, 1);
        claim(&mut engine, 1, 2, 1);
        claim(&mut engine, 2, 1, 1);
        claim(&mut engine, 3, 2, 1);
        engine.end_by_territories();
        assert_eq!(engine.result(), Some(GameResult::Win(1)));
    }

    #[test]
    fn test_turn_and_round_counters() {
        let mut engine = engine(GameSettings::all_npc(2));
        engine.phase = GamePhase::Playing;
        engine.ctx.current_player = 1;
        engine.ctx.round = 1;
        engine.ctx.turn = 1;
        engine.end_turn_step();
        assert_eq!(engine.current_player(), 2);
        assert_eq!(engine.turn(), 2);
        assert_eq!(engine.round(), 1);
        engine.end_turn_step();
        // The rotation wrapped, so the round counter moves exactly once.
        assert_eq!(engine.current_player(), 1);
        assert_eq!(engine.turn(), 3);
        assert_eq!(engine.round(), 2);
    }

    #[test]
    fn test_request_new_game_resets_the_session() {
        let mut engine = engine(GameSettings::all_npc(2));
        engine.start_game().unwrap();
        assert!(engine.is_over());
        engine.request_new_game();
        assert_eq!(engine.phase(), GamePhase::Ready);
        assert_eq!(engine.turn_phase(), None);
        assert!(engine.result().is_none());
        assert!(engine.awaiting().is_none());
        assert_eq!(engine.world().total_armies(), 0);
        assert_eq!(engine.world().claimed_count(), 0);
        assert_eq!(engine.roster.rotation(), &[1, 2]);
        // A fresh start from the same engine works.
        assert!(engine.start_game().is_ok());
        assert!(engine.is_over());
    }
}
