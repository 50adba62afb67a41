/// GameplaySession — the per-frame driver.
///
/// Owns everything that lives for one level: the frame clock, the view
/// snapshot provider, the local players, one stalker per enemy and the
/// game mode. The host calls `advance_frame` once per simulation frame,
/// before its own actor tick.

use glam::Vec3;
use crate::ai::{StalkerController, StalkerTick};
use crate::camera::{ViewRect, ViewSnapshotProvider};
use crate::error::{Error, Result};
use crate::frame::{FrameClock, FrameId};
use crate::game::{DisplaySurface, GameEvent, GameMode, MatchState};
use crate::player::{InputAction, InputOutcome, LocalPlayers};
use crate::visibility::VisibilityConfig;
use crate::world::{ActorKey, GameWorld, PawnControl, PlayerKey, SceneQuery};
use crate::{qulock_bail, qulock_debug, qulock_info};

const SOURCE: &str = "qulock::GameplaySession";

pub struct GameplaySession {
    clock: FrameClock,
    provider: ViewSnapshotProvider,
    players: LocalPlayers,
    /// First local player; the stalkers chase its pawn
    primary_player: Option<PlayerKey>,
    stalkers: Vec<StalkerController>,
    game_mode: GameMode,
    visibility: VisibilityConfig,
}

impl GameplaySession {
    pub fn new(game_mode: GameMode, visibility: VisibilityConfig) -> Self {
        Self {
            clock: FrameClock::new(),
            provider: ViewSnapshotProvider::new(),
            players: LocalPlayers::new(),
            primary_player: None,
            stalkers: Vec::new(),
            game_mode,
            visibility,
        }
    }

    // ===== PLAYERS =====

    /// Add a local player controlling `pawn`
    ///
    /// The player is tracked by the snapshot provider and watched by every
    /// existing stalker from this frame on.
    pub fn add_local_player(&mut self, scene: &dyn SceneQuery, pawn: ActorKey, viewport: ViewRect) -> PlayerKey {
        let player = self.players.add(pawn, viewport);
        self.primary_player.get_or_insert(player);

        let frame = self.clock.current();
        let source = self.players.view_source(scene);
        self.provider.register(player, frame, &source);
        for stalker in &mut self.stalkers {
            stalker.watch_player(player, &mut self.provider, frame, &source);
        }
        player
    }

    pub fn remove_local_player(&mut self, player: PlayerKey) -> bool {
        if self.players.remove(player).is_none() {
            return false;
        }
        self.provider.unregister(player);
        for stalker in &mut self.stalkers {
            stalker.unwatch_player(player);
        }
        if self.primary_player == Some(player) {
            self.primary_player = self.players.keys().next();
        }
        true
    }

    /// Route one input action of `player` to its character
    ///
    /// Ignored while the pawn's input is disabled (before the start and
    /// after game over). A pause request pauses a running match.
    pub fn handle_input(&mut self, pawns: &dyn PawnControl, player: PlayerKey, action: InputAction) -> InputOutcome {
        let Some(local) = self.players.get_mut(player) else {
            return InputOutcome::Ignored;
        };
        if !pawns.is_input_enabled(local.character.pawn()) {
            return InputOutcome::Ignored;
        }

        let outcome = local.character.handle_input(action);
        if outcome == InputOutcome::PauseRequested && self.game_mode.is_game_running() {
            self.game_mode.pause_game();
        }
        outcome
    }

    /// Movement input accumulated by `player` since the last call
    pub fn take_movement_input(&mut self, player: PlayerKey) -> Vec3 {
        self.players
            .get_mut(player)
            .map_or(Vec3::ZERO, |local| local.character.consume_movement_input())
    }

    // ===== MATCH =====

    /// Prepare the level around the primary player's pawn
    ///
    /// Spawns the enemies through the game mode and gives each one a
    /// stalker that chases the primary pawn and watches every local player.
    pub fn begin_play<W: GameWorld>(&mut self, world: &mut W, display: &mut dyn DisplaySurface) -> Result<()> {
        let Some(primary) = self.primary_player.and_then(|p| self.players.get(p)) else {
            qulock_bail!(SOURCE => Error::Configuration("no local player to begin play with".to_string()));
        };
        let goal = primary.character.pawn();
        let Some(player_spawn) = world.actor_location(goal) else {
            qulock_bail!(SOURCE => Error::Configuration(format!("player pawn {:?} is not in the world", goal)));
        };

        let enemies = self.game_mode.begin_play(world, display, player_spawn)?;

        let frame = self.clock.current();
        let source = self.players.view_source(&*world);
        let watched: Vec<PlayerKey> = self.players.keys().collect();
        for enemy in enemies {
            let mut stalker = StalkerController::new(enemy, self.visibility);
            stalker.set_goal(Some(goal));
            for &player in &watched {
                stalker.watch_player(player, &mut self.provider, frame, &source);
            }
            self.stalkers.push(stalker);
        }

        qulock_info!(SOURCE, "{} stalkers watching {} players", self.stalkers.len(), watched.len());
        Ok(())
    }

    pub fn start_game<W: GameWorld>(&mut self, world: &mut W) -> bool {
        self.game_mode.execute_game_start(world)
    }

    /// End the match, optionally restarting the level right away
    pub fn execute_game_over<W: GameWorld>(
        &mut self,
        world: &mut W,
        responsible: Option<ActorKey>,
        should_restart: bool,
    ) -> bool {
        if !self.game_mode.execute_game_over(world, responsible, should_restart) {
            return false;
        }
        if self.game_mode.state() == MatchState::NotStarted {
            self.reset_stalkers(world);
        }
        true
    }

    /// Reset the level after a game over, see [`GameMode::restart_game`]
    ///
    /// Every stalker forgets its last verdict and counts as frozen until
    /// the new match ticks it.
    pub fn restart_game<W: GameWorld>(&mut self, world: &mut W) -> Result<bool> {
        if !self.game_mode.restart_game(world)? {
            return Ok(false);
        }
        self.reset_stalkers(world);
        Ok(true)
    }

    fn reset_stalkers<W: GameWorld>(&mut self, world: &mut W) {
        for stalker in &mut self.stalkers {
            stalker.reset(&mut *world);
        }
    }

    /// Run one simulation frame
    ///
    /// Advances the frame, refreshes every player's view snapshot, then,
    /// while the match runs, ticks the stalkers. A stalker reaching its
    /// goal ends the match.
    pub fn advance_frame<W: GameWorld>(&mut self, world: &mut W) -> FrameId {
        let frame = self.clock.advance();
        {
            let source = self.players.view_source(&*world);
            self.provider.refresh(frame, &source);
        }

        if !self.game_mode.is_game_running() {
            return frame;
        }

        let mut caught_by = None;
        for stalker in &mut self.stalkers {
            if stalker.tick(frame, &self.provider, world) == StalkerTick::CaughtTarget {
                caught_by = Some(stalker.pawn());
                break;
            }
        }

        if let Some(stalker) = caught_by {
            qulock_debug!(SOURCE, "Frame {:?}: caught by {:?}", frame, stalker);
            self.execute_game_over(world, Some(stalker), false);
        }
        frame
    }

    // ===== ACCESSORS =====

    pub fn current_frame(&self) -> FrameId {
        self.clock.current()
    }

    pub fn provider(&self) -> &ViewSnapshotProvider {
        &self.provider
    }

    pub fn players(&self) -> &LocalPlayers {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut LocalPlayers {
        &mut self.players
    }

    pub fn primary_player(&self) -> Option<PlayerKey> {
        self.primary_player
    }

    pub fn stalkers(&self) -> &[StalkerController] {
        &self.stalkers
    }

    pub fn game_mode(&self) -> &GameMode {
        &self.game_mode
    }

    pub fn game_mode_mut(&mut self) -> &mut GameMode {
        &mut self.game_mode
    }

    pub fn visibility(&self) -> &VisibilityConfig {
        &self.visibility
    }

    /// Drain the game mode's queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.game_mode.take_events()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
