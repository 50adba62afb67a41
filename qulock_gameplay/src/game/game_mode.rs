/// GameMode — match lifecycle.
///
/// ```text
/// NotStarted ──start──▶ Running ◀──resume── Paused
///      ▲                  │  └────pause────▶  │
///      │                  └──game over──┐     │
///      └────────restart──────── GameOver ◀────┘
/// ```
///
/// Score is whole wall-clock seconds spent in `Running` since the last
/// start. Time spent paused is excluded by folding the running time into
/// an offset on pause and restarting the stopwatch on resume.

use chrono::{DateTime, Duration, Utc};
use glam::Vec3;
use crate::error::Result;
use crate::world::{ActorKey, GameWorld, MovementMode, NavigationQuery};
use crate::{qulock_bail, qulock_info, qulock_warn};
use super::clock::Clock;
use super::config::{DisplayContext, DisplaySurface, GameModeConfig};
use super::save_data::{SaveRecord, SaveStore, SAVE_SLOT_NAME};
use super::spawner;

const SOURCE: &str = "qulock::GameMode";

/// Match state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchState {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Lifecycle notification, drained by the host with `take_events`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// `begin_play` finished; the match can be started
    Ready,
    Started,
    Paused,
    Resumed,
    GameOver {
        /// Actor that ended the match (the stalker that caught the player)
        responsible: Option<ActorKey>,
        score: i32,
    },
    Restarted,
    /// The final score beat the saved high score
    NewHighScore(i32),
}

pub struct GameMode {
    config: GameModeConfig,
    display: DisplayContext,
    save_store: Box<dyn SaveStore>,
    clock: Box<dyn Clock>,
    save_record: SaveRecord,
    state: MatchState,
    ready: bool,
    player_spawn_location: Option<Vec3>,
    enemies: Vec<ActorKey>,
    /// Start of the current running stretch
    start_time: Option<DateTime<Utc>>,
    /// Running time accumulated before the last pause
    score_offset: Duration,
    final_score: Option<i32>,
    responsible: Option<ActorKey>,
    events: Vec<GameEvent>,
}

impl GameMode {
    pub fn new(
        config: GameModeConfig,
        display: DisplayContext,
        save_store: Box<dyn SaveStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            config,
            display,
            save_store,
            clock,
            save_record: SaveRecord::default(),
            state: MatchState::NotStarted,
            ready: false,
            player_spawn_location: None,
            enemies: Vec::new(),
            start_time: None,
            score_offset: Duration::zero(),
            final_score: None,
            responsible: None,
            events: Vec::new(),
        }
    }

    // ===== SETUP =====

    /// Prepare the level
    ///
    /// Validates the configuration, loads the save record (its enemy
    /// settings override the configuration), applies the display mode,
    /// spawns the enemies away from `player_spawn` and freezes every pawn.
    /// Fires `GameEvent::Ready` on success.
    pub fn begin_play<W: GameWorld + ?Sized>(
        &mut self,
        world: &mut W,
        display: &mut dyn DisplaySurface,
        player_spawn: Vec3,
    ) -> Result<Vec<ActorKey>> {
        if self.ready {
            qulock_bail!(SOURCE, "begin_play already ran for this level");
        }
        self.config.validate()?;

        self.save_record = match self.save_store.load(SAVE_SLOT_NAME) {
            Ok(Some(record)) => record,
            Ok(None) => SaveRecord::default(),
            Err(err) => {
                qulock_warn!(SOURCE, "Using default save data ({})", err);
                SaveRecord::default()
            }
        };
        self.config.num_enemies = self.save_record.num_enemies;
        self.config.enemy_speed = self.save_record.enemy_speed;

        display.apply_display_mode(self.display.best_resolution, self.save_record.is_fullscreen);

        self.player_spawn_location = Some(player_spawn);
        self.enemies = spawner::spawn_enemies(world, &self.config, player_spawn)?;

        disable_pawns(world);

        self.ready = true;
        self.events.push(GameEvent::Ready);
        qulock_info!(SOURCE, "Ready with {} enemies", self.enemies.len());
        Ok(self.enemies.clone())
    }

    /// Player start for this level, see [`spawner::choose_player_start`]
    pub fn choose_player_start<N: NavigationQuery + ?Sized>(&self, navigation: &mut N, default_start: Vec3) -> Vec3 {
        spawner::choose_player_start(navigation, &self.config, default_start)
    }

    // ===== TRANSITIONS =====

    /// `NotStarted -> Running`; unfreezes every pawn
    ///
    /// Returns false (and changes nothing) in any other state or before
    /// `begin_play`.
    pub fn execute_game_start<W: GameWorld + ?Sized>(&mut self, world: &mut W) -> bool {
        if !self.ready {
            qulock_warn!(SOURCE, "Start ignored: begin_play has not run");
            return false;
        }
        if self.state != MatchState::NotStarted {
            qulock_warn!(SOURCE, "Start ignored in state {:?}", self.state);
            return false;
        }

        self.state = MatchState::Running;
        self.start_time = Some(self.clock.now());
        self.score_offset = Duration::zero();
        self.final_score = None;
        self.responsible = None;

        for pawn in world.pawns() {
            world.enable_input(pawn);
            let mode = if world.is_player_controlled(pawn) {
                MovementMode::Walking
            } else {
                MovementMode::NavWalking
            };
            world.set_movement_mode(pawn, mode);
        }

        self.events.push(GameEvent::Started);
        qulock_info!(SOURCE, "Match started");
        true
    }

    /// `Running | Paused -> GameOver`; freezes every pawn
    ///
    /// Records the final score, persists a new high score, and restarts
    /// right away when `should_restart` is set.
    pub fn execute_game_over<W: GameWorld + ?Sized>(
        &mut self,
        world: &mut W,
        responsible: Option<ActorKey>,
        should_restart: bool,
    ) -> bool {
        if !matches!(self.state, MatchState::Running | MatchState::Paused) {
            qulock_warn!(SOURCE, "Game over ignored in state {:?}", self.state);
            return false;
        }

        let score = self.player_score();
        self.final_score = Some(score);
        self.start_time = None;
        self.responsible = responsible;
        self.state = MatchState::GameOver;

        for pawn in world.pawns() {
            if !world.is_player_controlled(pawn) {
                world.stop_movement(pawn);
            }
        }
        disable_pawns(world);

        self.events.push(GameEvent::GameOver { responsible, score });
        qulock_info!(SOURCE, "Game over, score {} (caught by {:?})", score, responsible);

        if score > self.save_record.high_score {
            self.save_record.high_score = score;
            if let Err(err) = self.save_store.save(SAVE_SLOT_NAME, &self.save_record) {
                qulock_warn!(SOURCE, "High score not persisted ({})", err);
            }
            self.events.push(GameEvent::NewHighScore(score));
            qulock_info!(SOURCE, "New high score {}", score);
        }

        if should_restart {
            if let Err(err) = self.restart_game(world) {
                qulock_warn!(SOURCE, "Restart after game over failed ({})", err);
            }
        }
        true
    }

    /// `Running -> Paused`
    pub fn pause_game(&mut self) -> bool {
        if self.state != MatchState::Running {
            qulock_warn!(SOURCE, "Pause ignored in state {:?}", self.state);
            return false;
        }

        self.score_offset = self.running_time();
        self.start_time = None;
        self.state = MatchState::Paused;
        self.events.push(GameEvent::Paused);
        qulock_info!(SOURCE, "Match paused");
        true
    }

    /// `Paused -> Running`
    pub fn resume_game(&mut self) -> bool {
        if self.state != MatchState::Paused {
            qulock_warn!(SOURCE, "Resume ignored in state {:?}", self.state);
            return false;
        }

        self.start_time = Some(self.clock.now());
        self.state = MatchState::Running;
        self.events.push(GameEvent::Resumed);
        qulock_info!(SOURCE, "Match resumed");
        true
    }

    /// `GameOver -> NotStarted`; resets the level for the next match
    ///
    /// Player pawns go back to the player spawn, enemies stop and are moved
    /// to fresh locations outside the safe radius, and score and responsible
    /// actor are cleared. Pawns stay frozen until the next start.
    ///
    /// Returns `Ok(false)` outside `GameOver`. If the enemies cannot be
    /// placed, nothing changes and the match stays over.
    pub fn restart_game<W: GameWorld + ?Sized>(&mut self, world: &mut W) -> Result<bool> {
        if self.state != MatchState::GameOver {
            qulock_warn!(SOURCE, "Restart ignored in state {:?}", self.state);
            return Ok(false);
        }
        let Some(player_spawn) = self.player_spawn_location else {
            qulock_bail!(SOURCE, "restart without a player spawn location");
        };

        spawner::relocate_enemies(world, &self.config, player_spawn, &self.enemies)?;
        for pawn in world.pawns() {
            if world.is_player_controlled(pawn) {
                world.teleport_actor(pawn, player_spawn);
            } else {
                world.stop_movement(pawn);
            }
        }

        self.state = MatchState::NotStarted;
        self.start_time = None;
        self.score_offset = Duration::zero();
        self.final_score = None;
        self.responsible = None;
        self.events.push(GameEvent::Restarted);
        qulock_info!(SOURCE, "Match restarted");
        Ok(true)
    }

    // ===== SETTINGS =====

    /// Switch between windowed and fullscreen at the best resolution, and persist it
    pub fn set_fullscreen(&mut self, display: &mut dyn DisplaySurface, fullscreen: bool) -> Result<()> {
        self.save_record.is_fullscreen = fullscreen;
        display.apply_display_mode(self.display.best_resolution, fullscreen);
        self.save_store.save(SAVE_SLOT_NAME, &self.save_record)
    }

    /// Persist enemy settings; they apply the next time a level begins play
    pub fn set_enemy_settings(&mut self, num_enemies: u32, enemy_speed: u32) -> Result<()> {
        self.save_record.num_enemies = num_enemies;
        self.save_record.enemy_speed = enemy_speed;
        self.save_store.save(SAVE_SLOT_NAME, &self.save_record)
    }

    // ===== QUERIES =====

    /// Whole seconds of running time this match
    ///
    /// Frozen while paused and after game over; 0 before the start.
    pub fn player_score(&self) -> i32 {
        match self.state {
            MatchState::NotStarted => 0,
            MatchState::GameOver => self.final_score.unwrap_or(0),
            MatchState::Running | MatchState::Paused => {
                i32::try_from(self.running_time().num_seconds()).unwrap_or(i32::MAX)
            }
        }
    }

    fn running_time(&self) -> Duration {
        match self.start_time {
            Some(start) => self.score_offset + (self.clock.now() - start).max(Duration::zero()),
            None => self.score_offset,
        }
    }

    pub fn high_score(&self) -> i32 {
        self.save_record.high_score
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Running and not paused
    pub fn is_game_running(&self) -> bool {
        self.state == MatchState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == MatchState::Paused
    }

    /// Whether `begin_play` has completed
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn game_over_responsible_actor(&self) -> Option<ActorKey> {
        self.responsible
    }

    pub fn player_spawn_location(&self) -> Option<Vec3> {
        self.player_spawn_location
    }

    pub fn enemies(&self) -> &[ActorKey] {
        &self.enemies
    }

    pub fn config(&self) -> &GameModeConfig {
        &self.config
    }

    pub fn display(&self) -> DisplayContext {
        self.display
    }

    pub fn save_record(&self) -> &SaveRecord {
        &self.save_record
    }

    /// Drain queued notifications, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

fn disable_pawns<W: GameWorld + ?Sized>(world: &mut W) {
    for pawn in world.pawns() {
        world.disable_input(pawn);
        world.set_movement_mode(pawn, MovementMode::None);
    }
}

#[cfg(test)]
#[path = "game_mode_tests.rs"]
mod tests;
