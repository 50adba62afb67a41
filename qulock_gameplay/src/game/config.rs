/// Match configuration and display context.
///
/// All settings are plain values handed to the game mode at construction.
/// The display context is computed once by the host at startup.

use glam::{UVec2, Vec3};
use crate::error::{Error, Result};
use crate::qulock_bail;

/// Game mode settings
#[derive(Debug, Clone, PartialEq)]
pub struct GameModeConfig {
    /// Spawn the player at a random navigable point instead of the default start
    pub use_random_player_spawn: bool,
    /// Minimum distance between the player spawn and any enemy spawn
    pub player_safe_radius: f32,
    /// Archetype spawned for each enemy
    pub enemy_archetype: Option<String>,
    /// Number of stalkers spawned at `begin_play`
    pub num_enemies: u32,
    /// Stalker speed in meters per second
    pub enemy_speed: u32,
    /// Center of the playable area
    pub level_origin: Vec3,
    /// Radius of the playable area around `level_origin`
    pub level_radius: f32,
    /// Rejection-sampling attempts per spawn point before giving up
    pub max_placement_attempts: u32,
    /// Whether the level has a navigation mesh
    pub has_navigation: bool,
}

impl Default for GameModeConfig {
    fn default() -> Self {
        Self {
            use_random_player_spawn: false,
            player_safe_radius: 1000.0,
            enemy_archetype: None,
            num_enemies: 4,
            enemy_speed: 4,
            level_origin: Vec3::ZERO,
            level_radius: 10_000.0,
            max_placement_attempts: 256,
            has_navigation: false,
        }
    }
}

impl GameModeConfig {
    /// World units per meter
    pub const UNITS_PER_METER: f32 = 100.0;

    /// Enemy max walk speed in world units per second
    pub fn enemy_walk_speed(&self) -> f32 {
        self.enemy_speed as f32 * Self::UNITS_PER_METER
    }

    /// Reject settings the match cannot start with
    pub fn validate(&self) -> Result<()> {
        const SOURCE: &str = "qulock::GameModeConfig";

        if self.enemy_archetype.as_deref().map_or(true, str::is_empty) {
            qulock_bail!(SOURCE => Error::Configuration("no enemy archetype assigned".to_string()));
        }
        if !self.has_navigation {
            qulock_bail!(SOURCE => Error::Configuration("no navigation mesh assigned".to_string()));
        }
        if !(self.level_radius > 0.0) {
            qulock_bail!(SOURCE => Error::Configuration(format!("level radius must be positive, got {}", self.level_radius)));
        }
        if !(self.player_safe_radius >= 0.0) {
            qulock_bail!(SOURCE => Error::Configuration(format!("player safe radius must not be negative, got {}", self.player_safe_radius)));
        }
        if self.max_placement_attempts == 0 {
            qulock_bail!(SOURCE => Error::Configuration("max placement attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Display facts computed once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayContext {
    /// Best resolution the display supports
    pub best_resolution: UVec2,
}

/// Host surface that applies screen modes
pub trait DisplaySurface {
    fn apply_display_mode(&mut self, resolution: UVec2, fullscreen: bool);
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
