/// Enemy placement on the navigation mesh.
///
/// Spawn points are found by rejection sampling: draw a reachable point
/// in the level disc, keep it only if it lies outside the player's safe
/// radius. The number of draws per point is capped by the configuration.

use glam::Vec3;
use crate::error::{Error, Result};
use crate::world::{ActorKey, ActorSpawner, NavigationQuery};
use crate::{qulock_bail, qulock_debug, qulock_err, qulock_info, qulock_trace, qulock_warn};
use super::config::GameModeConfig;

const SOURCE: &str = "qulock::Spawner";

/// Random navigable point farther than `player_safe_radius` from `player_spawn`
pub fn find_spawn_location<N: NavigationQuery + ?Sized>(
    navigation: &mut N,
    config: &GameModeConfig,
    player_spawn: Vec3,
) -> Result<Vec3> {
    let safe_radius_sq = config.player_safe_radius * config.player_safe_radius;

    for attempt in 0..config.max_placement_attempts {
        let Some(candidate) = navigation.random_reachable_point_in_radius(config.level_origin, config.level_radius) else {
            qulock_trace!(SOURCE, "attempt {}: no reachable point", attempt);
            continue;
        };

        if candidate.distance_squared(player_spawn) > safe_radius_sq {
            qulock_trace!(SOURCE, "attempt {}: accepted {:?}", attempt, candidate);
            return Ok(candidate);
        }
    }

    qulock_bail!(SOURCE => Error::PlacementExhausted { attempts: config.max_placement_attempts });
}

/// Spawn `config.num_enemies` enemies away from the player
///
/// Every spawned enemy gets the configured walk speed. All or nothing: on
/// the first failure the enemies already spawned are destroyed again.
pub fn spawn_enemies<W: ActorSpawner + NavigationQuery + ?Sized>(
    world: &mut W,
    config: &GameModeConfig,
    player_spawn: Vec3,
) -> Result<Vec<ActorKey>> {
    let Some(archetype) = config.enemy_archetype.as_deref().filter(|a| !a.is_empty()) else {
        qulock_bail!(SOURCE => Error::Configuration("no enemy archetype assigned".to_string()));
    };

    let speed = config.enemy_walk_speed();
    let mut enemies = Vec::with_capacity(config.num_enemies as usize);

    for index in 0..config.num_enemies {
        match spawn_one(world, config, archetype, player_spawn) {
            Ok(enemy) => {
                world.set_max_walk_speed(enemy, speed);
                qulock_debug!(SOURCE, "enemy {} spawned", index);
                enemies.push(enemy);
            }
            Err(err) => {
                for enemy in enemies {
                    world.destroy_actor(enemy);
                }
                qulock_warn!(SOURCE, "Spawning enemy {} failed, batch rolled back", index);
                return Err(err);
            }
        }
    }

    qulock_info!(SOURCE, "Spawned {} enemies of '{}'", enemies.len(), archetype);
    Ok(enemies)
}

fn spawn_one<W: ActorSpawner + NavigationQuery + ?Sized>(
    world: &mut W,
    config: &GameModeConfig,
    archetype: &str,
    player_spawn: Vec3,
) -> Result<ActorKey> {
    let location = find_spawn_location(world, config, player_spawn)?;
    match world.spawn_actor(archetype, location, 0.0) {
        Some(enemy) => Ok(enemy),
        None => Err(qulock_err!(SOURCE => Error::SpawnFailed(format!("'{}' refused at {:?}", archetype, location)))),
    }
}

/// Move existing enemies back out of the player's safe radius
///
/// Every location is found before anything moves, so a failed placement
/// leaves all enemies where they were.
pub fn relocate_enemies<W: ActorSpawner + NavigationQuery + ?Sized>(
    world: &mut W,
    config: &GameModeConfig,
    player_spawn: Vec3,
    enemies: &[ActorKey],
) -> Result<()> {
    let locations = enemies.iter()
        .map(|_| find_spawn_location(&mut *world, config, player_spawn))
        .collect::<Result<Vec<_>>>()?;

    for (&enemy, location) in enemies.iter().zip(locations) {
        if !world.teleport_actor(enemy, location) {
            qulock_warn!(SOURCE, "enemy {:?} is gone, not relocated", enemy);
        }
    }
    qulock_debug!(SOURCE, "Relocated {} enemies", enemies.len());
    Ok(())
}

/// Where the player starts
///
/// With `use_random_player_spawn`, a random reachable point in the level
/// disc; otherwise (or when sampling keeps missing) `default_start`.
pub fn choose_player_start<N: NavigationQuery + ?Sized>(
    navigation: &mut N,
    config: &GameModeConfig,
    default_start: Vec3,
) -> Vec3 {
    if !config.use_random_player_spawn {
        return default_start;
    }

    for _ in 0..config.max_placement_attempts {
        if let Some(point) = navigation.random_reachable_point_in_radius(config.level_origin, config.level_radius) {
            return point;
        }
    }

    qulock_warn!(SOURCE, "No reachable player start found, using the default start");
    default_start
}

#[cfg(test)]
#[path = "spawner_tests.rs"]
mod tests;
