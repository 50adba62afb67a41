//! Integration tests for a full match driven by GameplaySession
//!
//! Run with: cargo test --test session_integration_tests

use qulock_gameplay::glam::{UVec2, Vec3};
use qulock_gameplay::qulock::camera::ViewRect;
use qulock_gameplay::qulock::game::{
    DisplayContext, DisplaySurface, GameEvent, GameMode, GameModeConfig, JsonFileSaveStore,
    ManualClock, MatchState, SaveRecord, SaveStore, SAVE_SLOT_NAME,
};
use qulock_gameplay::qulock::visibility::VisibilityConfig;
use qulock_gameplay::qulock::world::{
    ActorKey, ActorKind, Archetype, CollisionChannel, PlayerKey, SceneQuery, SimpleWorld,
};
use qulock_gameplay::qulock::GameplaySession;
use std::path::{Path, PathBuf};

const PAWN_EXTENTS: Vec3 = Vec3::new(40.0, 40.0, 90.0);
const FRAME_SECONDS: f32 = 0.1;

struct NullDisplay;

impl DisplaySurface for NullDisplay {
    fn apply_display_mode(&mut self, _resolution: UVec2, _fullscreen: bool) {}
}

fn save_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("qulock_session_it_{}_{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn world() -> SimpleWorld {
    let mut world = SimpleWorld::new(2024);
    world.set_nav_area(Vec3::ZERO, 3000.0);
    world.register_archetype("stalker", Archetype {
        kind: ActorKind::AiPawn,
        extents: PAWN_EXTENTS,
        blocks: CollisionChannel::all(),
    });
    world
}

fn session(dir: &Path, clock: &ManualClock) -> GameplaySession {
    let config = GameModeConfig {
        enemy_archetype: Some("stalker".to_string()),
        has_navigation: true,
        level_radius: 3000.0,
        ..GameModeConfig::default()
    };
    let game_mode = GameMode::new(
        config,
        DisplayContext { best_resolution: UVec2::new(1920, 1080) },
        Box::new(JsonFileSaveStore::new(dir)),
        Box::new(clock.clone()),
    );
    GameplaySession::new(game_mode, VisibilityConfig::default())
}

/// Turn `player` so that `enemy` is straight behind the camera
fn look_away_from(session: &mut GameplaySession, world: &SimpleWorld, player: PlayerKey, pawn: ActorKey, enemy: ActorKey) {
    let offset = world.actor_location(enemy).unwrap() - world.actor_location(pawn).unwrap();
    let yaw = offset.y.atan2(offset.x).to_degrees() + 180.0;
    session.players_mut().get_mut(player).unwrap().character.set_rotation(yaw, 0.0);
}

#[test]
fn test_unwatched_stalker_catches_player_and_high_score_persists() {
    let dir = save_dir("catch");
    let mut seed_store = JsonFileSaveStore::new(&dir);
    seed_store
        .save(SAVE_SLOT_NAME, &SaveRecord { num_enemies: 1, enemy_speed: 4, ..SaveRecord::default() })
        .unwrap();

    let clock = ManualClock::default();
    let mut world = world();
    let pawn = world.add_player_pawn(Vec3::ZERO, PAWN_EXTENTS);
    let mut session = session(&dir, &clock);
    let player = session.add_local_player(&world, pawn, ViewRect::from_size(1920, 1080));

    session.begin_play(&mut world, &mut NullDisplay).unwrap();
    assert!(session.start_game(&mut world));
    let enemy = session.stalkers()[0].pawn();
    let start_distance = world.actor_location(enemy).unwrap().length();
    assert!(start_distance > 1000.0);

    let mut frames = 0;
    while session.game_mode().state() == MatchState::Running && frames < 2000 {
        look_away_from(&mut session, &world, player, pawn, enemy);
        session.advance_frame(&mut world);
        world.step(FRAME_SECONDS);
        clock.advance_seconds(1);
        frames += 1;
    }

    assert_eq!(session.game_mode().state(), MatchState::GameOver);
    assert_eq!(session.game_mode().game_over_responsible_actor(), Some(enemy));

    let events = session.take_events();
    let score = events
        .iter()
        .find_map(|e| match e {
            GameEvent::GameOver { score, .. } => Some(*score),
            _ => None,
        })
        .expect("no game over event");
    assert!(score > 0);
    assert!(events.contains(&GameEvent::NewHighScore(score)));

    // A fresh store sees the new high score
    let reloaded = JsonFileSaveStore::new(&dir).load(SAVE_SLOT_NAME).unwrap().unwrap();
    assert_eq!(reloaded.high_score, score);
    assert_eq!(reloaded.num_enemies, 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_watched_stalker_never_moves() {
    let dir = save_dir("watched");
    JsonFileSaveStore::new(&dir)
        .save(SAVE_SLOT_NAME, &SaveRecord { num_enemies: 1, ..SaveRecord::default() })
        .unwrap();
    let clock = ManualClock::default();
    let mut world = world();
    let pawn = world.add_player_pawn(Vec3::ZERO, PAWN_EXTENTS);
    let mut session = session(&dir, &clock);
    let player = session.add_local_player(&world, pawn, ViewRect::from_size(1920, 1080));

    session.begin_play(&mut world, &mut NullDisplay).unwrap();
    session.start_game(&mut world);

    let enemy = session.stalkers()[0].pawn();
    let offset = world.actor_location(enemy).unwrap() - world.actor_location(pawn).unwrap();
    let yaw = offset.y.atan2(offset.x).to_degrees();
    session.players_mut().get_mut(player).unwrap().character.set_rotation(yaw, 0.0);

    let start = world.actor_location(enemy).unwrap();
    for _ in 0..50 {
        session.advance_frame(&mut world);
        world.step(FRAME_SECONDS);
        clock.advance_seconds(1);
    }

    assert_eq!(session.game_mode().state(), MatchState::Running);
    assert_eq!(world.actor_location(enemy), Some(start));
    assert!(!session.stalkers()[0].can_move());

    let _ = std::fs::remove_dir_all(&dir);
}
