//! Qulock Demo - headless match against visibility-gated stalkers
//!
//! The player stands in an open arena and slowly turns in place while
//! walking forward. Stalkers close in whenever they are behind the camera
//! and freeze the moment they come into view.
//!
//! Run with: RUST_LOG=info cargo run -p qulock_demo

use chrono::Duration;
use qulock_gameplay::glam::{UVec2, Vec2, Vec3};
use qulock_gameplay::qulock::camera::ViewRect;
use qulock_gameplay::qulock::game::{
    DisplayContext, DisplaySurface, GameEvent, GameMode, GameModeConfig, ManualClock, MatchState,
    MemorySaveStore,
};
use qulock_gameplay::qulock::log::{LogEntry, LogSeverity, Logger};
use qulock_gameplay::qulock::player::InputAction;
use qulock_gameplay::qulock::visibility::VisibilityConfig;
use qulock_gameplay::qulock::world::{
    AABB, ActorKind, Archetype, CollisionChannel, SceneQuery, SimpleWorld,
};
use qulock_gameplay::qulock::{Engine, GameplaySession};

const FRAME_SECONDS: f32 = 1.0 / 30.0;
const MAX_FRAMES: u32 = 30 * 120;
const PLAYER_WALK_SPEED: f32 = 300.0;
const TURN_DEGREES_PER_FRAME: f32 = 2.0;

/// Routes gameplay log entries into the `log` facade
struct LogForwarder;

fn to_level(severity: LogSeverity) -> log::Level {
    match severity {
        LogSeverity::Trace => log::Level::Trace,
        LogSeverity::Debug => log::Level::Debug,
        LogSeverity::Info => log::Level::Info,
        LogSeverity::Warn => log::Level::Warn,
        LogSeverity::Error => log::Level::Error,
    }
}

impl Logger for LogForwarder {
    fn enabled(&self, severity: LogSeverity) -> bool {
        to_level(severity) <= log::max_level()
    }

    fn log(&self, entry: &LogEntry) {
        let level = to_level(entry.severity);
        match (entry.file, entry.line) {
            (Some(file), Some(line)) => {
                log::log!(target: &entry.source, level, "{} ({}:{})", entry.message, file, line)
            }
            _ => log::log!(target: &entry.source, level, "{}", entry.message),
        }
    }
}

/// Window stand-in
struct HeadlessDisplay;

impl DisplaySurface for HeadlessDisplay {
    fn apply_display_mode(&mut self, resolution: UVec2, fullscreen: bool) {
        log::info!("Display mode {}x{} (fullscreen: {})", resolution.x, resolution.y, fullscreen);
    }
}

fn build_world() -> SimpleWorld {
    let mut world = SimpleWorld::new(0x51_0c_c0);
    world.set_nav_area(Vec3::ZERO, 4000.0);
    world.register_archetype("stalker", Archetype {
        kind: ActorKind::AiPawn,
        extents: Vec3::new(40.0, 40.0, 90.0),
        blocks: CollisionChannel::all(),
    });

    // A few pillars to hide behind
    for (x, y) in [(1200.0, 800.0), (-900.0, 1500.0), (600.0, -1800.0), (-2000.0, -600.0)] {
        world.add_prop(AABB::new(Vec3::new(x, y, 0.0), Vec3::new(150.0, 150.0, 400.0)));
    }
    world
}

fn main() {
    env_logger::init();
    Engine::set_logger(LogForwarder);

    let clock = ManualClock::default();
    let config = GameModeConfig {
        enemy_archetype: Some("stalker".to_string()),
        has_navigation: true,
        level_radius: 4000.0,
        use_random_player_spawn: true,
        ..GameModeConfig::default()
    };
    let game_mode = GameMode::new(
        config,
        DisplayContext { best_resolution: UVec2::new(1920, 1080) },
        Box::new(MemorySaveStore::new()),
        Box::new(clock.clone()),
    );

    let mut world = build_world();
    let start = game_mode.choose_player_start(&mut world, Vec3::ZERO);
    let pawn = world.add_player_pawn(start, Vec3::new(40.0, 40.0, 90.0));

    let mut session = GameplaySession::new(game_mode, VisibilityConfig::default());
    let player = session.add_local_player(&world, pawn, ViewRect::from_size(1920, 1080));

    if let Err(err) = session.begin_play(&mut world, &mut HeadlessDisplay) {
        log::error!("Could not begin play: {}", err);
        std::process::exit(1);
    }
    session.start_game(&mut world);

    let mut frames = 0;
    while frames < MAX_FRAMES && session.game_mode().state() == MatchState::Running {
        session.handle_input(&world, player, InputAction::Look(Vec2::new(TURN_DEGREES_PER_FRAME, 0.0)));
        session.handle_input(&world, player, InputAction::Move(Vec2::new(0.0, 1.0)));

        let movement = session.take_movement_input(player);
        if let Some(location) = world.actor_location(pawn) {
            let step = movement.normalize_or_zero() * PLAYER_WALK_SPEED * FRAME_SECONDS;
            let next = location + step;
            // Stay inside the arena
            if next.truncate().length() < 3800.0 {
                world.set_actor_location(pawn, next);
            }
        }

        session.advance_frame(&mut world);
        world.step(FRAME_SECONDS);
        clock.advance(Duration::milliseconds((FRAME_SECONDS * 1000.0).round() as i64));
        frames += 1;

        for event in session.take_events() {
            report(event);
        }
    }

    println!(
        "Finished after {} frames: state {:?}, score {}, high score {}",
        frames,
        session.game_mode().state(),
        session.game_mode().player_score(),
        session.game_mode().high_score(),
    );
}

fn report(event: GameEvent) {
    match event {
        GameEvent::GameOver { responsible, score } => {
            println!("Game over: caught by {:?} after {} s", responsible, score)
        }
        GameEvent::NewHighScore(score) => println!("New high score: {}", score),
        other => println!("{:?}", other),
    }
}
