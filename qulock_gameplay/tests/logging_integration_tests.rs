//! Integration tests for the logging host
//!
//! Verify that gameplay operations report through the pluggable logger.
//! Tests swap the global logger, so they run #[serial].
//!
//! Run with: cargo test --test logging_integration_tests

use qulock_gameplay::glam::{UVec2, Vec3};
use qulock_gameplay::qulock::game::{
    DisplayContext, DisplaySurface, GameMode, GameModeConfig, ManualClock, MemorySaveStore,
};
use qulock_gameplay::qulock::log::{Logger, LogEntry, LogSeverity};
use qulock_gameplay::qulock::world::SimpleWorld;
use qulock_gameplay::qulock::{Engine, Error};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

struct NullDisplay;

impl DisplaySurface for NullDisplay {
    fn apply_display_mode(&mut self, _resolution: UVec2, _fullscreen: bool) {}
}

fn game_mode(config: GameModeConfig) -> GameMode {
    GameMode::new(
        config,
        DisplayContext::default(),
        Box::new(MemorySaveStore::new()),
        Box::new(ManualClock::default()),
    )
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].severity, LogSeverity::Info);
    assert_eq!(captured[0].source, "test::module");
    assert_eq!(captured[1].message, "Test warning message");
    drop(captured);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_configuration_error_is_logged_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut world = SimpleWorld::new(0);
    let mut mode = game_mode(GameModeConfig::default());
    let result = mode.begin_play(&mut world, &mut NullDisplay, Vec3::ZERO);
    assert!(matches!(result, Err(Error::Configuration(_))));

    let captured = entries.lock().unwrap();
    let error = captured
        .iter()
        .find(|e| e.severity == LogSeverity::Error)
        .expect("configuration error was not logged");
    assert_eq!(error.source, "qulock::GameModeConfig");
    assert!(error.message.contains("enemy archetype"));
    assert!(error.file.is_some());
    assert!(error.line.is_some());
    drop(captured);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_rejected_transition_is_warning() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut mode = game_mode(GameModeConfig::default());
    assert!(!mode.pause_game());

    let captured = entries.lock().unwrap();
    assert!(captured
        .iter()
        .any(|e| e.severity == LogSeverity::Warn && e.source == "qulock::GameMode"));
    drop(captured);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    Engine::log(LogSeverity::Info, "test::reset", "before".to_string());
    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test::reset", "after".to_string());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].message, "before");
}
