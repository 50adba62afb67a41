/// Engine — process-wide logging host for the gameplay layer.
///
/// The logger is the only global in the crate. Gameplay state (view
/// snapshots, movement gates, the match) is owned by the host and passed
/// explicitly.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (lazily initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Least severe level the active logger accepts (`LogSeverity as u8`)
static MIN_ENABLED: AtomicU8 = AtomicU8::new(LogSeverity::Info as u8);

/// Past the most severe level: nothing is enabled
const NONE_ENABLED: u8 = LogSeverity::Error as u8 + 1;

fn logger_slot() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())))
}

fn min_enabled(logger: &dyn Logger) -> u8 {
    LogSeverity::ALL
        .into_iter()
        .find(|severity| logger.enabled(*severity))
        .map_or(NONE_ENABLED, |severity| severity as u8)
}

/// Logging entry point used by the `qulock_*` macros
///
/// # Example
///
/// ```no_run
/// use qulock_gameplay::qulock::{Engine, log::{Logger, LogEntry}};
///
/// struct FileLogger;
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Append to a file...
///     }
/// }
///
/// Engine::set_logger(FileLogger);
/// ```
pub struct Engine;

impl Engine {
    /// Replace the active logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        Self::install(Box::new(logger));
    }

    /// Restore the default console logger
    pub fn reset_logger() {
        Self::install(Box::new(DefaultLogger::new()));
    }

    fn install(logger: Box<dyn Logger>) {
        if let Ok(mut lock) = logger_slot().write() {
            MIN_ENABLED.store(min_enabled(logger.as_ref()), Ordering::Relaxed);
            *lock = logger;
        }
    }

    /// Whether the active logger wants entries of `severity`
    ///
    /// Lock-free; checked by the logging macros before they format.
    pub fn is_enabled(severity: LogSeverity) -> bool {
        severity as u8 >= MIN_ENABLED.load(Ordering::Relaxed)
    }

    /// Log without source location
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Emitting component (e.g. "qulock::GameMode")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }

    /// Log with file:line (used by `qulock_error!`)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }

    fn dispatch(entry: LogEntry) {
        if let Ok(lock) = logger_slot().read() {
            lock.log(&entry);
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
