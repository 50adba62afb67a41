//! Logging for the Qulock gameplay layer
//!
//! - Pluggable sink through the [`Logger`] trait (the host can route entries
//!   into its own console or log file)
//! - Five ordered severities
//! - Colored console output by default, filtered by a minimum severity
//! - ERROR entries carry the file and line they were emitted from
//!
//! The per-frame visibility code logs at TRACE, so the default logger drops
//! everything below INFO.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Sink for log entries
///
/// # Example
///
/// ```no_run
/// use qulock_gameplay::qulock::log::{Logger, LogEntry};
///
/// struct HudConsole;
///
/// impl Logger for HudConsole {
///     fn log(&self, entry: &LogEntry) {
///         // Push into the in-game console...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Handle one entry
    fn log(&self, entry: &LogEntry);

    /// Whether entries of this severity are wanted at all
    ///
    /// Asked once when the logger is installed; the logging macros skip
    /// formatting for severities it turns down.
    fn enabled(&self, _severity: LogSeverity) -> bool {
        true
    }
}

/// A single log message with its metadata
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Time the entry was created
    pub timestamp: SystemTime,

    /// Emitting component (e.g. "qulock::MovementGate")
    pub source: String,

    /// Message text
    pub message: String,

    /// Source file (ERROR entries only)
    pub file: Option<&'static str>,

    /// Source line (ERROR entries only)
    pub line: Option<u32>,
}

/// Log severity levels, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-frame detail (traces, support vertices)
    Trace,

    /// Development information
    Debug,

    /// Match lifecycle and registration events
    Info,

    /// Rejected transitions, recoverable misses
    Warn,

    /// Configuration and persistence failures
    Error,
}

impl LogSeverity {
    /// All severities, most verbose first
    pub const ALL: [LogSeverity; 5] = [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ];

    /// Fixed-width label used by the console logger
    pub fn label(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Colored console logger
///
/// Format: `[timestamp] [SEVERITY] [source] message (file:line)`.
/// Entries below `min_severity` are dropped.
pub struct DefaultLogger {
    min_severity: LogSeverity,
}

impl DefaultLogger {
    /// Console logger that prints INFO and above
    pub fn new() -> Self {
        Self { min_severity: LogSeverity::Info }
    }

    /// Console logger with a custom threshold
    pub fn with_min_severity(min_severity: LogSeverity) -> Self {
        Self { min_severity }
    }

    /// Current threshold
    pub fn min_severity(&self) -> LogSeverity {
        self.min_severity
    }

    /// Whether an entry of this severity would be printed
    pub fn accepts(&self, severity: LogSeverity) -> bool {
        severity >= self.min_severity
    }
}

impl Default for DefaultLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for DefaultLogger {
    fn enabled(&self, severity: LogSeverity) -> bool {
        self.accepts(severity)
    }

    fn log(&self, entry: &LogEntry) {
        if !self.accepts(entry.severity) {
            return;
        }

        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let label = entry.severity.label();
        let severity_str = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };

        let source = entry.source.bright_blue();

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            ),
            _ => println!(
                "[{}] [{}] [{}] {}",
                timestamp, severity_str, source, entry.message
            ),
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
///
/// ```ignore
/// qulock_trace!("qulock::VisibilityResolver", "trace {} hit nothing", index);
/// ```
#[macro_export]
macro_rules! qulock_trace {
    ($source:expr, $($arg:tt)*) => {
        if $crate::qulock::Engine::is_enabled($crate::qulock::log::LogSeverity::Trace) {
            $crate::qulock::Engine::log(
                $crate::qulock::log::LogSeverity::Trace,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! qulock_debug {
    ($source:expr, $($arg:tt)*) => {
        if $crate::qulock::Engine::is_enabled($crate::qulock::log::LogSeverity::Debug) {
            $crate::qulock::Engine::log(
                $crate::qulock::log::LogSeverity::Debug,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log an INFO message
///
/// ```ignore
/// qulock_info!("qulock::GameMode", "Match started");
/// ```
#[macro_export]
macro_rules! qulock_info {
    ($source:expr, $($arg:tt)*) => {
        if $crate::qulock::Engine::is_enabled($crate::qulock::log::LogSeverity::Info) {
            $crate::qulock::Engine::log(
                $crate::qulock::log::LogSeverity::Info,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! qulock_warn {
    ($source:expr, $($arg:tt)*) => {
        if $crate::qulock::Engine::is_enabled($crate::qulock::log::LogSeverity::Warn) {
            $crate::qulock::Engine::log(
                $crate::qulock::log::LogSeverity::Warn,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! qulock_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::qulock::Engine::log_detailed(
            $crate::qulock::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR and evaluate to the error value
///
/// The first form builds `Error::InvalidState`; the second takes any
/// `Error` expression after `=>`.
///
/// ```ignore
/// let err = qulock_err!("qulock::GameMode", "match is not running");
/// let err = qulock_err!("qulock::Spawner" => Error::PlacementExhausted { attempts });
/// ```
#[macro_export]
macro_rules! qulock_err {
    ($source:expr => $error:expr) => {{
        let error: $crate::qulock::Error = $error;
        $crate::qulock_error!($source, "{}", error);
        error
    }};
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::qulock_error!($source, "{}", message);
        $crate::qulock::Error::InvalidState(message)
    }};
}

/// Log an ERROR and return it from the enclosing function
#[macro_export]
macro_rules! qulock_bail {
    ($source:expr => $error:expr) => {
        return Err($crate::qulock_err!($source => $error))
    };
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::qulock_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
