//! Error types for the Qulock gameplay layer
//!
//! Only configuration and persistence problems are errors. Transient
//! query misses (no view snapshot yet, no navigable point on this attempt)
//! are reported as `None` by the functions that encounter them.

use std::fmt;

/// Result type for Qulock operations
pub type Result<T> = std::result::Result<T, Error>;

/// Qulock gameplay errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Missing or invalid configuration (enemy archetype, navigation, radii)
    Configuration(String),

    /// The host refused to spawn an actor
    SpawnFailed(String),

    /// Enemy placement ran out of sampling attempts
    PlacementExhausted {
        attempts: u32,
    },

    /// Save data could not be read or written
    SaveData(String),

    /// Operation not valid in the current state
    InvalidState(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Error::SpawnFailed(msg) => write!(f, "Spawn failed: {}", msg),
            Error::PlacementExhausted { attempts } => {
                write!(f, "No valid spawn location found after {} attempts", attempts)
            }
            Error::SaveData(msg) => write!(f, "Save data error: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::SaveData(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SaveData(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
