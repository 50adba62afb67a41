/*!
# Qulock Gameplay

Visibility-gated enemies for a first-person game.

A stalker may only move while no local player can see it. Every frame the
host refreshes one camera snapshot per player; each stalker then asks
whether its bounding box is inside any player's view frustum and not
hidden behind other geometry, and freezes or chases accordingly.

## Architecture

- **camera**: per-frame view snapshots and frustum side planes
- **visibility**: frustum membership, occlusion traces, movement gate
- **ai**: the stalker controller driving each enemy
- **player**: local players and their first-person characters
- **game**: match lifecycle, enemy placement, save data
- **world**: the host engine surfaces, plus `SimpleWorld`, an in-memory host
- **session**: the per-frame driver tying everything together

The host engine is reached only through the traits in `world`, so the
whole layer runs against `SimpleWorld` in tests and in the demo.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod ai;
pub mod camera;
pub mod frame;
pub mod game;
pub mod player;
pub mod session;
pub mod visibility;
pub mod world;

#[cfg(test)]
mod test_support;

// Main qulock namespace module
pub mod qulock {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging host
    pub use crate::engine::Engine;

    // Per-frame driver
    pub use crate::session::GameplaySession;

    // Logging sub-module (types only, the qulock_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod ai {
        pub use crate::ai::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod frame {
        pub use crate::frame::*;
    }

    pub mod game {
        pub use crate::game::*;
    }

    pub mod player {
        pub use crate::player::*;
    }

    pub mod visibility {
        pub use crate::visibility::*;
    }

    pub mod world {
        pub use crate::world::*;
    }
}

// Re-export math library at crate root
pub use glam;
