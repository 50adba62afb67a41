//! Game module — match lifecycle, enemy placement and persistence.

mod clock;
mod config;
mod game_mode;
mod save_data;
mod spawner;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DisplayContext, DisplaySurface, GameModeConfig};
pub use game_mode::{GameEvent, GameMode, MatchState};
pub use save_data::{JsonFileSaveStore, MemorySaveStore, SaveRecord, SaveStore, SAVE_SLOT_NAME};
pub use spawner::{choose_player_start, find_spawn_location, spawn_enemies};
