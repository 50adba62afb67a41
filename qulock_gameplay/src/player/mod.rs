//! Player module — local players and their first-person characters.

mod local_players;
mod player_character;

pub use local_players::{LocalPlayer, LocalPlayers, PlayerViewSource};
pub use player_character::{InputAction, InputOutcome, PlayerCharacter};
