/// LocalPlayers — the players sitting at this machine.
///
/// Each local player owns a viewport and the character it controls. The
/// set acts as the `ViewSource` for the snapshot provider once paired with
/// a scene to read pawn locations from.

use slotmap::SlotMap;
use crate::camera::{ViewInitOptions, ViewRect, ViewSource};
use crate::world::{ActorKey, PlayerKey, SceneQuery};
use crate::qulock_info;
use super::player_character::PlayerCharacter;

#[derive(Debug, Clone)]
pub struct LocalPlayer {
    pub character: PlayerCharacter,
    pub viewport: ViewRect,
}

#[derive(Debug, Default)]
pub struct LocalPlayers {
    players: SlotMap<PlayerKey, LocalPlayer>,
}

impl LocalPlayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player controlling `pawn` through `viewport`
    pub fn add(&mut self, pawn: ActorKey, viewport: ViewRect) -> PlayerKey {
        let key = self.players.insert(LocalPlayer {
            character: PlayerCharacter::new(pawn),
            viewport,
        });
        qulock_info!("qulock::LocalPlayers", "Local player {:?} controls {:?}", key, pawn);
        key
    }

    pub fn remove(&mut self, player: PlayerKey) -> Option<LocalPlayer> {
        self.players.remove(player)
    }

    pub fn get(&self, player: PlayerKey) -> Option<&LocalPlayer> {
        self.players.get(player)
    }

    pub fn get_mut(&mut self, player: PlayerKey) -> Option<&mut LocalPlayer> {
        self.players.get_mut(player)
    }

    pub fn keys(&self) -> impl Iterator<Item = PlayerKey> + '_ {
        self.players.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerKey, &LocalPlayer)> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerKey, &mut LocalPlayer)> {
        self.players.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player controlling `pawn`, if any
    pub fn player_for_pawn(&self, pawn: ActorKey) -> Option<PlayerKey> {
        self.players
            .iter()
            .find(|(_, p)| p.character.pawn() == pawn)
            .map(|(key, _)| key)
    }

    /// View source reading pawn locations from `scene`
    pub fn view_source<'a>(&'a self, scene: &'a dyn SceneQuery) -> PlayerViewSource<'a> {
        PlayerViewSource { players: self, scene }
    }
}

/// `LocalPlayers` paired with the scene their pawns live in
pub struct PlayerViewSource<'a> {
    players: &'a LocalPlayers,
    scene: &'a dyn SceneQuery,
}

impl ViewSource for PlayerViewSource<'_> {
    fn view_init_options(&self, player: PlayerKey) -> Option<ViewInitOptions> {
        let local = self.players.get(player)?;
        if !local.character.is_possessed() || local.viewport.is_empty() {
            return None;
        }
        let location = self.scene.actor_location(local.character.pawn())?;
        Some(local.character.view_init_options(location, local.viewport))
    }
}

#[cfg(test)]
#[path = "local_players_tests.rs"]
mod tests;
