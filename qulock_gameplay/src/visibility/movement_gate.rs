/// MovementGate — "may this actor move this frame?"
///
/// The gate watches a set of players. The first query of a frame asks each
/// of them, through the visibility resolver, whether the target actor is
/// in view; if anyone sees it, it must stay still. The verdict is cached
/// until the frame changes.

use crate::camera::{ViewSnapshotProvider, ViewSource};
use crate::frame::{FrameId, FrameValue};
use crate::world::{ActorKey, PlayerKey, SceneQuery};
use crate::{qulock_debug, qulock_trace};
use super::visibility_resolver::{is_actor_in_view, VisibilityConfig};

#[derive(Debug, Clone)]
pub struct MovementGate {
    target: ActorKey,
    players: Vec<PlayerKey>,
    can_move: FrameValue<bool>,
    config: VisibilityConfig,
}

impl MovementGate {
    pub fn new(target: ActorKey, config: VisibilityConfig) -> Self {
        Self {
            target,
            players: Vec::new(),
            can_move: FrameValue::new(),
            config,
        }
    }

    /// Actor whose movement is gated
    pub fn target(&self) -> ActorKey {
        self.target
    }

    /// Gate another actor (drops the cached verdict)
    pub fn set_target(&mut self, target: ActorKey) {
        self.target = target;
        self.can_move.reset();
    }

    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    /// Drop the cached verdict so the next query recomputes it
    pub fn reset(&mut self) {
        self.can_move.reset();
    }

    /// Add `player` to the watched set and make sure the provider tracks it
    ///
    /// Returns `true` if the player was not watched before.
    pub fn watch_player(
        &mut self,
        player: PlayerKey,
        provider: &mut ViewSnapshotProvider,
        current_frame: FrameId,
        source: &dyn ViewSource,
    ) -> bool {
        provider.register(player, current_frame, source);
        if self.players.contains(&player) {
            return false;
        }
        self.players.push(player);
        qulock_debug!("qulock::MovementGate", "{:?} now watched by {:?}", self.target, player);
        true
    }

    /// Remove `player` from the watched set (the provider keeps tracking it)
    pub fn unwatch_player(&mut self, player: PlayerKey) -> bool {
        let before = self.players.len();
        self.players.retain(|p| *p != player);
        self.players.len() != before
    }

    pub fn watched_players(&self) -> &[PlayerKey] {
        &self.players
    }

    /// Whether the verdict for `current_frame` is already cached
    pub fn is_cached(&self, current_frame: FrameId) -> bool {
        self.can_move.is_set(current_frame)
    }

    /// `false` if any watched player sees the target this frame
    ///
    /// Computed on the first call of a frame; later calls in the same
    /// frame return the cached verdict. A player without a snapshot this
    /// frame does not see anything.
    pub fn can_move(
        &mut self,
        current_frame: FrameId,
        provider: &ViewSnapshotProvider,
        scene: &dyn SceneQuery,
    ) -> bool {
        let target = self.target;
        let players = &self.players;
        let config = &self.config;

        *self.can_move.get_or_insert_with(current_frame, || {
            let seen_by = players.iter().find(|player| {
                provider
                    .snapshot_for(**player, current_frame)
                    .map_or(false, |snapshot| is_actor_in_view(snapshot, scene, target, config))
            });

            match seen_by {
                Some(player) => {
                    qulock_trace!("qulock::MovementGate", "{:?} seen by {:?}", target, player);
                    false
                }
                None => true,
            }
        })
    }
}

#[cfg(test)]
#[path = "movement_gate_tests.rs"]
mod tests;
