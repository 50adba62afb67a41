/// ViewSnapshotProvider — once-per-frame camera snapshots for local players.
///
/// The host calls `refresh()` from its pre-actor-tick step; every
/// registered player gets a fresh snapshot stamped with that frame. Readers
/// pass the current frame to `snapshot_for()` and get `None` for anything
/// computed in an earlier frame.
///
/// A player registered after this frame's refresh already ran gets its
/// snapshot computed on the spot, so late registrations are not missed.

use crate::frame::{FrameCache, FrameId};
use crate::world::PlayerKey;
use crate::{qulock_debug, qulock_info, qulock_trace};
use super::view_snapshot::ViewSnapshot;
use super::view_source::ViewSource;

#[derive(Debug, Default)]
pub struct ViewSnapshotProvider {
    /// Registered players, in registration order
    players: Vec<PlayerKey>,
    snapshots: FrameCache<PlayerKey, ViewSnapshot>,
    last_updated_frame: Option<FrameId>,
}

impl ViewSnapshotProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `player`
    ///
    /// Idempotent. Returns `true` if the player was not registered before.
    pub fn register(
        &mut self,
        player: PlayerKey,
        current_frame: FrameId,
        source: &dyn ViewSource,
    ) -> bool {
        if self.is_registered(player) {
            return false;
        }

        self.players.push(player);
        qulock_info!("qulock::ViewSnapshotProvider", "Registered player {:?}", player);

        if self.last_updated_frame == Some(current_frame) {
            self.update_player(player, current_frame, source);
        }
        true
    }

    /// Stop tracking `player` and drop its snapshot
    pub fn unregister(&mut self, player: PlayerKey) -> bool {
        let before = self.players.len();
        self.players.retain(|p| *p != player);
        self.snapshots.remove(&player);

        let removed = self.players.len() != before;
        if removed {
            qulock_info!("qulock::ViewSnapshotProvider", "Unregistered player {:?}", player);
        }
        removed
    }

    pub fn is_registered(&self, player: PlayerKey) -> bool {
        self.players.contains(&player)
    }

    pub fn registered_players(&self) -> &[PlayerKey] {
        &self.players
    }

    /// Recompute the snapshot of every registered player for `frame`
    pub fn refresh(&mut self, frame: FrameId, source: &dyn ViewSource) {
        self.snapshots.retain_frame(frame);
        for index in 0..self.players.len() {
            let player = self.players[index];
            self.update_player(player, frame, source);
        }
        self.last_updated_frame = Some(frame);
    }

    fn update_player(&mut self, player: PlayerKey, frame: FrameId, source: &dyn ViewSource) {
        match source.view_init_options(player) {
            Some(options) => {
                self.snapshots.insert(player, frame, ViewSnapshot::from_view_init_options(&options));
                qulock_trace!("qulock::ViewSnapshotProvider", "Snapshot for {:?} at frame {}", player, frame.0);
            }
            None => {
                self.snapshots.remove(&player);
                qulock_debug!("qulock::ViewSnapshotProvider", "No view for {:?} at frame {}", player, frame.0);
            }
        }
    }

    /// Snapshot computed during `current_frame`, if any
    pub fn snapshot_for(&self, player: PlayerKey, current_frame: FrameId) -> Option<&ViewSnapshot> {
        self.snapshots.get(&player, current_frame)
    }

    pub fn has_snapshot(&self, player: PlayerKey, current_frame: FrameId) -> bool {
        self.snapshot_for(player, current_frame).is_some()
    }

    /// Frame of the last `refresh()`
    pub fn last_updated_frame(&self) -> Option<FrameId> {
        self.last_updated_frame
    }

    /// Forget every player and snapshot
    pub fn reset(&mut self) {
        self.players.clear();
        self.snapshots.clear();
        self.last_updated_frame = None;
    }
}

#[cfg(test)]
#[path = "view_snapshot_provider_tests.rs"]
mod tests;
