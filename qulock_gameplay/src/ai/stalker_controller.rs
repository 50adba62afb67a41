/// StalkerController — AI that only moves while nobody is looking.
///
/// Each tick the controller asks its movement gate whether the pawn may
/// move. Orders are only issued when that answer changes: "frozen" to
/// "free" sends the pawn after its goal actor, which the host follows as
/// it moves; the opposite change stops the pawn.

use glam::Vec3;
use crate::camera::{ViewSnapshotProvider, ViewSource};
use crate::frame::FrameId;
use crate::visibility::{MovementGate, VisibilityConfig};
use crate::world::{ActorKey, AiNavigation, GameWorld, PathFollowingStatus, PlayerKey};
use crate::{qulock_debug, qulock_info};

/// Outcome of one controller tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalkerTick {
    /// Nothing changed
    Unchanged,
    /// Became free to move and issued a move order
    InitiatedMove,
    /// Became visible and stopped
    InterruptedMove,
    /// Reached its goal actor
    CaughtTarget,
}

#[derive(Debug, Clone)]
pub struct StalkerController {
    pawn: ActorKey,
    goal: Option<ActorKey>,
    gate: MovementGate,
    cached_can_move: bool,
    catch_radius: f32,
}

impl StalkerController {
    pub const DEFAULT_CATCH_RADIUS: f32 = 150.0;

    /// Controller for `pawn`, frozen until its first tick says otherwise
    pub fn new(pawn: ActorKey, visibility: VisibilityConfig) -> Self {
        Self {
            pawn,
            goal: None,
            gate: MovementGate::new(pawn, visibility),
            cached_can_move: false,
            catch_radius: Self::DEFAULT_CATCH_RADIUS,
        }
    }

    pub fn with_catch_radius(mut self, catch_radius: f32) -> Self {
        self.catch_radius = catch_radius.max(0.0);
        self
    }

    pub fn pawn(&self) -> ActorKey {
        self.pawn
    }

    pub fn goal(&self) -> Option<ActorKey> {
        self.goal
    }

    /// Actor to chase
    pub fn set_goal(&mut self, goal: Option<ActorKey>) {
        self.goal = goal;
    }

    pub fn catch_radius(&self) -> f32 {
        self.catch_radius
    }

    pub fn gate(&self) -> &MovementGate {
        &self.gate
    }

    /// Whether the last issued order let the pawn move
    pub fn can_move(&self) -> bool {
        self.cached_can_move
    }

    /// Watch `player` for visibility
    pub fn watch_player(
        &mut self,
        player: PlayerKey,
        provider: &mut ViewSnapshotProvider,
        current_frame: FrameId,
        source: &dyn ViewSource,
    ) -> bool {
        self.gate.watch_player(player, provider, current_frame, source)
    }

    pub fn unwatch_player(&mut self, player: PlayerKey) -> bool {
        self.gate.unwatch_player(player)
    }

    /// Run the per-frame decision
    pub fn tick<W: GameWorld>(
        &mut self,
        current_frame: FrameId,
        provider: &ViewSnapshotProvider,
        world: &mut W,
    ) -> StalkerTick {
        let goal_location = self.goal.and_then(|goal| world.actor_location(goal));

        if let (Some(goal), Some(pawn)) = (goal_location, world.actor_location(self.pawn)) {
            if within_radius(pawn, goal, self.catch_radius) {
                qulock_info!("qulock::StalkerController", "{:?} caught its target", self.pawn);
                return StalkerTick::CaughtTarget;
            }
        }

        let can_move = self.gate.can_move(current_frame, provider, &*world);
        if can_move == self.cached_can_move {
            return StalkerTick::Unchanged;
        }

        if can_move {
            // Stays "frozen" until there is something to chase
            let Some(goal) = self.goal.filter(|_| goal_location.is_some()) else {
                return StalkerTick::Unchanged;
            };
            world.move_to_actor(self.pawn, goal);
            self.cached_can_move = true;
            qulock_debug!("qulock::StalkerController", "{:?} may move", self.pawn);
            StalkerTick::InitiatedMove
        } else {
            self.interrupt_move_to(world);
            self.cached_can_move = false;
            qulock_debug!("qulock::StalkerController", "{:?} is seen, stopping", self.pawn);
            StalkerTick::InterruptedMove
        }
    }

    /// Forget the last verdict; the pawn counts as frozen again
    ///
    /// Used when the level is reset under the controller.
    pub fn reset(&mut self, navigation: &mut dyn AiNavigation) {
        self.interrupt_move_to(navigation);
        self.cached_can_move = false;
        self.gate.reset();
    }

    /// Abort the current move order
    pub fn interrupt_move_to(&self, navigation: &mut dyn AiNavigation) {
        navigation.stop_movement(self.pawn);
    }

    pub fn is_move_to_in_progress(&self, navigation: &dyn AiNavigation) -> bool {
        navigation.path_following_status(self.pawn) == PathFollowingStatus::Moving
    }
}

fn within_radius(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) <= radius * radius
}

#[cfg(test)]
#[path = "stalker_controller_tests.rs"]
mod tests;
