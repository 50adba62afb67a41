/// Host engine surfaces consumed by the gameplay layer.
///
/// Each trait is a narrow slice of what a host engine offers: scene
/// queries, navigation, spawning, pawn control and AI path following.
/// The gameplay code never sees the host's actor hierarchy, only keys.

use bitflags::bitflags;
use glam::Vec3;
use slotmap::new_key_type;
use super::bounds::AABB;

new_key_type! {
    /// Stable handle to an actor in the host world
    pub struct ActorKey;

    /// Stable handle to a local player (one viewport)
    pub struct PlayerKey;
}

bitflags! {
    /// Collision channels a trace can run against
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionChannel: u32 {
        /// Sight lines (cameras, AI perception)
        const VISIBILITY = 1 << 0;
        /// Camera collision
        const CAMERA     = 1 << 1;
        /// Pawn movement collision
        const PAWN       = 1 << 2;
    }
}

/// First blocking hit of a line trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Actor that blocked the trace
    pub actor: ActorKey,
    /// World-space impact point
    pub location: Vec3,
    /// Distance from the trace start to the impact point
    pub distance: f32,
}

/// Character movement modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// Movement disabled
    #[default]
    None,
    /// Regular walking (player pawns)
    Walking,
    /// Walking constrained to the navigation mesh (AI pawns)
    NavWalking,
}

/// Path-following state of an AI-driven pawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathFollowingStatus {
    #[default]
    Idle,
    Waiting,
    Paused,
    Moving,
}

/// Read-only scene queries
pub trait SceneQuery {
    /// Combined bounds of all of an actor's components
    fn components_bounding_box(&self, actor: ActorKey) -> Option<AABB>;

    /// First blocking hit between `origin` and `dest` on `channel`
    fn line_trace_single(
        &self,
        origin: Vec3,
        dest: Vec3,
        channel: CollisionChannel,
    ) -> Option<HitResult>;

    /// Actor root location
    fn actor_location(&self, actor: ActorKey) -> Option<Vec3>;
}

/// Navigation mesh queries
pub trait NavigationQuery {
    /// Random point reachable from `origin` within `radius`.
    ///
    /// `None` is a transient miss for this attempt, not an error.
    fn random_reachable_point_in_radius(&mut self, origin: Vec3, radius: f32) -> Option<Vec3>;
}

/// Actor creation
pub trait ActorSpawner {
    /// Spawn an actor of the given archetype; `None` if the host refused
    fn spawn_actor(&mut self, archetype: &str, location: Vec3, yaw_degrees: f32) -> Option<ActorKey>;

    /// Set a character's maximum walk speed (world units per second)
    fn set_max_walk_speed(&mut self, actor: ActorKey, speed: f32);

    /// Move an actor instantly; false if it does not exist
    fn teleport_actor(&mut self, actor: ActorKey, location: Vec3) -> bool;

    /// Remove an actor from the world; false if it does not exist
    fn destroy_actor(&mut self, actor: ActorKey) -> bool;
}

/// Input and movement control over pawns
pub trait PawnControl {
    /// All pawns currently in the world
    fn pawns(&self) -> Vec<ActorKey>;

    /// Whether the pawn is driven by a local player (vs. AI)
    fn is_player_controlled(&self, pawn: ActorKey) -> bool;

    fn enable_input(&mut self, pawn: ActorKey);

    fn disable_input(&mut self, pawn: ActorKey);

    fn is_input_enabled(&self, pawn: ActorKey) -> bool;

    fn set_movement_mode(&mut self, pawn: ActorKey, mode: MovementMode);
}

/// AI move orders
pub trait AiNavigation {
    /// Start (or retarget) a move order towards a fixed point
    fn move_to(&mut self, pawn: ActorKey, goal: Vec3);

    /// Start a move order that follows `goal` as it moves, until reached
    fn move_to_actor(&mut self, pawn: ActorKey, goal: ActorKey);

    /// Abort the current move order
    fn stop_movement(&mut self, pawn: ActorKey);

    fn path_following_status(&self, pawn: ActorKey) -> PathFollowingStatus;
}

/// Everything the match and the stalkers need from the host
pub trait GameWorld: SceneQuery + NavigationQuery + ActorSpawner + PawnControl + AiNavigation {}

impl<T> GameWorld for T where T: SceneQuery + NavigationQuery + ActorSpawner + PawnControl + AiNavigation {}
