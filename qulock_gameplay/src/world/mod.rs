//! World module — the host engine boundary.
//!
//! Gameplay code talks to the host through the narrow traits in
//! `interfaces`. `SimpleWorld` is an in-memory implementation of all of
//! them, used by the demo and the tests.

mod bounds;
mod interfaces;
mod simple_world;

pub use bounds::AABB;
pub use interfaces::{
    ActorKey, PlayerKey, CollisionChannel, HitResult, MovementMode, PathFollowingStatus,
    SceneQuery, NavigationQuery, ActorSpawner, PawnControl, AiNavigation, GameWorld,
};
pub use simple_world::{SimpleWorld, SimActor, ActorKind, Archetype, MoveGoal, NavArea};
