/// SimpleWorld — in-memory host adapter.
///
/// A world made of box-shaped actors, with a disc-shaped navigable floor.
/// It implements every host surface the gameplay layer consumes, which makes
/// it the backend for the demo and the tests. Move orders travel in a
/// straight line; there is no pathfinding here.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::qulock_trace;
use super::bounds::AABB;
use super::interfaces::{
    ActorKey, ActorSpawner, AiNavigation, CollisionChannel, HitResult,
    MovementMode, NavigationQuery, PathFollowingStatus, PawnControl, SceneQuery,
};

/// Kind of actor in a SimpleWorld
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    /// Pawn possessed by a local player
    PlayerPawn,
    /// Pawn driven by an AI controller
    AiPawn,
    /// Static scenery
    Prop,
}

/// Spawnable actor template
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub kind: ActorKind,
    pub extents: Vec3,
    pub blocks: CollisionChannel,
}

/// Target of a move order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveGoal {
    Location(Vec3),
    /// Follows the actor wherever it goes
    Actor(ActorKey),
}

/// One actor of a SimpleWorld
#[derive(Debug, Clone)]
pub struct SimActor {
    pub archetype: String,
    pub kind: ActorKind,
    pub bounds: AABB,
    pub blocks: CollisionChannel,
    pub yaw_degrees: f32,
    pub input_enabled: bool,
    pub movement_mode: MovementMode,
    pub max_walk_speed: f32,
    pub move_goal: Option<MoveGoal>,
}

/// Walkable disc (the navigation "mesh")
#[derive(Debug, Clone, Copy)]
pub struct NavArea {
    pub center: Vec3,
    pub radius: f32,
}

/// In-memory world of boxes
pub struct SimpleWorld {
    actors: SlotMap<ActorKey, SimActor>,
    archetypes: FxHashMap<String, Archetype>,
    nav_area: Option<NavArea>,
    rng: StdRng,
}

impl SimpleWorld {
    /// Distance by which boxes are grown for traces, so that a segment
    /// ending exactly on a face still registers a hit
    pub const TRACE_SKIN: f32 = 0.01;

    /// Distance at which a move order counts as arrived
    pub const ARRIVAL_DISTANCE: f32 = 1.0;

    /// Empty world with a deterministic random stream
    pub fn new(seed: u64) -> Self {
        Self {
            actors: SlotMap::with_key(),
            archetypes: FxHashMap::default(),
            nav_area: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // ===== SETUP =====

    /// Make a disc of the floor navigable
    pub fn set_nav_area(&mut self, center: Vec3, radius: f32) {
        self.nav_area = Some(NavArea { center, radius });
    }

    pub fn nav_area(&self) -> Option<NavArea> {
        self.nav_area
    }

    /// Register a template usable with `spawn_actor`
    pub fn register_archetype(&mut self, name: &str, archetype: Archetype) {
        self.archetypes.insert(name.to_string(), archetype);
    }

    /// Add a visibility-blocking box
    pub fn add_prop(&mut self, bounds: AABB) -> ActorKey {
        self.insert_actor("prop", ActorKind::Prop, bounds, CollisionChannel::all(), 0.0)
    }

    /// Add the pawn of a local player
    pub fn add_player_pawn(&mut self, location: Vec3, extents: Vec3) -> ActorKey {
        self.insert_actor(
            "player",
            ActorKind::PlayerPawn,
            AABB::new(location, extents),
            CollisionChannel::all(),
            0.0,
        )
    }

    /// Add an AI pawn without going through an archetype
    pub fn add_ai_pawn(&mut self, location: Vec3, extents: Vec3) -> ActorKey {
        self.insert_actor(
            "ai",
            ActorKind::AiPawn,
            AABB::new(location, extents),
            CollisionChannel::all(),
            0.0,
        )
    }

    fn insert_actor(
        &mut self,
        archetype: &str,
        kind: ActorKind,
        bounds: AABB,
        blocks: CollisionChannel,
        yaw_degrees: f32,
    ) -> ActorKey {
        self.actors.insert(SimActor {
            archetype: archetype.to_string(),
            kind,
            bounds,
            blocks,
            yaw_degrees,
            input_enabled: true,
            movement_mode: match kind {
                ActorKind::PlayerPawn => MovementMode::Walking,
                ActorKind::AiPawn => MovementMode::NavWalking,
                ActorKind::Prop => MovementMode::None,
            },
            max_walk_speed: 0.0,
            move_goal: None,
        })
    }

    pub fn remove_actor(&mut self, actor: ActorKey) -> bool {
        self.actors.remove(actor).is_some()
    }

    pub fn actor(&self, actor: ActorKey) -> Option<&SimActor> {
        self.actors.get(actor)
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Keys of all actors spawned from `archetype`
    pub fn actors_of_archetype<'a>(&'a self, archetype: &'a str) -> impl Iterator<Item = ActorKey> + 'a {
        self.actors.iter()
            .filter(move |(_, a)| a.archetype == archetype)
            .map(|(key, _)| key)
    }

    /// Teleport an actor (keeps its extents)
    pub fn set_actor_location(&mut self, actor: ActorKey, location: Vec3) -> bool {
        match self.actors.get_mut(actor) {
            Some(a) => {
                a.bounds = a.bounds.with_center(location);
                true
            }
            None => false,
        }
    }

    // ===== SIMULATION =====

    /// Advance move orders by `delta_seconds`
    ///
    /// Pawns with a goal and a movement mode other than `None` walk towards
    /// the goal at their max walk speed; the goal is cleared on arrival, or
    /// when a followed actor no longer exists.
    pub fn step(&mut self, delta_seconds: f32) {
        let goals: Vec<(ActorKey, Option<Vec3>)> = self.actors.iter()
            .filter_map(|(key, a)| {
                let goal = match a.move_goal? {
                    MoveGoal::Location(location) => Some(location),
                    MoveGoal::Actor(target) => self.actors.get(target).map(|t| t.bounds.center),
                };
                Some((key, goal))
            })
            .collect();

        for (key, goal) in goals {
            let Some(actor) = self.actors.get_mut(key) else { continue };
            let Some(goal) = goal else {
                actor.move_goal = None;
                continue;
            };
            if actor.movement_mode == MovementMode::None {
                continue;
            }

            let position = actor.bounds.center;
            let to_goal = goal - position;
            let distance = to_goal.length();
            let travel = actor.max_walk_speed * delta_seconds;

            if distance <= travel.max(Self::ARRIVAL_DISTANCE) {
                actor.bounds = actor.bounds.with_center(goal);
                actor.move_goal = None;
            } else {
                actor.bounds = actor.bounds.with_center(position + to_goal / distance * travel);
            }
        }
    }

    fn is_navigable(&self, point: Vec3) -> bool {
        let Some(area) = self.nav_area else { return false };
        let offset = point - area.center;
        if offset.truncate().length_squared() > area.radius * area.radius {
            return false;
        }
        !self.actors.values()
            .any(|a| a.kind == ActorKind::Prop && a.bounds.contains_point(point))
    }
}

impl SceneQuery for SimpleWorld {
    fn components_bounding_box(&self, actor: ActorKey) -> Option<AABB> {
        self.actors.get(actor).map(|a| a.bounds)
    }

    fn line_trace_single(
        &self,
        origin: Vec3,
        dest: Vec3,
        channel: CollisionChannel,
    ) -> Option<HitResult> {
        let length = origin.distance(dest);
        let mut best: Option<(f32, ActorKey)> = None;

        for (key, actor) in &self.actors {
            if !actor.blocks.intersects(channel) {
                continue;
            }
            let shape = actor.bounds.expanded(Self::TRACE_SKIN);
            // Traces starting inside a shape ignore it (the viewer's own pawn)
            if shape.contains_point(origin) {
                continue;
            }
            if let Some(t) = shape.segment_intersection(origin, dest) {
                if best.map_or(true, |(best_t, _)| t < best_t) {
                    best = Some((t, key));
                }
            }
        }

        best.map(|(t, actor)| {
            let location = origin.lerp(dest, t);
            qulock_trace!("qulock::SimpleWorld", "Trace hit {:?} at {:?}", actor, location);
            HitResult {
                actor,
                location,
                distance: t * length,
            }
        })
    }

    fn actor_location(&self, actor: ActorKey) -> Option<Vec3> {
        self.actors.get(actor).map(|a| a.bounds.center)
    }
}

impl NavigationQuery for SimpleWorld {
    fn random_reachable_point_in_radius(&mut self, origin: Vec3, radius: f32) -> Option<Vec3> {
        let area = self.nav_area?;

        // Uniform sample in the disc around `origin`, on the floor plane
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = radius.max(0.0) * self.rng.gen::<f32>().sqrt();
        let candidate = Vec3::new(
            origin.x + distance * angle.cos(),
            origin.y + distance * angle.sin(),
            area.center.z,
        );

        if self.is_navigable(candidate) {
            Some(candidate)
        } else {
            None
        }
    }
}

impl ActorSpawner for SimpleWorld {
    fn spawn_actor(&mut self, archetype: &str, location: Vec3, yaw_degrees: f32) -> Option<ActorKey> {
        let template = *self.archetypes.get(archetype)?;
        Some(self.insert_actor(
            archetype,
            template.kind,
            AABB::new(location, template.extents),
            template.blocks,
            yaw_degrees,
        ))
    }

    fn set_max_walk_speed(&mut self, actor: ActorKey, speed: f32) {
        if let Some(a) = self.actors.get_mut(actor) {
            a.max_walk_speed = speed;
        }
    }

    fn teleport_actor(&mut self, actor: ActorKey, location: Vec3) -> bool {
        self.set_actor_location(actor, location)
    }

    fn destroy_actor(&mut self, actor: ActorKey) -> bool {
        self.remove_actor(actor)
    }
}

impl PawnControl for SimpleWorld {
    fn pawns(&self) -> Vec<ActorKey> {
        self.actors.iter()
            .filter(|(_, a)| a.kind != ActorKind::Prop)
            .map(|(key, _)| key)
            .collect()
    }

    fn is_player_controlled(&self, pawn: ActorKey) -> bool {
        self.actors.get(pawn).map_or(false, |a| a.kind == ActorKind::PlayerPawn)
    }

    fn enable_input(&mut self, pawn: ActorKey) {
        if let Some(a) = self.actors.get_mut(pawn) {
            a.input_enabled = true;
        }
    }

    fn disable_input(&mut self, pawn: ActorKey) {
        if let Some(a) = self.actors.get_mut(pawn) {
            a.input_enabled = false;
        }
    }

    fn is_input_enabled(&self, pawn: ActorKey) -> bool {
        self.actors.get(pawn).map_or(false, |a| a.input_enabled)
    }

    fn set_movement_mode(&mut self, pawn: ActorKey, mode: MovementMode) {
        if let Some(a) = self.actors.get_mut(pawn) {
            a.movement_mode = mode;
        }
    }
}

impl AiNavigation for SimpleWorld {
    fn move_to(&mut self, pawn: ActorKey, goal: Vec3) {
        if let Some(a) = self.actors.get_mut(pawn) {
            a.move_goal = Some(MoveGoal::Location(goal));
        }
    }

    fn move_to_actor(&mut self, pawn: ActorKey, goal: ActorKey) {
        if let Some(a) = self.actors.get_mut(pawn) {
            a.move_goal = Some(MoveGoal::Actor(goal));
        }
    }

    fn stop_movement(&mut self, pawn: ActorKey) {
        if let Some(a) = self.actors.get_mut(pawn) {
            a.move_goal = None;
        }
    }

    fn path_following_status(&self, pawn: ActorKey) -> PathFollowingStatus {
        match self.actors.get(pawn) {
            Some(a) if a.move_goal.is_some() => {
                if a.movement_mode == MovementMode::None {
                    PathFollowingStatus::Paused
                } else {
                    PathFollowingStatus::Moving
                }
            }
            _ => PathFollowingStatus::Idle,
        }
    }
}

#[cfg(test)]
#[path = "simple_world_tests.rs"]
mod tests;
