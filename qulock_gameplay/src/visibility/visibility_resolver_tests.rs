use std::cell::RefCell;
use std::collections::VecDeque;
use glam::Vec3;
use slotmap::SlotMap;
use crate::camera::{FrustumSide, ViewSnapshot};
use crate::test_support::view_down_x;
use crate::world::{AABB, HitResult, SimpleWorld};
use super::*;

fn snapshot() -> ViewSnapshot {
    ViewSnapshot::from_view_init_options(&view_down_x(Vec3::ZERO))
}

fn actor_keys(count: usize) -> Vec<ActorKey> {
    let mut actors: SlotMap<ActorKey, ()> = SlotMap::with_key();
    (0..count).map(|_| actors.insert(())).collect()
}

// ============================================================================
// Scripted scene
// ============================================================================

/// Scene that answers traces from a script and records every request
struct ScriptedScene {
    answers: RefCell<VecDeque<Option<ActorKey>>>,
    traces: RefCell<Vec<(Vec3, Vec3)>>,
}

impl ScriptedScene {
    fn new(answers: &[Option<ActorKey>]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            traces: RefCell::new(Vec::new()),
        }
    }

    fn trace_count(&self) -> usize {
        self.traces.borrow().len()
    }

    fn trace_dest(&self, index: usize) -> Vec3 {
        self.traces.borrow()[index].1
    }
}

impl SceneQuery for ScriptedScene {
    fn components_bounding_box(&self, _actor: ActorKey) -> Option<AABB> {
        None
    }

    fn line_trace_single(&self, origin: Vec3, dest: Vec3, _channel: CollisionChannel) -> Option<HitResult> {
        self.traces.borrow_mut().push((origin, dest));
        let actor = self.answers.borrow_mut().pop_front().flatten()?;
        Some(HitResult { actor, location: dest, distance: origin.distance(dest) })
    }

    fn actor_location(&self, _actor: ActorKey) -> Option<Vec3> {
        None
    }
}

// ============================================================================
// Visibility against a real scene
// ============================================================================

#[test]
fn test_unoccluded_box_ahead_is_visible() {
    let mut world = SimpleWorld::new(0);
    let target = world.add_prop(AABB::new(Vec3::new(500.0, 0.0, 0.0), Vec3::splat(50.0)));

    assert!(is_actor_in_view(&snapshot(), &world, target, &VisibilityConfig::default()));
}

#[test]
fn test_wall_between_camera_and_box_hides_it() {
    let mut world = SimpleWorld::new(0);
    let target = world.add_prop(AABB::new(Vec3::new(500.0, 0.0, 0.0), Vec3::splat(50.0)));
    world.add_prop(AABB::new(Vec3::new(250.0, 0.0, 0.0), Vec3::new(10.0, 1000.0, 1000.0)));

    assert!(!is_actor_in_view(&snapshot(), &world, target, &VisibilityConfig::default()));
}

#[test]
fn test_box_outside_frustum_is_not_visible() {
    let mut world = SimpleWorld::new(0);
    let target = world.add_prop(AABB::new(Vec3::new(100.0, -10_000.0, 0.0), Vec3::splat(50.0)));

    assert!(!is_actor_in_view(&snapshot(), &world, target, &VisibilityConfig::default()));
}

#[test]
fn test_actor_without_bounds_is_not_visible() {
    let scene = ScriptedScene::new(&[]);
    let target = actor_keys(1)[0];

    assert!(!is_actor_in_view(&snapshot(), &scene, target, &VisibilityConfig::default()));
    assert_eq!(scene.trace_count(), 0);
}

// ============================================================================
// Candidate handling
// ============================================================================

#[test]
fn test_trace_is_extended_past_candidate() {
    let target = actor_keys(1)[0];
    let scene = ScriptedScene::new(&[Some(target)]);
    let candidate = Vec3::new(500.0, 0.0, 0.0);

    assert!(is_visible(&scene, Vec3::ZERO, target, &[candidate], &snapshot().side_frustum(), &VisibilityConfig::default()));
    assert!((scene.trace_dest(0) - Vec3::new(510.0, 0.0, 0.0)).length() < 1e-4);
}

#[test]
fn test_first_success_stops_search() {
    let target = actor_keys(1)[0];
    let scene = ScriptedScene::new(&[Some(target), Some(target)]);
    let candidates = [Vec3::new(500.0, 0.0, 0.0), Vec3::new(500.0, 10.0, 0.0)];

    assert!(is_visible(&scene, Vec3::ZERO, target, &candidates, &snapshot().side_frustum(), &VisibilityConfig::default()));
    assert_eq!(scene.trace_count(), 1);
}

#[test]
fn test_miss_moves_on_to_next_candidate() {
    let target = actor_keys(1)[0];
    let scene = ScriptedScene::new(&[None, Some(target)]);
    let candidates = [Vec3::new(500.0, 0.0, 0.0), Vec3::new(500.0, 10.0, 0.0)];

    assert!(is_visible(&scene, Vec3::ZERO, target, &candidates, &snapshot().side_frustum(), &VisibilityConfig::default()));
    assert_eq!(scene.trace_count(), 2);
}

#[test]
fn test_occluded_candidate_inside_frustum_is_not_retried() {
    let keys = actor_keys(2);
    let (target, wall) = (keys[0], keys[1]);
    let scene = ScriptedScene::new(&[Some(wall)]);

    assert!(!is_visible(&scene, Vec3::ZERO, target, &[Vec3::new(500.0, 0.0, 0.0)], &snapshot().side_frustum(), &VisibilityConfig::default()));
    assert_eq!(scene.trace_count(), 1);
}

#[test]
fn test_all_candidates_failing_is_not_visible() {
    let target = actor_keys(1)[0];
    let scene = ScriptedScene::new(&[None, None, None, None]);
    let candidates = [Vec3::new(500.0, 0.0, 0.0); 4];

    assert!(!is_visible(&scene, Vec3::ZERO, target, &candidates, &snapshot().side_frustum(), &VisibilityConfig::default()));
    assert_eq!(scene.trace_count(), 4);
}

// ============================================================================
// Projection onto violated planes
// ============================================================================

#[test]
fn test_hit_outside_frustum_is_retraced_on_plane() {
    let target = actor_keys(1)[0];
    // Direct hit, then the retrace misses
    let scene = ScriptedScene::new(&[Some(target), None]);
    let frustum = snapshot().side_frustum();
    let outside_right = Vec3::new(500.0, -2000.0, 0.0);

    assert!(!is_visible(&scene, Vec3::ZERO, target, &[outside_right], &frustum, &VisibilityConfig::default()));
    assert_eq!(scene.trace_count(), 2);

    let retrace = scene.trace_dest(1);
    assert!(frustum.plane(FrustumSide::Right).signed_distance(retrace).abs() < 1e-2);
}

#[test]
fn test_occluded_outside_candidate_recovers_through_projection() {
    let keys = actor_keys(2);
    let (target, wall) = (keys[0], keys[1]);
    let scene = ScriptedScene::new(&[Some(wall), Some(target)]);
    let outside_right = Vec3::new(500.0, -2000.0, 0.0);

    assert!(is_visible(&scene, Vec3::ZERO, target, &[outside_right], &snapshot().side_frustum(), &VisibilityConfig::default()));
}

#[test]
fn test_multiple_violations_project_sequentially() {
    let target = actor_keys(1)[0];
    let scene = ScriptedScene::new(&[Some(target), None]);
    let frustum = snapshot().side_frustum();
    let config = VisibilityConfig::default();
    let corner = Vec3::new(500.0, -2000.0, 2000.0);

    is_visible(&scene, Vec3::ZERO, target, &[corner], &frustum, &config);

    let extended = corner + corner.normalize() * config.trace_tolerance;
    let right = frustum.plane(FrustumSide::Right);
    let top = frustum.plane(FrustumSide::Top);
    let mut expected = extended;
    if right.is_violated_by(expected) {
        expected = right.project_point(expected);
    }
    if top.is_violated_by(expected) {
        expected = top.project_point(expected);
    }

    assert!((scene.trace_dest(1) - expected).length() < 1e-2);
    assert!(right.is_violated_by(extended));
}

#[test]
fn test_projection_disabled_accepts_direct_hits() {
    let target = actor_keys(1)[0];
    let scene = ScriptedScene::new(&[Some(target)]);
    let config = VisibilityConfig { use_projected_vertex_traces: false, ..VisibilityConfig::default() };
    let outside_right = Vec3::new(500.0, -2000.0, 0.0);

    assert!(is_visible(&scene, Vec3::ZERO, target, &[outside_right], &snapshot().side_frustum(), &config));
    assert_eq!(scene.trace_count(), 1);
}

#[test]
fn test_default_config() {
    let config = VisibilityConfig::default();
    assert_eq!(config.trace_tolerance, 10.0);
    assert_eq!(config.vertex_inset, 1.0);
    assert_eq!(config.trace_channel, CollisionChannel::VISIBILITY);
    assert!(config.use_projected_vertex_traces);
}
