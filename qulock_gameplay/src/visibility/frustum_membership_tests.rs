use glam::{Vec2, Vec3};
use crate::camera::ViewSnapshot;
use crate::test_support::view_down_x;
use super::*;

fn snapshot() -> ViewSnapshot {
    ViewSnapshot::from_view_init_options(&view_down_x(Vec3::ZERO))
}

fn assert_vec3_near(a: Vec3, b: Vec3) {
    assert!((a - b).length() < 1e-3, "{:?} != {:?}", a, b);
}

// ============================================================================
// compute_projected_support_vertex
// ============================================================================

#[test]
fn test_support_vertex_picks_extreme_corner() {
    let corners = [
        Vec3::new(500.0, 0.0, 0.0),
        Vec3::new(500.0, 100.0, 0.0),
        Vec3::new(500.0, -100.0, 0.0),
    ];
    let s = snapshot();

    // Screen left is world +Y
    assert_eq!(compute_projected_support_vertex(&s, &corners, Vec2::new(-1.0, 0.0)), Some(corners[1]));
    assert_eq!(compute_projected_support_vertex(&s, &corners, Vec2::new(1.0, 0.0)), Some(corners[2]));
}

#[test]
fn test_support_vertex_tie_keeps_first() {
    // Same screen X, different heights
    let corners = [Vec3::new(500.0, 10.0, 50.0), Vec3::new(500.0, 10.0, -50.0)];
    let vertex = compute_projected_support_vertex(&snapshot(), &corners, Vec2::new(-1.0, 0.0));
    assert_eq!(vertex, Some(corners[0]));
}

#[test]
fn test_support_vertex_skips_corners_behind_camera() {
    let corners = [Vec3::new(-500.0, 1000.0, 0.0), Vec3::new(500.0, 0.0, 0.0)];
    let vertex = compute_projected_support_vertex(&snapshot(), &corners, Vec2::new(-1.0, 0.0));
    assert_eq!(vertex, Some(corners[1]));
}

#[test]
fn test_support_vertex_none_when_nothing_projects() {
    let corners = [Vec3::new(-500.0, 0.0, 0.0)];
    assert!(compute_projected_support_vertex(&snapshot(), &corners, Vec2::new(1.0, 0.0)).is_none());
}

// ============================================================================
// test_frustum
// ============================================================================

#[test]
fn test_box_ahead_is_member_with_inset_vertices() {
    let bounds = AABB::new(Vec3::new(500.0, 0.0, 0.0), Vec3::splat(50.0));
    let vertices = test_frustum(&snapshot(), &bounds, 1.0).unwrap();

    // Near face corners, pushed one unit back into the box
    assert_vec3_near(vertices[0], Vec3::new(450.0, 49.0, 50.0));
    assert_vec3_near(vertices[1], Vec3::new(450.0, -49.0, 50.0));
    assert_vec3_near(vertices[2], Vec3::new(450.0, 50.0, 49.0));
    assert_vec3_near(vertices[3], Vec3::new(450.0, 50.0, -49.0));
}

#[test]
fn test_box_far_right_is_rejected() {
    let s = snapshot();
    let center = s.view_origin + s.world_forward() * 100.0 + s.world_right() * 10_000.0;
    let bounds = AABB::new(center, Vec3::splat(50.0));
    assert!(test_frustum(&s, &bounds, 1.0).is_none());
}

#[test]
fn test_box_far_left_or_above_is_rejected() {
    let s = snapshot();
    let left = AABB::new(Vec3::new(100.0, 10_000.0, 0.0), Vec3::splat(50.0));
    let above = AABB::new(Vec3::new(100.0, 0.0, 10_000.0), Vec3::splat(50.0));
    let below = AABB::new(Vec3::new(100.0, 0.0, -10_000.0), Vec3::splat(50.0));
    assert!(test_frustum(&s, &left, 1.0).is_none());
    assert!(test_frustum(&s, &above, 1.0).is_none());
    assert!(test_frustum(&s, &below, 1.0).is_none());
}

#[test]
fn test_box_behind_camera_is_rejected() {
    let bounds = AABB::new(Vec3::new(-500.0, 0.0, 0.0), Vec3::splat(50.0));
    assert!(test_frustum(&snapshot(), &bounds, 1.0).is_none());
}

#[test]
fn test_box_straddling_right_edge_is_member() {
    // Right edge of the view at x = 500 is y ≈ -889
    let bounds = AABB::new(Vec3::new(500.0, -900.0, 0.0), Vec3::splat(100.0));
    assert!(test_frustum(&snapshot(), &bounds, 1.0).is_some());
}

#[test]
fn test_degenerate_box_yields_point_candidates() {
    let point = Vec3::new(500.0, 20.0, -10.0);
    let bounds = AABB::new(point, Vec3::ZERO);
    let vertices = test_frustum(&snapshot(), &bounds, 1.0).unwrap();

    assert_vec3_near(vertices[0], point + Vec3::NEG_Y);
    assert_vec3_near(vertices[1], point + Vec3::Y);
    assert_vec3_near(vertices[2], point + Vec3::NEG_Z);
    assert_vec3_near(vertices[3], point + Vec3::Z);
}

#[test]
fn test_zero_inset_returns_raw_corners() {
    let bounds = AABB::new(Vec3::new(500.0, 0.0, 0.0), Vec3::splat(50.0));
    let vertices = test_frustum(&snapshot(), &bounds, 0.0).unwrap();
    assert!(vertices.iter().all(|v| bounds.corners().contains(v)));
}
