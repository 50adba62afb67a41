use super::*;

#[test]
fn test_new_takes_absolute_extents() {
    let b = AABB::new(Vec3::ZERO, Vec3::new(-1.0, 2.0, -3.0));
    assert_eq!(b.extents, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_from_min_max_any_order() {
    let b = AABB::from_min_max(Vec3::new(2.0, 2.0, 2.0), Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(b.center, Vec3::new(0.0, 1.0, 1.0));
    assert_eq!(b.min(), Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(b.max(), Vec3::new(2.0, 2.0, 2.0));
}

#[test]
fn test_corner_order() {
    let b = AABB::new(Vec3::ZERO, Vec3::ONE);
    let c = b.corners();
    assert_eq!(c[0], Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(c[1], Vec3::new(1.0, 1.0, -1.0));
    assert_eq!(c[2], Vec3::new(1.0, -1.0, 1.0));
    assert_eq!(c[7], Vec3::new(-1.0, -1.0, -1.0));
}

#[test]
fn test_degenerate_box_collapses_corners() {
    let p = Vec3::new(3.0, 4.0, 5.0);
    let b = AABB::new(p, Vec3::ZERO);
    assert!(b.is_degenerate());
    assert!(b.corners().iter().all(|c| *c == p));
}

#[test]
fn test_contains_point_on_boundary() {
    let b = AABB::new(Vec3::ZERO, Vec3::ONE);
    assert!(b.contains_point(Vec3::new(1.0, 0.0, 0.0)));
    assert!(!b.contains_point(Vec3::new(1.01, 0.0, 0.0)));
}

// ============================================================================
// Segment intersection
// ============================================================================

#[test]
fn test_segment_entry_fraction() {
    let b = AABB::new(Vec3::new(10.0, 0.0, 0.0), Vec3::ONE);
    let t = b.segment_intersection(Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0)).unwrap();
    assert!((t - 0.45).abs() < 1e-5);
}

#[test]
fn test_segment_starting_inside() {
    let b = AABB::new(Vec3::ZERO, Vec3::ONE);
    assert_eq!(b.segment_intersection(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)), Some(0.0));
}

#[test]
fn test_segment_miss_parallel_outside() {
    let b = AABB::new(Vec3::ZERO, Vec3::ONE);
    assert!(b.segment_intersection(Vec3::new(-5.0, 2.0, 0.0), Vec3::new(5.0, 2.0, 0.0)).is_none());
}

#[test]
fn test_segment_too_short() {
    let b = AABB::new(Vec3::new(10.0, 0.0, 0.0), Vec3::ONE);
    assert!(b.segment_intersection(Vec3::ZERO, Vec3::new(8.0, 0.0, 0.0)).is_none());
}

#[test]
fn test_expanded_grows_every_side() {
    let b = AABB::new(Vec3::ZERO, Vec3::ONE).expanded(0.5);
    assert_eq!(b.extents, Vec3::splat(1.5));
}
