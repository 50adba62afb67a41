/// Frustum membership test using supporting vertices.
///
/// For each frustum side, the box corner that reaches furthest towards the
/// opposite screen edge is its supporting vertex. If that corner is still
/// outside the side it must clear, the whole box is outside. Survivors are
/// nudged one unit into the box along the view axes and become the
/// candidate points for occlusion traces.

use glam::{Vec2, Vec3};
use crate::camera::{FrustumSide, ViewSnapshot};
use crate::world::AABB;

/// Number of candidate points produced for a frustum member
pub const SUPPORT_VERTEX_COUNT: usize = 4;

/// Screen-space directions with the plane each support vertex must clear.
///
/// Order: left-most, right-most, top-most, bottom-most corner.
const SUPPORT_DIRECTIONS: [(Vec2, FrustumSide); SUPPORT_VERTEX_COUNT] = [
    (Vec2::new(-1.0, 0.0), FrustumSide::Right),
    (Vec2::new(1.0, 0.0), FrustumSide::Left),
    (Vec2::new(0.0, -1.0), FrustumSide::Bottom),
    (Vec2::new(0.0, 1.0), FrustumSide::Top),
];

/// Corner whose screen position extends furthest along `screen_direction`
///
/// Ties keep the first corner in iteration order. Corners behind the
/// camera are skipped; `None` if no corner projects.
pub fn compute_projected_support_vertex(
    snapshot: &ViewSnapshot,
    corners: &[Vec3],
    screen_direction: Vec2,
) -> Option<Vec3> {
    let mut best: Option<(f32, Vec3)> = None;

    for corner in corners {
        let Some(screen) = snapshot.project_world_to_screen(*corner) else {
            continue;
        };
        let projection = screen_direction.dot(screen);
        if best.map_or(true, |(max, _)| projection > max) {
            best = Some((projection, *corner));
        }
    }

    best.map(|(_, corner)| corner)
}

/// Test whether `bounds` reaches into the view frustum
///
/// Returns the four raycast candidates (left-most, right-most, top-most,
/// bottom-most, each pushed `vertex_inset` units into the box), or `None`
/// when the box lies entirely beyond one of the side planes.
pub fn test_frustum(
    snapshot: &ViewSnapshot,
    bounds: &AABB,
    vertex_inset: f32,
) -> Option<[Vec3; SUPPORT_VERTEX_COUNT]> {
    let corners = bounds.corners();
    let frustum = snapshot.side_frustum();

    let mut support = [Vec3::ZERO; SUPPORT_VERTEX_COUNT];
    for (slot, (direction, side)) in support.iter_mut().zip(SUPPORT_DIRECTIONS) {
        let vertex = compute_projected_support_vertex(snapshot, &corners, direction)?;
        if frustum.plane(side).is_violated_by(vertex) {
            return None;
        }
        *slot = vertex;
    }

    let right = snapshot.world_right() * vertex_inset;
    let up = snapshot.world_up() * vertex_inset;

    Some([
        support[0] + right,
        support[1] - right,
        support[2] - up,
        support[3] + up,
    ])
}

#[cfg(test)]
#[path = "frustum_membership_tests.rs"]
mod tests;
