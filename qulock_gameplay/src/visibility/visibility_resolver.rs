/// Occlusion resolver — turns frustum candidates into a visibility verdict.
///
/// Each candidate point is traced from the view origin. A trace that lands
/// on the target from inside the frustum means the target is visible. A
/// candidate outside one or more side planes is pulled back onto them and
/// traced once more.
///
/// Known limitation: an occluder between the camera and a candidate can
/// report "not visible" even when another part of the target is on
/// screen. This is accepted; the resolver is a heuristic, not an exact
/// visibility test.

use glam::Vec3;
use crate::camera::{SideFrustum, ViewSnapshot};
use crate::world::{ActorKey, CollisionChannel, SceneQuery};
use crate::qulock_trace;
use super::frustum_membership::test_frustum;

/// Tuning for the visibility traces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityConfig {
    /// How far past each candidate the trace is extended
    pub trace_tolerance: f32,
    /// How far support vertices are pushed into the target's box
    pub vertex_inset: f32,
    /// Channel the traces run against
    pub trace_channel: CollisionChannel,
    /// Retry candidates outside the frustum after projecting them onto it
    pub use_projected_vertex_traces: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            trace_tolerance: 10.0,
            vertex_inset: 1.0,
            trace_channel: CollisionChannel::VISIBILITY,
            use_projected_vertex_traces: true,
        }
    }
}

fn hits_target(
    scene: &dyn SceneQuery,
    origin: Vec3,
    dest: Vec3,
    target: ActorKey,
    channel: CollisionChannel,
) -> Option<bool> {
    scene
        .line_trace_single(origin, dest, channel)
        .map(|hit| hit.actor == target)
}

/// Whether any candidate traces through to `target`
///
/// Candidates are tried in order and the first success stops the search.
pub fn is_visible(
    scene: &dyn SceneQuery,
    view_origin: Vec3,
    target: ActorKey,
    candidates: &[Vec3],
    frustum: &SideFrustum,
    config: &VisibilityConfig,
) -> bool {
    for (index, candidate) in candidates.iter().enumerate() {
        let direction = (*candidate - view_origin).normalize_or_zero();
        let vertex = *candidate + direction * config.trace_tolerance;

        let Some(hit_target) = hits_target(scene, view_origin, vertex, target, config.trace_channel) else {
            qulock_trace!("qulock::VisibilityResolver", "Candidate {} hit nothing", index);
            continue;
        };

        if !config.use_projected_vertex_traces {
            if hit_target {
                return true;
            }
            continue;
        }

        // Each violated side re-projects the current point
        let mut projected = vertex;
        let mut violated = false;
        for (_, plane) in frustum.iter() {
            if plane.is_violated_by(projected) {
                projected = plane.project_point(projected);
                violated = true;
            }
        }

        if hit_target && !violated {
            qulock_trace!("qulock::VisibilityResolver", "Candidate {} reached the target", index);
            return true;
        }

        if violated {
            let retry = hits_target(scene, view_origin, projected, target, config.trace_channel);
            if retry == Some(true) {
                qulock_trace!("qulock::VisibilityResolver", "Projected candidate {} reached the target", index);
                return true;
            }
        }

        qulock_trace!("qulock::VisibilityResolver", "Candidate {} blocked", index);
    }

    false
}

/// Full test of one actor against one player's view
///
/// Frustum membership followed by occlusion traces. An actor without
/// bounds is not visible.
pub fn is_actor_in_view(
    snapshot: &ViewSnapshot,
    scene: &dyn SceneQuery,
    actor: ActorKey,
    config: &VisibilityConfig,
) -> bool {
    let Some(bounds) = scene.components_bounding_box(actor) else {
        return false;
    };
    let Some(candidates) = test_frustum(snapshot, &bounds, config.vertex_inset) else {
        return false;
    };

    is_visible(
        scene,
        snapshot.view_origin,
        actor,
        &candidates,
        &snapshot.side_frustum(),
        config,
    )
}

#[cfg(test)]
#[path = "visibility_resolver_tests.rs"]
mod tests;
