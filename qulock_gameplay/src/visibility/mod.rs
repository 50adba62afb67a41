//! Visibility module — the visibility-gated movement core.
//!
//! Pipeline: view snapshot → frustum membership (support vertices) →
//! occlusion traces → per-frame movement verdict.

mod frustum_membership;
mod movement_gate;
mod visibility_resolver;

pub use frustum_membership::{compute_projected_support_vertex, test_frustum, SUPPORT_VERTEX_COUNT};
pub use movement_gate::MovementGate;
pub use visibility_resolver::{is_actor_in_view, is_visible, VisibilityConfig};
