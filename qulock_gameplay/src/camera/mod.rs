//! Camera module — per-frame view snapshots and frustum side planes.
//!
//! The host supplies raw camera state through `ViewSource`; the provider
//! freezes it into one `ViewSnapshot` per player and frame, which the
//! visibility code reads as many times as it likes.

mod frustum;
mod view_snapshot;
mod view_snapshot_provider;
mod view_source;

pub use frustum::{FrustumPlane, FrustumSide, SideFrustum};
pub use view_snapshot::ViewSnapshot;
pub use view_snapshot_provider::ViewSnapshotProvider;
pub use view_source::{ViewInitOptions, ViewRect, ViewSource};
