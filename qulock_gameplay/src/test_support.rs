//! Shared fixtures for unit tests (no host engine required)
//!
//! The standard view is a 1920x1080 viewport looking down +X from the
//! given origin, with a 90° vertical field of view.

use std::cell::Cell;
use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::camera::{ViewInitOptions, ViewRect, ViewSource};
use crate::world::PlayerKey;

pub const VIEW_WIDTH: i32 = 1920;
pub const VIEW_HEIGHT: i32 = 1080;

/// View at `origin` looking down +X, Z up
pub fn view_down_x(origin: Vec3) -> ViewInitOptions {
    ViewInitOptions {
        view_origin: origin,
        view_rotation_matrix: Mat4::look_at_rh(Vec3::ZERO, Vec3::X, Vec3::Z),
        projection_matrix: Mat4::perspective_rh(
            std::f32::consts::FRAC_PI_2,
            VIEW_WIDTH as f32 / VIEW_HEIGHT as f32,
            10.0,
            100_000.0,
        ),
        constrained_view_rect: ViewRect::from_size(VIEW_WIDTH, VIEW_HEIGHT),
    }
}

/// `count` distinct player keys
pub fn player_keys(count: usize) -> Vec<PlayerKey> {
    let mut players: SlotMap<PlayerKey, ()> = SlotMap::with_key();
    (0..count).map(|_| players.insert(())).collect()
}

// ============================================================================
// Mock view source
// ============================================================================

/// View source with fixed per-player options that counts its calls
#[derive(Default)]
pub struct MockViewSource {
    pub views: FxHashMap<PlayerKey, ViewInitOptions>,
    calls: Cell<usize>,
}

impl MockViewSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, player: PlayerKey, options: ViewInitOptions) -> Self {
        self.views.insert(player, options);
        self
    }

    /// Number of `view_init_options` calls so far
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ViewSource for MockViewSource {
    fn view_init_options(&self, player: PlayerKey) -> Option<ViewInitOptions> {
        self.calls.set(self.calls.get() + 1);
        self.views.get(&player).copied()
    }
}
