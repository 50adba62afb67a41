/// View source — per-player camera state handed over by the host.
///
/// The host fills a `ViewInitOptions` for each local player (where its
/// camera sits, how it is rotated, how it projects, which part of the
/// screen it owns). The snapshot provider turns it into a `ViewSnapshot`.

use glam::{IVec2, Mat4, Vec3};
use crate::world::PlayerKey;

/// Integer screen-space rectangle, `min` inclusive and `max` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewRect {
    pub min: IVec2,
    pub max: IVec2,
}

impl ViewRect {
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the screen origin
    pub fn from_size(width: i32, height: i32) -> Self {
        Self {
            min: IVec2::ZERO,
            max: IVec2::new(width, height),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Whether the rectangle covers no pixel
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// Camera state for one player, as computed by the host for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewInitOptions {
    /// Camera position in world space
    pub view_origin: Vec3,
    /// World-to-view rotation (no translation)
    pub view_rotation_matrix: Mat4,
    /// View-to-clip projection
    pub projection_matrix: Mat4,
    /// Viewport after letterboxing / split-screen
    pub constrained_view_rect: ViewRect,
}

impl ViewInitOptions {
    /// World-to-view transform (rotation after translation to the origin)
    pub fn view_matrix(&self) -> Mat4 {
        self.view_rotation_matrix * Mat4::from_translation(-self.view_origin)
    }

    /// World-to-clip transform
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix()
    }
}

/// Host surface that computes per-player view options
pub trait ViewSource {
    /// Options for `player`, or `None` if it has no viewport this frame
    fn view_init_options(&self, player: PlayerKey) -> Option<ViewInitOptions>;
}
