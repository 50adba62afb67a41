/// ViewSnapshot — immutable camera state for one player and one frame.
///
/// Built once per frame by the `ViewSnapshotProvider` and read by every
/// visibility query of that frame. Holds the inverse view rotation so that
/// readers never pay for the matrix inverse.

use glam::{Mat4, Vec2, Vec3};
use super::frustum::SideFrustum;
use super::view_source::{ViewInitOptions, ViewRect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSnapshot {
    /// World to clip space
    pub view_projection_matrix: Mat4,
    /// View-space axes expressed in world space
    pub inverse_view_rotation_matrix: Mat4,
    /// Camera position in world space
    pub view_origin: Vec3,
    /// Constrained viewport
    pub view_rect: ViewRect,
}

impl ViewSnapshot {
    pub fn from_view_init_options(options: &ViewInitOptions) -> Self {
        Self {
            view_projection_matrix: options.view_projection_matrix(),
            inverse_view_rotation_matrix: options.view_rotation_matrix.inverse(),
            view_origin: options.view_origin,
            view_rect: options.constrained_view_rect,
        }
    }

    /// Screen position of a world point, `None` when behind the camera
    ///
    /// Screen Y grows downward. Points outside the viewport still get a
    /// position (beyond the rectangle).
    pub fn project_world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_projection_matrix * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let min = self.view_rect.min.as_vec2();
        let width = self.view_rect.width() as f32;
        let height = self.view_rect.height() as f32;

        Some(Vec2::new(
            min.x + (0.5 + ndc_x * 0.5) * width,
            min.y + (0.5 - ndc_y * 0.5) * height,
        ))
    }

    /// World direction of screen right
    pub fn world_right(&self) -> Vec3 {
        self.inverse_view_rotation_matrix.x_axis.truncate()
    }

    /// World direction of screen up
    pub fn world_up(&self) -> Vec3 {
        self.inverse_view_rotation_matrix.y_axis.truncate()
    }

    /// World direction the camera looks at
    pub fn world_forward(&self) -> Vec3 {
        -self.inverse_view_rotation_matrix.z_axis.truncate()
    }

    /// Side planes of this view (recomputed on each call)
    pub fn side_frustum(&self) -> SideFrustum {
        SideFrustum::from_view_projection(&self.view_projection_matrix)
    }
}

#[cfg(test)]
#[path = "view_snapshot_tests.rs"]
mod tests;
