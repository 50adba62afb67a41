/// PlayerCharacter — first-person pawn input and camera.
///
/// Turns the three input actions into movement input, control rotation and
/// pause requests, and produces the view options the snapshot provider
/// consumes. Movement input accumulates until the host consumes it; the
/// character never moves its pawn itself.

use glam::{Mat4, Quat, Vec2, Vec3};
use crate::camera::{ViewInitOptions, ViewRect};
use crate::world::ActorKey;
use crate::qulock_trace;

/// Input actions bound to the character
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// X strafes right, Y moves forward
    Move(Vec2),
    /// X turns right, Y looks up (degrees)
    Look(Vec2),
    /// Pause the match
    Pause,
}

/// What the character did with an input action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Movement or rotation was updated
    Applied,
    /// The match should be paused (if it is running)
    PauseRequested,
    /// The character is not possessed
    Ignored,
}

#[derive(Debug, Clone)]
pub struct PlayerCharacter {
    pawn: ActorKey,
    possessed: bool,
    yaw_degrees: f32,
    pitch_degrees: f32,
    pending_movement: Vec3,
    horizontal_fov_degrees: f32,
}

impl PlayerCharacter {
    /// Camera position relative to the pawn, before yaw
    pub const CAMERA_OFFSET: Vec3 = Vec3::new(-10.0, 0.0, 60.0);
    /// Pitch limit in degrees, both ways
    pub const MAX_PITCH_DEGREES: f32 = 89.0;
    pub const DEFAULT_FOV_DEGREES: f32 = 90.0;
    pub const NEAR_CLIP: f32 = 10.0;
    pub const FAR_CLIP: f32 = 100_000.0;

    /// Character for `pawn`, possessed, facing +X
    pub fn new(pawn: ActorKey) -> Self {
        Self {
            pawn,
            possessed: true,
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            pending_movement: Vec3::ZERO,
            horizontal_fov_degrees: Self::DEFAULT_FOV_DEGREES,
        }
    }

    pub fn pawn(&self) -> ActorKey {
        self.pawn
    }

    pub fn is_possessed(&self) -> bool {
        self.possessed
    }

    pub fn possess(&mut self) {
        self.possessed = true;
    }

    /// Release control; pending movement is dropped
    pub fn unpossess(&mut self) {
        self.possessed = false;
        self.pending_movement = Vec3::ZERO;
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.pitch_degrees
    }

    /// Set the control rotation directly (pitch is clamped)
    pub fn set_rotation(&mut self, yaw_degrees: f32, pitch_degrees: f32) {
        self.yaw_degrees = yaw_degrees.rem_euclid(360.0);
        self.pitch_degrees = pitch_degrees.clamp(-Self::MAX_PITCH_DEGREES, Self::MAX_PITCH_DEGREES);
    }

    pub fn horizontal_fov_degrees(&self) -> f32 {
        self.horizontal_fov_degrees
    }

    pub fn set_horizontal_fov_degrees(&mut self, fov: f32) {
        self.horizontal_fov_degrees = fov.clamp(5.0, 170.0);
    }

    /// Apply one input action
    pub fn handle_input(&mut self, action: InputAction) -> InputOutcome {
        if !self.possessed {
            return InputOutcome::Ignored;
        }

        match action {
            InputAction::Move(value) => {
                self.pending_movement += self.forward() * value.y + self.right() * value.x;
                InputOutcome::Applied
            }
            InputAction::Look(value) => {
                self.set_rotation(self.yaw_degrees - value.x, self.pitch_degrees + value.y);
                qulock_trace!("qulock::PlayerCharacter", "yaw {:.1} pitch {:.1}", self.yaw_degrees, self.pitch_degrees);
                InputOutcome::Applied
            }
            InputAction::Pause => InputOutcome::PauseRequested,
        }
    }

    /// Accumulated movement input since the last call, then cleared
    pub fn consume_movement_input(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending_movement)
    }

    fn yaw_rotation(&self) -> Quat {
        Quat::from_rotation_z(self.yaw_degrees.to_radians())
    }

    /// Horizontal facing direction
    pub fn forward(&self) -> Vec3 {
        self.yaw_rotation() * Vec3::X
    }

    /// Horizontal right direction
    pub fn right(&self) -> Vec3 {
        self.yaw_rotation() * Vec3::NEG_Y
    }

    /// Direction the camera looks at, pitch included
    pub fn view_direction(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw_degrees.to_radians(), self.pitch_degrees.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), yaw.sin() * pitch.cos(), pitch.sin())
    }

    /// World position of the first-person camera
    pub fn camera_location(&self, pawn_location: Vec3) -> Vec3 {
        pawn_location + self.yaw_rotation() * Self::CAMERA_OFFSET
    }

    /// View options for a pawn at `pawn_location` rendering into `viewport`
    pub fn view_init_options(&self, pawn_location: Vec3, viewport: ViewRect) -> ViewInitOptions {
        let aspect = if viewport.height() > 0 {
            viewport.width() as f32 / viewport.height() as f32
        } else {
            1.0
        };
        let half_fov_x = (self.horizontal_fov_degrees * 0.5).to_radians();
        let fov_y = 2.0 * (half_fov_x.tan() / aspect).atan();

        ViewInitOptions {
            view_origin: self.camera_location(pawn_location),
            view_rotation_matrix: Mat4::look_at_rh(Vec3::ZERO, self.view_direction(), Vec3::Z),
            projection_matrix: Mat4::perspective_rh(fov_y, aspect, Self::NEAR_CLIP, Self::FAR_CLIP),
            constrained_view_rect: viewport,
        }
    }
}

#[cfg(test)]
#[path = "player_character_tests.rs"]
mod tests;
