/// Frustum side planes used by the visibility test.
///
/// Each plane is stored as a unit `normal` and a distance `d`, with the
/// normal pointing OUT of the visible volume:
/// - `signed_distance(p) = normal · p + d`
/// - `signed_distance(p) > 0` means `p` is outside on that side
///
/// Only the four side planes are kept; near and far play no part in
/// deciding whether an actor is on screen.

use glam::{Mat4, Vec3, Vec4};

/// Side of the view frustum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl FrustumSide {
    /// All sides, in the order the visibility resolver walks them
    pub const ALL: [FrustumSide; 4] = [
        FrustumSide::Left,
        FrustumSide::Right,
        FrustumSide::Top,
        FrustumSide::Bottom,
    ];

    /// The side across the frustum
    pub fn opposite(self) -> Self {
        match self {
            FrustumSide::Left => FrustumSide::Right,
            FrustumSide::Right => FrustumSide::Left,
            FrustumSide::Top => FrustumSide::Bottom,
            FrustumSide::Bottom => FrustumSide::Top,
        }
    }

    fn index(self) -> usize {
        match self {
            FrustumSide::Left => 0,
            FrustumSide::Right => 1,
            FrustumSide::Top => 2,
            FrustumSide::Bottom => 3,
        }
    }
}

/// World-space plane with an outward unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumPlane {
    pub normal: Vec3,
    pub d: f32,
}

impl FrustumPlane {
    /// Build from an inward (A, B, C, D) plane as produced by row extraction
    fn from_inward(plane: Vec4) -> Self {
        let mut normal = -plane.truncate();
        let mut d = -plane.w;
        let normal_len = normal.length();
        if normal_len > 0.0 {
            normal /= normal_len;
            d /= normal_len;
        }
        Self { normal, d }
    }

    /// Positive outside the frustum, negative inside
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// Whether `point` lies strictly outside this plane
    pub fn is_violated_by(&self, point: Vec3) -> bool {
        self.signed_distance(point) > 0.0
    }

    /// Orthogonal projection of `point` onto the plane
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.signed_distance(point)
    }
}

/// The four side planes of a view frustum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideFrustum {
    planes: [FrustumPlane; 4],
}

impl SideFrustum {
    /// Extract the side planes from a view-projection matrix
    ///
    /// Gribb & Hartmann row method, normalized, flipped to face outward.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();

        let row = |i: usize| Vec4::new(m[0][i], m[1][i], m[2][i], m[3][i]);
        let (row0, row1, row3) = (row(0), row(1), row(3));

        Self {
            planes: [
                FrustumPlane::from_inward(row3 + row0), // Left
                FrustumPlane::from_inward(row3 - row0), // Right
                FrustumPlane::from_inward(row3 - row1), // Top
                FrustumPlane::from_inward(row3 + row1), // Bottom
            ],
        }
    }

    pub fn plane(&self, side: FrustumSide) -> &FrustumPlane {
        &self.planes[side.index()]
    }

    /// Planes paired with their side, in `FrustumSide::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (FrustumSide, &FrustumPlane)> + '_ {
        FrustumSide::ALL.iter().map(move |side| (*side, self.plane(*side)))
    }

    /// Whether `point` is on the inner side of all four planes
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| !plane.is_violated_by(point))
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
