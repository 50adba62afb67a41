/// Axis-aligned bounding boxes.
///
/// Stored as center + half-extents, the form the visibility code consumes.
/// Recomputed from the host every query; never cached, since actors move.

use glam::Vec3;

/// Axis-aligned bounding box (center + half-extents)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Box center in world space
    pub center: Vec3,
    /// Half-size along each axis (non-negative)
    pub extents: Vec3,
}

impl AABB {
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self {
            center,
            extents: extents.abs(),
        }
    }

    /// Box spanning two opposite corners (in any order)
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            center: (min + max) * 0.5,
            extents: (max - min) * 0.5,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// The 8 corners, X sign varying slowest and Z fastest:
    /// `+++, ++-, +-+, +--, -++, -+-, --+, ---`.
    ///
    /// A zero-extent box yields the center 8 times.
    pub fn corners(&self) -> [Vec3; 8] {
        let c = self.center;
        let e = self.extents;
        [
            c + Vec3::new( e.x,  e.y,  e.z),
            c + Vec3::new( e.x,  e.y, -e.z),
            c + Vec3::new( e.x, -e.y,  e.z),
            c + Vec3::new( e.x, -e.y, -e.z),
            c + Vec3::new(-e.x,  e.y,  e.z),
            c + Vec3::new(-e.x,  e.y, -e.z),
            c + Vec3::new(-e.x, -e.y,  e.z),
            c + Vec3::new(-e.x, -e.y, -e.z),
        ]
    }

    /// Whether the box has no volume along every axis
    pub fn is_degenerate(&self) -> bool {
        self.extents == Vec3::ZERO
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.extents.x && d.y <= self.extents.y && d.z <= self.extents.z
    }

    /// Copy grown by `amount` on every side
    pub fn expanded(&self, amount: f32) -> Self {
        Self::new(self.center, self.extents + Vec3::splat(amount))
    }

    /// Copy moved to a new center
    pub fn with_center(&self, center: Vec3) -> Self {
        Self { center, extents: self.extents }
    }

    /// Entry distance along a segment, as a fraction of its length
    ///
    /// Slab test between `start` and `end`. Returns the smallest `t` in
    /// `[0, 1]` where the segment is inside the box, or `None`.
    pub fn segment_intersection(&self, start: Vec3, end: Vec3) -> Option<f32> {
        let min = self.min();
        let max = self.max();
        let delta = end - start;

        let mut t_enter = 0.0_f32;
        let mut t_exit = 1.0_f32;

        for axis in 0..3 {
            let origin = start[axis];
            let dir = delta[axis];
            if dir.abs() < f32::EPSILON {
                if origin < min[axis] || origin > max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (min[axis] - origin) * inv;
            let mut t1 = (max[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(t_enter)
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
