//! Axis-aligned region the camera is allowed to occupy.

use glam::Vec3;

/// Axis-aligned box given by its min and max corners.
///
/// The corners are not validated here; callers building a volume from user
/// input go through [`crate::ViewerConfig::validate`] first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    min: Vec3,
    max: Vec3,
}

impl BoundingVolume {
    /// Create a volume from two corners. Expects `min <= max` on every axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(
            min.cmple(max).all(),
            "bounding volume corners are inverted: min={min:?} max={max:?}"
        );
        Self { min, max }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Clamp a point into the volume, independently per axis.
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        point.max(self.min).min(self.max)
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
