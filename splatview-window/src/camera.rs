use glam::{Mat4, Vec3};
use splatview_scene::CameraConfig;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Projection {
    /// Create a new projection. `fov_y` is in radians.
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y,
            aspect,
            near,
            far,
        }
    }

    /// Get the projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Recompute the aspect ratio from viewport dimensions.
    pub fn update_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }
}

/// Camera with a world position and a viewing direction.
///
/// Orientation only changes through [`PerspectiveCamera::look_at`], so
/// translating the camera keeps the direction it faces.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    position: Vec3,
    forward: Vec3,
    projection: Projection,
}

impl PerspectiveCamera {
    /// Creates a camera at `position` looking at `target`.
    pub fn new(position: Vec3, target: Vec3, projection: Projection) -> Self {
        let mut camera = Self {
            position,
            forward: Vec3::NEG_Z,
            projection,
        };
        camera.look_at(target);
        camera
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::new(
            Vec3::from_array(config.position),
            Vec3::from_array(config.target),
            Projection::new(
                config.fov_degrees.to_radians(),
                aspect,
                config.near,
                config.far,
            ),
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Turn towards `target`. A target at the camera position keeps the old direction.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = (target - self.position).normalize_or_zero();
        if direction != Vec3::ZERO {
            self.forward = direction;
        }
    }

    /// Unit viewing direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit vector pointing to the right of the view, perpendicular to world up.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(Vec3::Y).normalize_or_zero()
    }

    /// Unit vector pointing up in screen space.
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward).normalize_or_zero()
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up())
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }
}
