//! Damped orbit controls driven by the pointer.
//!
//! Pointer input only accumulates pending motion; [`OrbitControls::update`]
//! applies a `damping_factor` share of it each frame and decays the rest, so
//! the camera eases to a stop after the pointer is released.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use splatview_scene::ControlsConfig;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::camera::PerspectiveCamera;

const PHI_EPSILON: f32 = 1e-6;
const ZOOM_PER_NOTCH: f32 = 0.05;
const PIXELS_PER_NOTCH: f32 = 100.0;
/// Pending motion below this is dropped so the controls settle.
const SETTLE_EPSILON: f32 = 1e-6;

/// Offset from the orbit target in spherical coordinates.
///
/// `phi` is measured from +Y, `theta` around +Y starting at +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: PI * 0.5,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Pan,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    mode: DragMode,
    last: Option<Vec2>,
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    damping_factor: f32,
    min_distance: f32,
    max_distance: f32,
    enable_pan: bool,
    rotate_speed: f32,
    zoom_speed: f32,
    pan_speed: f32,
    viewport_height: f32,
    /// Pending (theta, phi) change in radians.
    pending_rotation: Vec2,
    /// Pending log-scale change of the orbit radius.
    pending_zoom: f32,
    /// Pending screen-space pan in pixels.
    pending_pan: Vec2,
    cursor: Option<Vec2>,
    drag: Option<DragState>,
}

impl OrbitControls {
    pub fn new(target: Vec3, config: &ControlsConfig) -> Self {
        Self {
            target,
            damping_factor: config.damping_factor,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            enable_pan: config.enable_pan,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
            viewport_height: 720.0,
            pending_rotation: Vec2::ZERO,
            pending_zoom: 0.0,
            pending_pan: Vec2::ZERO,
            cursor: None,
            drag: None,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the orbit target without touching pending motion.
    pub fn translate_target(&mut self, delta: Vec3) {
        self.target += delta;
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        if height > 0 {
            self.viewport_height = height as f32;
        }
    }

    /// True while there is pending motion or a drag in progress.
    pub fn is_active(&self) -> bool {
        self.drag.is_some()
            || self.pending_rotation != Vec2::ZERO
            || self.pending_zoom != 0.0
            || self.pending_pan != Vec2::ZERO
    }

    /// Queue a rotation from a pointer drag of `delta` pixels.
    pub fn rotate_by_pixels(&mut self, delta: Vec2) {
        let scale = TAU * self.rotate_speed / self.viewport_height;
        self.pending_rotation -= delta * scale;
    }

    /// Queue a zoom; positive `notches` move the camera towards the target.
    pub fn zoom_by(&mut self, notches: f32) {
        self.pending_zoom -= notches * ZOOM_PER_NOTCH * self.zoom_speed;
    }

    /// Queue a pan from a pointer drag of `delta` pixels. Ignored when panning is disabled.
    pub fn pan_by_pixels(&mut self, delta: Vec2) {
        if self.enable_pan {
            self.pending_pan += delta;
        }
    }

    /// Feed a window event. Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let current = Vec2::new(position.x as f32, position.y as f32);
                self.cursor = Some(current);
                let Some(drag) = self.drag.as_mut() else {
                    return false;
                };
                let delta = drag.last.map(|last| current - last);
                drag.last = Some(current);
                let mode = drag.mode;
                if let Some(delta) = delta {
                    match mode {
                        DragMode::Rotate => self.rotate_by_pixels(delta),
                        DragMode::Pan => self.pan_by_pixels(delta),
                    }
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let mode = match button {
                    MouseButton::Left => Some(DragMode::Rotate),
                    MouseButton::Right | MouseButton::Middle if self.enable_pan => {
                        Some(DragMode::Pan)
                    }
                    _ => None,
                };
                let Some(mode) = mode else {
                    return false;
                };
                match state {
                    ElementState::Pressed => {
                        self.drag = Some(DragState {
                            mode,
                            last: self.cursor,
                        });
                        true
                    }
                    ElementState::Released => {
                        if self.drag.is_some_and(|drag| drag.mode == mode) {
                            self.drag = None;
                            true
                        } else {
                            false
                        }
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_NOTCH,
                };
                self.zoom_by(notches);
                true
            }
            WindowEvent::Focused(false) => {
                self.drag = None;
                false
            }
            _ => false,
        }
    }

    /// Advance the damped orbit by one frame and write the result to `camera`.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let damping = self.damping_factor;
        let offset = camera.position() - self.target;
        let mut spherical = Spherical::from_offset(offset);

        let rotation = self.pending_rotation * damping;
        spherical.theta += rotation.x;
        spherical.phi = (spherical.phi + rotation.y).clamp(PHI_EPSILON, PI - PHI_EPSILON);
        spherical.radius = (spherical.radius * (self.pending_zoom * damping).exp())
            .clamp(self.min_distance, self.max_distance);

        let pan = self.pending_pan * damping;
        if pan != Vec2::ZERO {
            let fov_scale = 2.0 * (camera.projection().fov_y() * 0.5).tan();
            let world_per_pixel = spherical.radius * fov_scale / self.viewport_height;
            let shift = (camera.right() * -pan.x + camera.up() * pan.y)
                * world_per_pixel
                * self.pan_speed;
            self.target += shift;
        }

        camera.set_position(self.target + spherical.to_offset());
        camera.look_at(self.target);

        let decay = 1.0 - damping;
        self.pending_rotation = settle_vec(self.pending_rotation * decay);
        self.pending_zoom = settle(self.pending_zoom * decay);
        self.pending_pan = settle_vec(self.pending_pan * decay);
    }
}

fn settle(value: f32) -> f32 {
    if value.abs() < SETTLE_EPSILON { 0.0 } else { value }
}

fn settle_vec(value: Vec2) -> Vec2 {
    Vec2::new(settle(value.x), settle(value.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Projection;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Projection::new(75f32.to_radians(), 1.0, 0.1, 1000.0),
        )
    }

    fn controls() -> OrbitControls {
        OrbitControls::new(Vec3::ZERO, &ControlsConfig::default())
    }

    #[test]
    fn test_spherical_roundtrip() {
        let offset = Vec3::new(1.0, 2.0, -3.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).length() < 1e-5);
    }

    #[test]
    fn test_idle_update_keeps_camera_still() {
        let mut camera = camera();
        let mut controls = controls();
        controls.update(&mut camera);
        assert!((camera.position() - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert!(!controls.is_active());
    }

    #[test]
    fn test_rotation_is_damped() {
        let mut camera = camera();
        let mut controls = controls();
        controls.rotate_by_pixels(Vec2::new(100.0, 0.0));
        let pending = controls.pending_rotation.x;

        controls.update(&mut camera);
        let theta = Spherical::from_offset(camera.position()).theta;
        assert!((theta - pending * 0.05).abs() < 1e-5);
        assert!((controls.pending_rotation.x - pending * 0.95).abs() < 1e-6);
        assert!((camera.position().length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_settles() {
        let mut camera = camera();
        let mut controls = controls();
        controls.rotate_by_pixels(Vec2::new(50.0, 20.0));
        for _ in 0..2000 {
            controls.update(&mut camera);
        }
        assert!(!controls.is_active());
    }

    #[test]
    fn test_zoom_respects_distance_bounds() {
        let mut camera = camera();
        let mut controls = controls();
        controls.zoom_by(10_000.0);
        for _ in 0..200 {
            controls.update(&mut camera);
        }
        assert!((camera.position().length() - 1.0).abs() < 1e-4);

        controls.zoom_by(-100_000.0);
        for _ in 0..200 {
            controls.update(&mut camera);
        }
        assert!((camera.position().length() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_never_flips_over_pole() {
        let mut camera = camera();
        let mut controls = controls();
        controls.rotate_by_pixels(Vec2::new(0.0, 100_000.0));
        for _ in 0..50 {
            controls.update(&mut camera);
            assert!(camera.position().is_finite());
            assert!(camera.position().y <= 5.0 + 1e-3);
            assert!(camera.right().length() > 0.0);
        }
    }

    #[test]
    fn test_pan_moves_target_and_camera_together() {
        let mut camera = camera();
        let mut controls = controls();
        controls.pan_by_pixels(Vec2::new(-100.0, 0.0));
        controls.update(&mut camera);
        assert!(controls.target().x > 0.0);
        let offset = camera.position() - controls.target();
        assert!((offset - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_pan_disabled() {
        let config = ControlsConfig {
            enable_pan: false,
            ..ControlsConfig::default()
        };
        let mut controls = OrbitControls::new(Vec3::ZERO, &config);
        controls.pan_by_pixels(Vec2::new(10.0, 10.0));
        assert!(!controls.is_active());
    }
}
