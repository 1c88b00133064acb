//! Camera rig: pointer orbit plus keyboard translation, confined to a bounding volume.
//!
//! Clamping runs after both input sources since either can push the camera
//! out of bounds. Whenever a clamp or translation moves the camera, the orbit
//! target moves by the same amount so the next orbit update keeps the view
//! direction instead of swinging towards the wall.

use glam::Vec3;
use splatview_scene::{BoundingVolume, ViewerConfig};
use tracing::trace;

use crate::camera::PerspectiveCamera;
use crate::controls::OrbitControls;
use crate::input::{InputTracker, MoveDirection};

#[derive(Debug, Clone)]
pub struct CameraRig {
    camera: PerspectiveCamera,
    controls: OrbitControls,
    bounds: BoundingVolume,
    move_step: f32,
}

impl CameraRig {
    pub fn new(
        camera: PerspectiveCamera,
        controls: OrbitControls,
        bounds: BoundingVolume,
        move_step: f32,
    ) -> Self {
        Self {
            camera,
            controls,
            bounds,
            move_step,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        let aspect = config.window.width.max(1) as f32 / config.window.height.max(1) as f32;
        let camera = PerspectiveCamera::from_config(&config.camera, aspect);
        let controls =
            OrbitControls::new(Vec3::from_array(config.camera.target), &config.controls);
        Self::new(
            camera,
            controls,
            config.bounds.volume(),
            config.controls.move_step,
        )
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn bounds(&self) -> &BoundingVolume {
        &self.bounds
    }

    /// Advance damped pointer rotation and zoom by one frame.
    pub fn apply_pointer_orbit(&mut self) {
        self.controls.update(&mut self.camera);
    }

    /// Move along the view's forward/right axes for every held direction key.
    ///
    /// Returns true if any direction was held, in which case the position was
    /// clamped and the orbit target shifted by the displacement actually applied.
    pub fn apply_keyboard_translation(&mut self, input: &InputTracker) -> bool {
        let forward = self.camera.forward();
        let right = self.camera.right();

        let mut moved = false;
        let mut displacement = Vec3::ZERO;
        for direction in MoveDirection::ALL {
            if !input.is_direction_held(direction) {
                continue;
            }
            moved = true;
            displacement += match direction {
                MoveDirection::Forward => forward,
                MoveDirection::Back => -forward,
                MoveDirection::Left => -right,
                MoveDirection::Right => right,
            } * self.move_step;
        }
        if !moved {
            return false;
        }

        let before = self.camera.position();
        let after = self.bounds.clamp(before + displacement);
        self.camera.set_position(after);
        self.controls.translate_target(after - before);
        trace!(?before, ?after, "keyboard translation");
        true
    }

    /// Clamp the position again and shift the target by whatever the clamp removed.
    ///
    /// Returns true if the clamp changed the position.
    pub fn reclamp(&mut self) -> bool {
        let before = self.camera.position();
        let clamped = self.bounds.clamp(before);
        if clamped == before {
            return false;
        }
        self.camera.set_position(clamped);
        self.controls.translate_target(clamped - before);
        trace!(?before, ?clamped, "orbit pushed camera out of bounds");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Projection;
    use glam::Vec2;
    use splatview_scene::ControlsConfig;
    use winit::keyboard::KeyCode;

    fn room() -> BoundingVolume {
        BoundingVolume::new(Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 5.0, 5.0))
    }

    fn rig_at(position: Vec3, target: Vec3) -> CameraRig {
        let camera = PerspectiveCamera::new(
            position,
            target,
            Projection::new(75f32.to_radians(), 1.0, 0.1, 1000.0),
        );
        let config = ControlsConfig {
            max_distance: 100.0,
            ..ControlsConfig::default()
        };
        CameraRig::new(camera, OrbitControls::new(target, &config), room(), 0.05)
    }

    fn holding(keys: &[KeyCode]) -> InputTracker {
        let mut input = InputTracker::new();
        for key in keys {
            input.on_key_down(*key);
        }
        input
    }

    #[test]
    fn test_move_right_near_wall_is_axis_independent() {
        let mut rig = rig_at(Vec3::new(4.98, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0));
        assert!(rig.apply_keyboard_translation(&holding(&[KeyCode::ArrowRight])));
        let p = rig.camera().position();
        assert!((p - Vec3::new(4.98, 0.0, 0.05)).length() < 1e-6);
    }

    #[test]
    fn test_forward_into_wall_is_clamped_and_target_follows_applied_motion() {
        let mut rig = rig_at(Vec3::new(4.98, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0));
        rig.apply_keyboard_translation(&holding(&[KeyCode::ArrowUp]));
        assert_eq!(rig.camera().position().x, 5.0);
        assert!((rig.controls().target().x - 10.02).abs() < 1e-5);
    }

    #[test]
    fn test_no_keys_no_motion() {
        let mut rig = rig_at(Vec3::new(0.0, 2.0, 4.0), Vec3::ZERO);
        let before = rig.camera().position();
        assert!(!rig.apply_keyboard_translation(&InputTracker::new()));
        assert_eq!(rig.camera().position(), before);
        assert_eq!(rig.controls().target(), Vec3::ZERO);
    }

    #[test]
    fn test_translation_keeps_target_offset() {
        let mut rig = rig_at(Vec3::new(0.0, 2.0, 4.0), Vec3::ZERO);
        let offset = rig.camera().position() - rig.controls().target();
        rig.apply_keyboard_translation(&holding(&[KeyCode::ArrowUp, KeyCode::ArrowLeft]));
        let after = rig.camera().position() - rig.controls().target();
        assert!((after - offset).length() < 1e-5);
    }

    #[test]
    fn test_reclamp_is_noop_in_bounds() {
        let mut rig = rig_at(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        let position = rig.camera().position();
        let target = rig.controls().target();
        assert!(!rig.reclamp());
        assert!(!rig.reclamp());
        assert_eq!(rig.camera().position(), position);
        assert_eq!(rig.controls().target(), target);
    }

    #[test]
    fn test_reclamp_shifts_target_by_removed_delta() {
        let mut rig = rig_at(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO);
        rig.camera_mut().set_position(Vec3::new(0.0, 0.0, 7.0));
        assert!(rig.reclamp());
        assert_eq!(rig.camera().position(), Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(rig.controls().target(), Vec3::new(0.0, 0.0, -2.0));
        assert!(!rig.reclamp());
    }

    #[test]
    fn test_orbit_then_reclamp_stays_in_bounds() {
        let mut rig = rig_at(Vec3::new(0.0, 2.0, 4.5), Vec3::new(0.0, 2.0, 0.0));
        rig.controls_mut().zoom_by(-200.0);
        rig.controls_mut().rotate_by_pixels(Vec2::new(300.0, -150.0));
        let input = holding(&[KeyCode::ArrowDown, KeyCode::ArrowRight]);
        for _ in 0..300 {
            rig.apply_pointer_orbit();
            rig.apply_keyboard_translation(&input);
            rig.reclamp();
            assert!(rig.bounds().contains(rig.camera().position()));
        }
    }

    #[test]
    fn test_keyboard_clamp_keeps_every_axis_in_bounds() {
        let volume = room();
        let keys = [
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
        ];
        for start in [
            Vec3::new(4.99, 4.99, 4.99),
            Vec3::new(-4.99, -0.99, -4.99),
            Vec3::new(0.0, 5.0, -5.0),
        ] {
            for target in [Vec3::ZERO, Vec3::new(20.0, 20.0, 20.0), Vec3::new(-3.0, -9.0, 7.0)] {
                for key in keys {
                    let mut rig = rig_at(start, target);
                    let input = holding(&[key]);
                    for _ in 0..10 {
                        rig.apply_keyboard_translation(&input);
                        assert!(volume.contains(rig.camera().position()));
                    }
                }
            }
        }
    }
}
