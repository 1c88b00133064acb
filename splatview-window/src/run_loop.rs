//! Per-frame update sequence with explicit start/stop.

use splatview_scene::SceneGraph;

use crate::camera::PerspectiveCamera;
use crate::input::InputTracker;
use crate::overlay::ProgressOverlay;
use crate::rig::CameraRig;

/// Everything a sink needs to draw one frame.
pub struct FrameView<'a> {
    pub scene: &'a SceneGraph,
    pub camera: &'a PerspectiveCamera,
    pub overlay: &'a ProgressOverlay,
}

/// Destination for rendered frames.
pub trait FrameSink {
    type Error;

    fn draw(&mut self, frame: FrameView<'_>) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// The loop is stopped; nothing was updated or drawn.
    Skipped,
}

/// Drives camera updates and drawing once per display refresh while running.
#[derive(Debug, Default)]
pub struct RunLoop {
    running: bool,
    frames: u64,
}

impl RunLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames drawn since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame: orbit damping, keyboard move + clamp, reclamp, draw.
    pub fn frame<S: FrameSink>(
        &mut self,
        rig: &mut CameraRig,
        input: &InputTracker,
        scene: &SceneGraph,
        overlay: &ProgressOverlay,
        sink: &mut S,
    ) -> Result<FrameOutcome, S::Error> {
        if !self.running {
            return Ok(FrameOutcome::Skipped);
        }

        rig.apply_pointer_orbit();
        rig.apply_keyboard_translation(input);
        rig.reclamp();

        sink.draw(FrameView {
            scene,
            camera: rig.camera(),
            overlay,
        })?;
        self.frames += 1;
        Ok(FrameOutcome::Drawn)
    }
}
