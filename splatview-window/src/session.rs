use splatview_scene::{LoadError, LoadProgress, NodeId, SceneGraph, SceneNode, ViewerConfig};
use tracing::{debug, error, info};

use crate::input::InputTracker;
use crate::overlay::ProgressOverlay;
use crate::rig::CameraRig;
use crate::run_loop::{FrameOutcome, FrameSink, RunLoop};
use crate::viewport::{OutputSurface, ViewportAdapter};

/// All state of one viewer: scene, camera rig, input and loading overlay.
///
/// Owned by the event-loop thread; loader results are handed in through
/// [`ViewerSession::handle_progress`] and [`ViewerSession::handle_loaded`].
#[derive(Debug)]
pub struct ViewerSession {
    scene: SceneGraph,
    rig: CameraRig,
    input: InputTracker,
    overlay: ProgressOverlay,
    run_loop: RunLoop,
    viewport: ViewportAdapter,
    asset: Option<NodeId>,
}

impl ViewerSession {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            scene: SceneGraph::with_default_lighting(),
            rig: CameraRig::from_config(config),
            input: InputTracker::new(),
            overlay: ProgressOverlay::new(),
            run_loop: RunLoop::new(),
            viewport: ViewportAdapter::new(),
            asset: None,
        }
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputTracker {
        &mut self.input
    }

    pub fn overlay(&self) -> &ProgressOverlay {
        &self.overlay
    }

    pub fn run_loop(&self) -> &RunLoop {
        &self.run_loop
    }

    pub fn run_loop_mut(&mut self) -> &mut RunLoop {
        &mut self.run_loop
    }

    /// Node inserted by a successful load, if any.
    pub fn asset(&self) -> Option<NodeId> {
        self.asset
    }

    pub fn handle_progress(&mut self, progress: LoadProgress) {
        debug!(percent = progress.percent(), "load progress");
        self.overlay.set_progress(progress);
    }

    /// Insert the loaded node and hide the overlay, or surface the error in it.
    pub fn handle_loaded(&mut self, result: Result<SceneNode, LoadError>) -> Option<NodeId> {
        match result {
            Ok(node) => {
                let id = self.scene.add(node);
                self.asset = Some(id);
                self.overlay.complete();
                info!(node = id.index(), "asset added to scene");
                Some(id)
            }
            Err(err) => {
                error!("Failed to load asset: {err}");
                self.overlay.fail(&err);
                None
            }
        }
    }

    pub fn resize<O: OutputSurface>(&mut self, surface: &mut O, width: u32, height: u32) {
        self.viewport
            .resize(&mut self.rig, surface, width, height);
    }

    pub fn frame<S: FrameSink>(&mut self, sink: &mut S) -> Result<FrameOutcome, S::Error> {
        self.run_loop.frame(
            &mut self.rig,
            &self.input,
            &self.scene,
            &self.overlay,
            sink,
        )
    }
}
