mod app;
mod camera;
mod controls;
mod gpu;
mod input;
mod logging;
mod overlay;
mod rig;
mod run_loop;
mod session;
mod viewport;

pub use app::{ViewerEvent, run};
pub use camera::{PerspectiveCamera, Projection};
pub use controls::OrbitControls;
pub use input::{InputTracker, MoveDirection};
pub use logging::init_tracing;
pub use overlay::ProgressOverlay;
pub use rig::CameraRig;
pub use run_loop::{FrameOutcome, FrameSink, FrameView, RunLoop};
pub use session::ViewerSession;
pub use viewport::{OutputSurface, ViewportAdapter};

// Re-export winit key codes so callers can drive the input tracker.
pub use winit::keyboard::KeyCode;

use splatview_gpu::{PipelineBuildError, RendererError};
use splatview_scene::ConfigError;

/// Errors that stop the viewer from starting or keep running.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),

    #[error("Pipeline build error: {0}")]
    Pipeline(#[from] PipelineBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
