//! Headless walkthrough: loads the placeholder asset, then holds the
//! forward and right keys until the camera presses into the bounding volume.
//!
//! Run with `cargo run -p splatview-window --example headless_session [ASSET]`.

use std::convert::Infallible;
use std::path::PathBuf;

use splatview_scene::{AssetLoader, StubLoader, ViewerConfig};
use splatview_window::{FrameSink, FrameView, KeyCode, ViewerSession, init_tracing};
use tracing::info;

struct LogSink;

impl FrameSink for LogSink {
    type Error = Infallible;

    fn draw(&mut self, frame: FrameView<'_>) -> Result<(), Infallible> {
        tracing::debug!(
            position = ?frame.camera.position(),
            meshes = frame.scene.meshes().count(),
            "frame"
        );
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing("info");

    let config = ViewerConfig {
        asset_path: std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")),
        ..ViewerConfig::default()
    };
    let mut session = ViewerSession::new(&config);

    let mut reports = Vec::new();
    let result = StubLoader::from_config(&config.loader)
        .load(&config.asset_path, |p| reports.push(p))
        .await;
    for progress in reports {
        session.handle_progress(progress);
    }
    session.handle_loaded(result);
    if let Some(message) = session.overlay().message() {
        info!("{message}");
    }

    session.input_mut().on_key_down(KeyCode::ArrowUp);
    session.input_mut().on_key_down(KeyCode::ArrowRight);
    session.run_loop_mut().start();
    let mut sink = LogSink;
    for _ in 0..240 {
        let _ = session.frame(&mut sink);
    }

    let rig = session.rig();
    info!(
        frames = session.run_loop().frames(),
        position = ?rig.camera().position(),
        target = ?rig.controls().target(),
        inside = rig.bounds().contains(rig.camera().position()),
        "walkthrough finished"
    );
}
