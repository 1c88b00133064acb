//! Splatview GPU Crate
//!
//! wgpu device setup, surface management and the two passes the viewer
//! draws each frame: scene wireframes and the loading overlay.

mod overlay;
mod pipeline;
mod renderer;
pub mod shaders;
mod surface;
mod types;
mod wireframe;

pub use overlay::OverlayPass;
pub use pipeline::{PipelineBuildError, RenderPipelineBuilder};
pub use renderer::{Renderer, RendererError};
pub use surface::SurfaceWrapper;
pub use types::{CameraUniforms, LineVertex, OverlayUniforms};
pub use wireframe::{WireframePass, line_vertices};

// Re-export wgpu so downstream crates use the same version.
pub use wgpu;

/// Targets a pass records into for one frame.
pub struct RenderContext<'a> {
    pub color_view: &'a wgpu::TextureView,
}

/// Device for GPU-backed tests, or `None` on machines without an adapter.
#[cfg(test)]
pub(crate) fn test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    use pollster::FutureExt;

    async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::from_env_or_default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await
            .ok()?;
        adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .ok()
    }
    .block_on()
}
