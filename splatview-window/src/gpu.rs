//! GPU-backed frame sink and output surface for the windowed viewer.

use std::sync::Arc;

use splatview_gpu::{
    CameraUniforms, OverlayPass, RenderContext, Renderer, SurfaceWrapper, WireframePass,
};
use winit::window::Window;

use crate::ViewerError;
use crate::run_loop::{FrameSink, FrameView};
use crate::viewport::OutputSurface;

pub(crate) struct GpuTarget {
    renderer: Renderer,
    surface: SurfaceWrapper,
    wireframe: WireframePass,
    overlay: OverlayPass,
}

impl GpuTarget {
    pub(crate) fn new(window: Arc<Window>) -> Result<Self, ViewerError> {
        let size = window.inner_size();
        let (renderer, surface) =
            pollster::block_on(Renderer::with_surface(window, size.width, size.height))?;
        let wireframe = WireframePass::new(renderer.device(), surface.format())?;
        let overlay = OverlayPass::new(renderer.device(), surface.format())?;
        Ok(Self {
            renderer,
            surface,
            wireframe,
            overlay,
        })
    }

    /// Reconfigure after the surface reported Lost or Outdated.
    pub(crate) fn recover_surface(&mut self) {
        self.surface.reconfigure(self.renderer.device());
    }
}

impl OutputSurface for GpuTarget {
    fn resize_output(&mut self, width: u32, height: u32) {
        self.surface.resize(self.renderer.device(), width, height);
    }
}

impl FrameSink for GpuTarget {
    type Error = splatview_gpu::wgpu::SurfaceError;

    fn draw(&mut self, frame: FrameView<'_>) -> Result<(), Self::Error> {
        let device = self.renderer.device();
        let queue = self.renderer.queue();

        self.wireframe.sync_scene(device, frame.scene);
        let camera = frame.camera;
        let uniforms = CameraUniforms::from_matrices(
            camera.view_matrix(),
            camera.projection().matrix(),
            camera.position(),
        );
        self.wireframe.update_camera(queue, &uniforms);

        let show_bar = frame.overlay.shows_progress_bar();
        if show_bar {
            self.overlay.set_progress(queue, frame.overlay.bar_fraction());
        }

        let surface_texture = self.surface.get_current_texture()?;
        let surface_view = surface_texture
            .texture
            .create_view(&splatview_gpu::wgpu::TextureViewDescriptor::default());

        let mut encoder =
            device.create_command_encoder(&splatview_gpu::wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let ctx = RenderContext {
            color_view: &surface_view,
        };
        self.wireframe.render(&mut encoder, &ctx);
        if show_bar {
            self.overlay.render(&mut encoder, &ctx);
        }

        queue.submit(Some(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}
