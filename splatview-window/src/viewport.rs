use tracing::debug;

use crate::rig::CameraRig;

/// Something whose pixel size follows the window, e.g. a swapchain.
pub trait OutputSurface {
    fn resize_output(&mut self, width: u32, height: u32);
}

/// Keeps camera projection and output surface in step with the window size.
#[derive(Debug, Default)]
pub struct ViewportAdapter {
    size: Option<(u32, u32)>,
}

impl ViewportAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Apply a new viewport size. Zero-sized (minimised) windows are ignored.
    pub fn resize<O: OutputSurface>(
        &mut self,
        rig: &mut CameraRig,
        surface: &mut O,
        width: u32,
        height: u32,
    ) {
        if width == 0 || height == 0 {
            debug!(width, height, "ignoring zero-sized viewport");
            return;
        }
        rig.camera_mut().projection_mut().update_size(width, height);
        rig.controls_mut().set_viewport_height(height);
        surface.resize_output(width, height);
        self.size = Some((width, height));
        debug!(width, height, "viewport resized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splatview_scene::ViewerConfig;

    #[derive(Default)]
    struct FakeSurface {
        size: Option<(u32, u32)>,
        resizes: u32,
    }

    impl OutputSurface for FakeSurface {
        fn resize_output(&mut self, width: u32, height: u32) {
            self.size = Some((width, height));
            self.resizes += 1;
        }
    }

    #[test]
    fn test_resize_updates_aspect_and_surface() {
        let mut rig = CameraRig::from_config(&ViewerConfig::default());
        let mut surface = FakeSurface::default();
        let mut viewport = ViewportAdapter::new();
        viewport.resize(&mut rig, &mut surface, 1000, 500);
        assert_eq!(rig.camera().projection().aspect(), 2.0);
        assert_eq!(surface.size, Some((1000, 500)));
        assert_eq!(viewport.size(), Some((1000, 500)));
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut once_rig = CameraRig::from_config(&ViewerConfig::default());
        let mut once_surface = FakeSurface::default();
        ViewportAdapter::new().resize(&mut once_rig, &mut once_surface, 640, 480);

        let mut twice_rig = CameraRig::from_config(&ViewerConfig::default());
        let mut twice_surface = FakeSurface::default();
        let mut viewport = ViewportAdapter::new();
        viewport.resize(&mut twice_rig, &mut twice_surface, 640, 480);
        viewport.resize(&mut twice_rig, &mut twice_surface, 640, 480);

        assert_eq!(
            once_rig.camera().projection(),
            twice_rig.camera().projection()
        );
        assert_eq!(once_surface.size, twice_surface.size);
    }

    #[test]
    fn test_zero_size_is_ignored() {
        let mut rig = CameraRig::from_config(&ViewerConfig::default());
        let aspect = rig.camera().projection().aspect();
        let mut surface = FakeSurface::default();
        ViewportAdapter::new().resize(&mut rig, &mut surface, 0, 300);
        assert_eq!(rig.camera().projection().aspect(), aspect);
        assert_eq!(surface.resizes, 0);
    }
}
