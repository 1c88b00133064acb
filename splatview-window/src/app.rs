use std::sync::Arc;

use splatview_gpu::wgpu::SurfaceError;
use splatview_scene::{AssetLoader, LoadError, LoadProgress, SceneNode, StubLoader, ViewerConfig};
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::ViewerError;
use crate::gpu::GpuTarget;
use crate::session::ViewerSession;

/// Messages from the loader thread to the event loop.
#[derive(Debug)]
pub enum ViewerEvent {
    Progress(LoadProgress),
    Loaded(Result<SceneNode, LoadError>),
}

/// Open the viewer window and block until it is closed.
///
/// The asset loads on a background thread while the scene renders; its
/// progress and result are delivered to the event loop as [`ViewerEvent`]s.
pub fn run(config: ViewerConfig) -> Result<(), ViewerError> {
    config.validate()?;
    info!(asset = %config.asset_path.display(), "starting viewer");

    let event_loop = EventLoop::<ViewerEvent>::with_user_event().build()?;
    spawn_loader(&config, event_loop.create_proxy())?;

    let mut app = App::new(config);
    let run_result = event_loop.run_app(&mut app);
    let app_result = app.finish();
    run_result?;
    app_result
}

fn spawn_loader(
    config: &ViewerConfig,
    proxy: EventLoopProxy<ViewerEvent>,
) -> Result<(), ViewerError> {
    let path = config.asset_path.clone();
    let loader = StubLoader::from_config(&config.loader);

    std::thread::Builder::new()
        .name("asset-loader".to_string())
        .spawn(move || {
            let progress_proxy = proxy.clone();
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(loader.load(&path, move |progress| {
                    send(&progress_proxy, ViewerEvent::Progress(progress));
                })),
                Err(err) => Err(LoadError::Runtime(err)),
            };
            send(&proxy, ViewerEvent::Loaded(result));
        })?;
    Ok(())
}

fn send(proxy: &EventLoopProxy<ViewerEvent>, event: ViewerEvent) {
    if let Err(err) = proxy.send_event(event) {
        debug!("event loop closed before loader event was delivered: {err}");
    }
}

struct App {
    config: ViewerConfig,
    session: ViewerSession,
    window: Option<Arc<Window>>,
    gpu: Option<GpuTarget>,
    error: Option<ViewerError>,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        let session = ViewerSession::new(&config);
        Self {
            config,
            session,
            window: None,
            gpu: None,
            error: None,
        }
    }

    fn finish(self) -> Result<(), ViewerError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window.title.as_str())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let mut gpu = GpuTarget::new(window.clone())?;

        let size = window.inner_size();
        self.session.resize(&mut gpu, size.width, size.height);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.refresh_title();
        Ok(())
    }

    fn refresh_title(&self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let title = match self.session.overlay().status_text() {
            Some(status) => format!("{} - {}", self.config.window.title, status),
            None => self.config.window.title.clone(),
        };
        window.set_title(&title);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let _frame_span = tracing::info_span!("frame").entered();
        match self.session.frame(gpu) {
            Ok(_) => {}
            Err(SurfaceError::Lost | SurfaceError::Outdated) => gpu.recover_surface(),
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU Out of Memory - exiting");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler<ViewerEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.error.is_some() {
            return;
        }
        if self.window.is_none() {
            if let Err(err) = self.create_window(event_loop) {
                error!("Failed to initialize viewer: {err}");
                self.error = Some(err);
                event_loop.exit();
                return;
            }
        }
        self.session.run_loop_mut().start();
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.session.run_loop_mut().stop();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: ViewerEvent) {
        match event {
            ViewerEvent::Progress(progress) => self.session.handle_progress(progress),
            ViewerEvent::Loaded(result) => {
                self.session.handle_loaded(result);
            }
        }
        self.refresh_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().is_none_or(|window| window.id() != window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    self.session.resize(gpu, size.width, size.height);
                }
            }
            WindowEvent::Occluded(occluded) => {
                debug!(occluded, "window occlusion changed");
                if occluded {
                    self.session.run_loop_mut().stop();
                } else {
                    self.session.run_loop_mut().start();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                self.session.input_mut().record_event(&other);
                self.session.rig_mut().controls_mut().handle_event(&other);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.session.run_loop().is_running() {
            return;
        }
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
