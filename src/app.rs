use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::ViewerConfig,
    error::AppError,
    gfx::{
        geometry::{generate_torus, GeometryData},
        rendering::RenderEngine,
    },
};

pub struct TorusApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    // Moved into the GPU on first resume.
    geometry: Option<GeometryData>,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    error: Option<AppError>,
}

impl TorusApp {
    /// Validates the configuration, builds the torus mesh and creates the
    /// event loop. No window or GPU work happens until [`TorusApp::run`].
    pub fn new(config: ViewerConfig) -> Result<Self, AppError> {
        config.validate()?;

        let geometry = generate_torus(&config.torus)?;
        log::info!(
            "generated torus mesh: {} vertices, {} triangles",
            geometry.vertex_count(),
            geometry.triangle_count()
        );

        let event_loop = EventLoop::new()?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                geometry: Some(geometry),
                window: None,
                render_engine: None,
                error: None,
            },
        })
    }

    /// Runs until the window is closed or a fatal error occurs.
    pub fn run(mut self) -> Result<(), AppError> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_config = &self.config.window;
        let window = Arc::new(
            event_loop.create_window(
                WindowAttributes::default()
                    .with_title(window_config.title.clone())
                    .with_inner_size(LogicalSize::new(window_config.width, window_config.height)),
            )?,
        );
        self.window = Some(window.clone());

        let Some(geometry) = self.geometry.take() else {
            return Ok(());
        };

        let (width, height) = window.inner_size().into();
        let settings = &self.config.render;
        let renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            &geometry,
            settings,
        ))?;

        log::info!("render engine ready at {}x{}", width, height);
        self.render_engine = Some(renderer);
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(error) = self.init_graphics(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                render_engine.resize(width, height);
            }
            WindowEvent::RedrawRequested => {
                if let Err(error) = render_engine.render_frame() {
                    self.fail(event_loop, error.into());
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
