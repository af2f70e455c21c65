use crate::app::{AppConfig, CursorAppState};
use crate::cursor::WinitCursorHost;
use crate::render::{DisplayState, QuadRenderable, QuadUniform};
use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CustomCursor, Window, WindowId};

pub struct CursorAppBuilder {
    event_loop: EventLoop<()>,
    config: AppConfig,
}

pub struct CursorApp {
    config: AppConfig,
    window: Option<Arc<Window>>,
    display_state: Option<DisplayState>,
    quad: Option<QuadRenderable>,
    state: CursorAppState<CustomCursor>,
    fatal: Option<anyhow::Error>,
}

impl CursorApp {
    /// Must be called from main thread
    pub fn build(config: AppConfig) -> Result<CursorAppBuilder> {
        let event_loop = EventLoop::new().context("unable to initialize windowing system")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        Ok(CursorAppBuilder { event_loop, config })
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let size = LogicalSize::new(self.config.view_size, self.config.view_size);
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(size)
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("unable to create window")?,
        );

        let display_state = pollster::block_on(DisplayState::new(Arc::clone(&window)))?;
        self.quad = Some(QuadRenderable::new(&display_state));
        self.display_state = Some(display_state);

        let mut host = WinitCursorHost::new(event_loop, &window);
        if let Err(e) = self.state.install_idle_cursor(&mut host) {
            error!("Unable to install cursor: {e}");
        }

        info!("Opened {:?} window", self.config.title);
        Ok(window)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(display), Some(quad)) = (self.display_state.as_mut(), self.quad.as_mut()) else {
            return;
        };

        let [r, g, b, a] = self.config.clear_color;
        let clear = wgpu::Color { r, g, b, a };
        let uniform = self.state.quad().map(|origin| {
            QuadUniform::square(origin, self.config.quad_extent_ndc(), self.config.quad_color)
        });

        match quad.render(display, clear, uniform) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                display.reconfigure_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fatal = Some(anyhow::anyhow!(wgpu::SurfaceError::OutOfMemory));
                event_loop.exit();
            }
            Err(e) => error!("{e}"),
        }
    }
}

impl CursorAppBuilder {
    pub fn launch(self, state: CursorAppState<CustomCursor>) -> Result<()> {
        let mut app = CursorApp {
            config: self.config,
            window: None,
            display_state: None,
            quad: None,
            state,
            fatal: None,
        };

        self.event_loop
            .run_app(&mut app)
            .context("event loop terminated abnormally")?;

        if let Some(e) = app.fatal.take() {
            return Err(e);
        }

        info!("Clean exit after event loop termination.");
        Ok(())
    }
}

impl ApplicationHandler for CursorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.open_window(event_loop) {
            Ok(window) => self.window = Some(window),
            Err(e) => {
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };
        assert_eq!(window.id(), window_id, "this app creates only 1 window");

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(window.scale_factor());
                self.state.pointer_moved(logical.x, logical.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let mut host = WinitCursorHost::new(event_loop, &window);
                if let Err(e) = self
                    .state
                    .mouse_input(&mut host, &self.config, button, state)
                {
                    error!("Unable to swap cursor: {e}");
                }
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(display) = self.display_state.as_mut() {
                    display.resize(physical_size);
                }
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // surface must go before the window it was created from
        self.quad = None;
        self.display_state = None;
    }
}
