use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

mod app;
mod config;
mod input;

use app::App;
use config::Config;
use mandelbrot_core::RenderError;

// ---------------------------------------------------------------------------
// Handler: winit ApplicationHandler
// ---------------------------------------------------------------------------

struct Handler {
    config: Config,
    app: Option<App>,
    frame_interval: Option<Duration>,
    next_frame: Instant,
}

impl Handler {
    fn new(config: Config) -> Self {
        Self {
            frame_interval: config.frame_interval(),
            config,
            app: None,
            next_frame: Instant::now(),
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<App> {
        let side = self.config.texture_size;
        let window_attrs = Window::default_attributes()
            .with_title("Mandelbrot")
            .with_inner_size(winit::dpi::LogicalSize::new(side, side));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        log::info!("Window created ({side}×{side})");

        App::new(window, &self.config)
    }
}

impl ApplicationHandler for Handler {
    /// Called once on desktop when the event loop starts.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(app) => self.app = Some(app),
            Err(e) => {
                log::error!("startup failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(app) = &mut self.app else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested — exiting");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if input::is_quit(code) && state == ElementState::Pressed {
                    log::info!("Q/Escape pressed — exiting");
                    event_loop.exit();
                } else if let Some(key) = input::key_for(code) {
                    match state {
                        ElementState::Pressed => app.key_pressed(key),
                        ElementState::Released => app.key_released(key),
                    }
                }
            }

            WindowEvent::Focused(false) => app.focus_lost(),

            WindowEvent::Resized(_) => app.resize(),

            WindowEvent::RedrawRequested => match app.render() {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => {
                    log::warn!("surface lost — reconfiguring");
                    app.resize();
                }
                Err(e) if e.is_recoverable() => log::warn!("frame skipped: {e}"),
                Err(e) => {
                    log::error!("{e} — exiting");
                    event_loop.exit();
                }
            },

            _ => {}
        }
    }

    /// Drive continuous redraws, paced to the target frame rate.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = &self.app else {
            return;
        };
        match self.frame_interval {
            None => {
                event_loop.set_control_flow(ControlFlow::Poll);
                app.window().request_redraw();
            }
            Some(interval) => {
                let now = Instant::now();
                if now >= self.next_frame {
                    app.window().request_redraw();
                    self.next_frame = (self.next_frame + interval).max(now);
                }
                event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::parse();
    log::debug!("{config:?}");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = Handler::new(config);
    event_loop.run_app(&mut handler)?;
    Ok(())
}
