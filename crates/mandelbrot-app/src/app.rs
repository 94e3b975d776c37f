use std::sync::Arc;
use std::time::{Duration, Instant};

use mandelbrot_core::{Controller, HeldKeys, Key, RenderError, ViewState};
use mandelbrot_gpu::WgpuBackend;
use winit::window::Window;

use crate::config::Config;

// ---------------------------------------------------------------------------
// FrameStats: frame rate and view summary, reported once per second
// ---------------------------------------------------------------------------

struct FrameStats {
    frames: u32,
    window_start: Instant,
}

impl FrameStats {
    const REPORT_EVERY: Duration = Duration::from_secs(1);

    fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            window_start: now,
        }
    }

    /// Count a frame finished at `now`.  Once a full reporting window has
    /// passed, returns the average rate over it and starts a new window.
    fn frame_finished(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let span = now.saturating_duration_since(self.window_start);
        if span < Self::REPORT_EVERY {
            return None;
        }
        let fps = self.frames as f32 / span.as_secs_f32();
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }

    fn record(&mut self, now: Instant, view: &ViewState) {
        if let Some(fps) = self.frame_finished(now) {
            log::debug!(
                "FPS: {:.1}  zoom: {:.4}  offset: ({:.4}, {:.4})  c: ({:.5}, {:.5})",
                fps,
                view.zoom,
                view.offset.x,
                view.offset.y,
                view.constant.x,
                view.constant.y,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// App: one window, one controller
// ---------------------------------------------------------------------------

pub struct App {
    window: Arc<Window>,
    controller: Controller<WgpuBackend>,
    keys: HeldKeys,
    started: Instant,
    stats: FrameStats,
}

impl App {
    /// Bring up the GPU for `window` and allocate the output image.
    pub fn new(window: Arc<Window>, config: &Config) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let backend = WgpuBackend::new(Arc::clone(&window), size.width, size.height, config.vsync)?;
        let controller = Controller::new(backend, config.initial_view())?;

        Ok(Self {
            window,
            controller,
            keys: HeldKeys::new(),
            started: Instant::now(),
            stats: FrameStats::new(Instant::now()),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn key_pressed(&mut self, key: Key) {
        self.keys.press(key);
    }

    pub fn key_released(&mut self, key: Key) {
        self.keys.release(key);
    }

    pub fn focus_lost(&mut self) {
        self.keys.release_all();
    }

    /// Reconfigure the surface to the window's current size.
    pub fn resize(&mut self) {
        let size = self.window.inner_size();
        self.controller
            .backend_mut()
            .resize(size.width, size.height);
    }

    /// Run one frame.
    pub fn render(&mut self) -> Result<(), RenderError> {
        let elapsed = self.started.elapsed().as_secs_f32();
        let result = self.controller.tick(&self.keys, elapsed);

        self.stats.record(Instant::now(), self.controller.view());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_report_inside_the_first_second() {
        let t0 = Instant::now();
        let mut stats = FrameStats::new(t0);
        for ms in [10, 500, 999] {
            assert_eq!(stats.frame_finished(t0 + Duration::from_millis(ms)), None);
        }
    }

    #[test]
    fn reports_average_rate_and_restarts_window() {
        let t0 = Instant::now();
        let mut stats = FrameStats::new(t0);
        for i in 1..75 {
            assert_eq!(stats.frame_finished(t0 + Duration::from_millis(i * 10)), None);
        }
        let fps = stats
            .frame_finished(t0 + Duration::from_secs(1))
            .expect("a report after one second");
        assert!((fps - 75.0).abs() < 1e-3, "fps={fps}");

        // New window: one frame half a second later is not enough.
        assert_eq!(
            stats.frame_finished(t0 + Duration::from_millis(1500)),
            None
        );
    }

    #[test]
    fn slow_frames_report_below_one() {
        let t0 = Instant::now();
        let mut stats = FrameStats::new(t0);
        let fps = stats.frame_finished(t0 + Duration::from_secs(4)).unwrap();
        assert!((fps - 0.25).abs() < 1e-6, "fps={fps}");
    }
}
