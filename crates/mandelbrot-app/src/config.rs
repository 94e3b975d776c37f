use std::time::Duration;

use clap::Parser;
use mandelbrot_core::{ViewState, DEFAULT_TEXTURE_SIZE};

/// Interactive escape-time fractal explorer.
///
/// Arrows pan, Space zooms, Left Shift clamps zoom to 1, U/J and I/K nudge
/// the constant, R resets, Q or Escape quits.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Width and height of the rendered image in pixels
    #[arg(long, default_value_t = DEFAULT_TEXTURE_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub texture_size: u32,

    /// Iteration cap per pixel
    #[arg(long, default_value_t = 50)]
    pub max_iterations: u32,

    /// Divergence threshold for |z|
    #[arg(long, default_value_t = 2.0)]
    pub escape_radius: f32,

    /// Orbit the constant around the unit circle over time
    #[arg(long)]
    pub animate: bool,

    /// Orbit speed in radians per second; also the per-frame zoom step
    #[arg(long, default_value_t = 0.001, allow_hyphen_values = true)]
    pub animation_speed: f32,

    /// Frame rate cap; 0 renders as fast as possible
    #[arg(long, default_value_t = 75)]
    pub target_fps: u32,

    /// Synchronise presentation with the display refresh
    #[arg(long)]
    pub vsync: bool,
}

impl Config {
    pub fn initial_view(&self) -> ViewState {
        ViewState {
            max_iterations: self.max_iterations,
            escape_radius: self.escape_radius,
            animating: self.animate,
            animation_speed: self.animation_speed,
            ..ViewState::new(self.texture_size)
        }
    }

    /// Time between frames, or `None` when uncapped.
    pub fn frame_interval(&self) -> Option<Duration> {
        (self.target_fps > 0).then(|| Duration::from_secs_f64(1.0 / self.target_fps as f64))
    }
}
