pub mod animation;
pub mod backend;
pub mod controller;
pub mod error;
pub mod input;

pub use glam::{UVec2, Vec2};

pub use backend::{tile_count, KernelParams, RenderBackend, TILE_SIZE};
pub use controller::Controller;
pub use error::RenderError;
pub use input::{HeldKeys, Key};

/// Output image side length used when nothing else is configured.
pub const DEFAULT_TEXTURE_SIZE: u32 = 512;

// ---------------------------------------------------------------------------
// ViewState: every mutable rendering parameter, owned by the Controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Output image width and height in pixels.
    pub resolution: u32,
    /// Pan position in complex-plane units.
    pub offset: Vec2,
    pub zoom: f32,
    pub max_iterations: u32,
    pub escape_radius: f32,
    /// The `c` in `z ← z² + c`.
    pub constant: Vec2,
    pub animating: bool,
    pub animation_speed: f32,
}

impl ViewState {
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution,
            offset: Vec2::ZERO,
            zoom: 1.0,
            max_iterations: 50,
            escape_radius: 2.0,
            constant: Vec2::new(-1.3, 0.00525),
            animating: false,
            animation_speed: 0.001,
        }
    }

    /// Snapshot of the fields the kernel reads.
    pub fn kernel_params(&self) -> KernelParams {
        KernelParams {
            resolution: UVec2::splat(self.resolution),
            zoom: self.zoom,
            offset: self.offset,
            max_iterations: self.max_iterations,
            escape_radius: self.escape_radius,
            constant: self.constant,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_TEXTURE_SIZE)
    }
}
