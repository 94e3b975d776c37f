use glam::{UVec2, Vec2};

use crate::RenderError;

/// Side length of the square pixel tile handled by one kernel workgroup.
pub const TILE_SIZE: u32 = 8;

/// Tiles needed along one axis to cover `resolution` pixels.
pub fn tile_count(resolution: u32) -> u32 {
    resolution.div_ceil(TILE_SIZE)
}

/// The named uniforms the escape-time kernel reads each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelParams {
    pub resolution: UVec2,
    pub zoom: f32,
    pub offset: Vec2,
    pub max_iterations: u32,
    pub escape_radius: f32,
    pub constant: Vec2,
}

/// The compute device and display the Controller drives.
///
/// The kernel itself is opaque: it turns the parameters into one colour per
/// pixel of the bound target.  Implementations may queue work; nothing here
/// waits for the device.
pub trait RenderBackend {
    /// A square image the kernel can write to and the presenter can read.
    type Target;

    /// Create a `size × size` image with compute write access.
    fn allocate_target(&mut self, size: u32) -> Result<Self::Target, RenderError>;

    /// Upload `params` and bind `target` as the kernel's output.
    fn set_parameters(&mut self, params: &KernelParams, target: &Self::Target);

    /// Run the kernel over `tiles_x × tiles_y × tiles_z` tiles of
    /// `TILE_SIZE × TILE_SIZE × 1` pixels.
    fn dispatch(&mut self, tiles_x: u32, tiles_y: u32, tiles_z: u32);

    /// Copy `target` onto the display.
    fn present(&mut self, target: &Self::Target) -> Result<(), RenderError>;
}
