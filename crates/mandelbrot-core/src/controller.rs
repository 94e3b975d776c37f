use crate::animation::animate;
use crate::backend::{tile_count, RenderBackend};
use crate::input::{apply_held_keys, HeldKeys};
use crate::{RenderError, ViewState};

/// Owns the view and the output image, and drives one frame per `tick`:
/// input → animation → parameter push → dispatch → present.
pub struct Controller<B: RenderBackend> {
    backend: B,
    view: ViewState,
    /// Output image paired with the side length it was allocated at.
    /// `None` only after a failed reallocation.
    target: Option<(u32, B::Target)>,
}

impl<B: RenderBackend> Controller<B> {
    /// Allocate the output image for `view.resolution`.  Failure is fatal.
    pub fn new(mut backend: B, view: ViewState) -> Result<Self, RenderError> {
        let target = allocate(&mut backend, view.resolution)?;
        Ok(Self {
            backend,
            target: Some((view.resolution, target)),
            view,
        })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Change the output size.  The image is reallocated on the next tick,
    /// before anything is dispatched against it.
    pub fn set_resolution(&mut self, size: u32) {
        if size != self.view.resolution {
            log::info!("Texture size {} → {}", self.view.resolution, size);
            self.view.resolution = size;
        }
    }

    /// Run one frame.  `elapsed` is seconds since application start.
    pub fn tick(&mut self, keys: &HeldKeys, elapsed: f32) -> Result<(), RenderError> {
        apply_held_keys(&mut self.view, keys);
        animate(&mut self.view, elapsed);
        self.render()
    }

    /// Push the current view to the kernel, dispatch, and present.
    pub fn render(&mut self) -> Result<(), RenderError> {
        let size = self.view.resolution;

        let target = match self.target.take() {
            Some((allocated, target)) if allocated == size => target,
            stale => {
                // Release the old image before asking for the new one.
                drop(stale);
                allocate(&mut self.backend, size)?
            }
        };

        self.backend
            .set_parameters(&self.view.kernel_params(), &target);
        let tiles = tile_count(size);
        self.backend.dispatch(tiles, tiles, 1);
        let presented = self.backend.present(&target);

        self.target = Some((size, target));
        presented
    }
}

fn allocate<B: RenderBackend>(backend: &mut B, size: u32) -> Result<B::Target, RenderError> {
    if size == 0 {
        return Err(RenderError::InvalidResolution(size));
    }
    let target = backend.allocate_target(size)?;
    log::info!("Output image allocated: {size}×{size}");
    Ok(target)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
