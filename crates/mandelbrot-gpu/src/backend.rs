use mandelbrot_core::{KernelParams, RenderBackend, RenderError};

use crate::error::GpuInitError;
use crate::kernel::{EscapeTimeKernel, OutputImage};
use crate::renderer::Blitter;

/// wgpu device + window surface implementing the Controller's backend.
///
/// `set_parameters` and `dispatch` record into a pending command encoder;
/// `present` appends the blit and submits both together, so the compute pass
/// always precedes the blit that reads its output.
pub struct WgpuBackend {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,

    kernel: EscapeTimeKernel,
    blitter: Blitter,

    encoder: Option<wgpu::CommandEncoder>,
    bind_group: Option<wgpu::BindGroup>,
}

impl WgpuBackend {
    /// Initialise wgpu for `target` (typically an `Arc<Window>`).
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<Self, GpuInitError> {
        let width = width.max(1);
        let height = height.max(1);

        // ---- Instance & surface ---------------------------------------------
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(target)?;

        // ---- Adapter --------------------------------------------------------
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(GpuInitError::NoAdapter)?;

        log::info!("GPU adapter: {}", adapter.get_info().name);

        // ---- Device & Queue -------------------------------------------------
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("mandelbrot device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        // ---- Surface configuration ------------------------------------------
        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(GpuInitError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(GpuInitError::UnsupportedSurface)?;
        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        log::info!(
            "Surface configured: {}×{} {:?} {:?}",
            width,
            height,
            format,
            present_mode
        );

        let kernel = EscapeTimeKernel::new(&device);
        let blitter = Blitter::new(&device, format);

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            kernel,
            blitter,
            encoder: None,
            bind_group: None,
        })
    }

    /// Reconfigure the surface for a new window size.  The output image is
    /// independent of the window and is left alone.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        log::debug!("Surface resized to {}×{}", width, height);
    }
}

impl RenderBackend for WgpuBackend {
    type Target = OutputImage;

    fn allocate_target(&mut self, size: u32) -> Result<OutputImage, RenderError> {
        OutputImage::new(&self.device, size)
    }

    fn set_parameters(&mut self, params: &KernelParams, target: &OutputImage) {
        self.bind_group = Some(self.kernel.bind(&self.device, &self.queue, params, target));
    }

    fn dispatch(&mut self, tiles_x: u32, tiles_y: u32, tiles_z: u32) {
        let Some(bind_group) = &self.bind_group else {
            log::warn!("dispatch without parameters; skipped");
            return;
        };
        let encoder = self
            .encoder
            .get_or_insert_with(|| frame_encoder(&self.device));
        self.kernel
            .dispatch(encoder, bind_group, tiles_x, tiles_y, tiles_z);
    }

    fn present(&mut self, target: &OutputImage) -> Result<(), RenderError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(e) => {
                // Drop this frame's recorded work; the next tick re-records it.
                self.encoder = None;
                return Err(surface_error(e));
            }
        };
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .encoder
            .take()
            .unwrap_or_else(|| frame_encoder(&self.device));
        self.blitter
            .blit(&self.device, &mut encoder, target, &frame_view);

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn frame_encoder(device: &wgpu::Device) -> wgpu::CommandEncoder {
    device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("frame-encoder"),
    })
}

fn surface_error(e: wgpu::SurfaceError) -> RenderError {
    match e {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
        wgpu::SurfaceError::Timeout => RenderError::SurfaceTimeout,
        wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_surfaces_are_recoverable() {
        assert_eq!(surface_error(wgpu::SurfaceError::Lost), RenderError::SurfaceLost);
        assert_eq!(surface_error(wgpu::SurfaceError::Outdated), RenderError::SurfaceLost);
        assert!(surface_error(wgpu::SurfaceError::Timeout).is_recoverable());
    }

    #[test]
    fn surface_out_of_memory_is_fatal() {
        let err = surface_error(wgpu::SurfaceError::OutOfMemory);
        assert_eq!(err, RenderError::OutOfMemory);
        assert!(!err.is_recoverable());
    }
}
