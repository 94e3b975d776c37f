use mandelbrot_core::{KernelParams, RenderError};
use wgpu::{BindGroup, BindGroupLayout, Buffer, ComputePipeline, Device, Queue, Texture, TextureView};

use crate::context::Uniforms;

pub const ESCAPE_TIME_WGSL: &str = include_str!("../shaders/escape_time.wgsl");

/// Compute entry point in `escape_time.wgsl`.
pub const KERNEL_ENTRY: &str = "main";

/// Pixel format of the output image; storage-writable and filterable.
pub const OUTPUT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

// ---------------------------------------------------------------------------
// OutputImage: the kernel's square render target
// ---------------------------------------------------------------------------

pub struct OutputImage {
    // Owns the allocation behind `view`.
    _texture: Texture,
    view: TextureView,
}

impl OutputImage {
    /// Allocate a `size × size` image the kernel writes and the blit samples.
    ///
    /// Creation runs inside validation and out-of-memory error scopes so a
    /// failed allocation comes back as an error instead of a device panic.
    pub fn new(device: &Device, size: u32) -> Result<Self, RenderError> {
        let max = device.limits().max_texture_dimension_2d;
        if size > max {
            return Err(RenderError::Allocation {
                size,
                reason: format!("exceeds device limit of {max}"),
            });
        }

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("output_image"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OUTPUT_FORMAT,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let validation = pollster::block_on(device.pop_error_scope());
        let out_of_memory = pollster::block_on(device.pop_error_scope());

        if let Some(err) = validation.or(out_of_memory) {
            return Err(RenderError::Allocation {
                size,
                reason: err.to_string(),
            });
        }

        let view = texture.create_view(&Default::default());
        Ok(Self {
            _texture: texture,
            view,
        })
    }

    pub(crate) fn view(&self) -> &TextureView {
        &self.view
    }
}

// ---------------------------------------------------------------------------
// EscapeTimeKernel: compute pipeline + uniform buffer
// ---------------------------------------------------------------------------

/// The compute pipeline plus the uniform buffer and layout it binds.
pub struct EscapeTimeKernel {
    pipeline: ComputePipeline,
    bind_group_layout: BindGroupLayout,
    uniform_buf: Buffer,
}

impl EscapeTimeKernel {
    pub fn new(device: &Device) -> Self {
        // binding 0 : Uniforms uniform buffer
        // binding 1 : rgba8unorm storage texture (write-only)
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kernel_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: OUTPUT_FORMAT,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kernel_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kernel_uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("escape_time"),
            source: wgpu::ShaderSource::Wgsl(ESCAPE_TIME_WGSL.into()),
        });
        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("escape_time"),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: KERNEL_ENTRY,
            compilation_options: Default::default(),
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
            uniform_buf,
        }
    }

    /// Upload `params` and build the bind group that targets `output`.
    pub fn bind(
        &self,
        device: &Device,
        queue: &Queue,
        params: &KernelParams,
        output: &OutputImage,
    ) -> BindGroup {
        queue.write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(&Uniforms::from(params)));

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kernel_bg"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buf.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(output.view()),
                },
            ],
        })
    }

    /// Record the compute pass into `encoder`.
    pub fn dispatch(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        bind_group: &BindGroup,
        tiles_x: u32,
        tiles_y: u32,
        tiles_z: u32,
    ) {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("escape_time_pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.dispatch_workgroups(tiles_x, tiles_y, tiles_z);
    }
}
