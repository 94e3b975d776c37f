use mandelbrot_core::KernelParams;

/// All per-frame data uploaded to the GPU as a single uniform buffer.
/// Must match the `Uniforms` struct in `escape_time.wgsl`.
/// `repr(C)` + `bytemuck` ensures safe casting to `&[u8]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub resolution: [f32; 2],
    pub offset: [f32; 2],
    pub constant: [f32; 2],
    pub zoom: f32,
    pub escape_radius: f32,
    pub max_iterations: u32,
    pub _pad: [u32; 3], // keep 16-byte alignment
}

impl From<&KernelParams> for Uniforms {
    fn from(p: &KernelParams) -> Self {
        Self {
            resolution: p.resolution.as_vec2().to_array(),
            offset: p.offset.to_array(),
            constant: p.constant.to_array(),
            zoom: p.zoom,
            escape_radius: p.escape_radius,
            max_iterations: p.max_iterations,
            _pad: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandelbrot_core::ViewState;

    #[test]
    fn uniforms_are_48_bytes() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 48);
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }

    #[test]
    fn uniforms_from_default_view() {
        let u = Uniforms::from(&ViewState::new(512).kernel_params());
        assert_eq!(u.resolution, [512.0, 512.0]);
        assert_eq!(u.offset, [0.0, 0.0]);
        assert_eq!(u.constant, [-1.3, 0.00525]);
        assert_eq!(u.zoom, 1.0);
        assert_eq!(u.escape_radius, 2.0);
        assert_eq!(u.max_iterations, 50);
        assert_eq!(u._pad, [0; 3]);
    }

    #[test]
    fn uniform_bytes_put_max_iterations_at_offset_32() {
        let mut view = ViewState::new(16);
        view.max_iterations = 0x0102_0304;
        let u = Uniforms::from(&view.kernel_params());
        let bytes = bytemuck::bytes_of(&u);
        assert_eq!(&bytes[32..36], &0x0102_0304u32.to_ne_bytes());
    }
}
