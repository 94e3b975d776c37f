use thiserror::Error;

/// Everything that can go wrong while producing a frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("invalid texture size {0}: must be greater than zero")]
    InvalidResolution(u32),

    #[error("failed to allocate {size}x{size} output image: {reason}")]
    Allocation { size: u32, reason: String },

    /// The presentation surface was lost or went stale and must be reconfigured.
    #[error("presentation surface lost or outdated")]
    SurfaceLost,

    #[error("timed out acquiring the next surface texture")]
    SurfaceTimeout,

    #[error("GPU out of memory")]
    OutOfMemory,
}

impl RenderError {
    /// Surface hiccups are worth retrying next frame; anything else ends the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RenderError::SurfaceLost | RenderError::SurfaceTimeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_surface_errors_are_recoverable() {
        assert!(RenderError::SurfaceLost.is_recoverable());
        assert!(RenderError::SurfaceTimeout.is_recoverable());
        assert!(!RenderError::OutOfMemory.is_recoverable());
        assert!(!RenderError::InvalidResolution(0).is_recoverable());
        assert!(!RenderError::Allocation {
            size: 512,
            reason: "oom".into()
        }
        .is_recoverable());
    }

    #[test]
    fn allocation_message_names_size() {
        let err = RenderError::Allocation {
            size: 64,
            reason: "too large".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to allocate 64x64 output image: too large"
        );
    }
}
