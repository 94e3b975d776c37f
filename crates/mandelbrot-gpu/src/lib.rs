pub mod backend;
pub mod context;
pub mod error;
pub mod kernel;
pub mod renderer;

pub use backend::WgpuBackend;
pub use error::GpuInitError;
pub use kernel::OutputImage;
