//! Errors from GPU setup, dispatch and readback.

/// Errors produced by the GPU backend.
///
/// Setup errors are terminal for the backend; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no compatible GPU adapter: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("could not compile the adjustment shader:\n\n{0}")]
    ShaderCompilation(String),
    #[error("failed to read back GPU buffer: {0}")]
    BufferMap(String),
    #[error("cannot upload an empty image")]
    EmptyImage,
    #[error("{width}x{height} image exceeds {limit} ({required} > {max})")]
    ImageTooLarge {
        width: u32,
        height: u32,
        limit: &'static str,
        required: u64,
        max: u64,
    },
    #[error("GPU rejected the adjustment pass: {0}")]
    Validation(String),
}
