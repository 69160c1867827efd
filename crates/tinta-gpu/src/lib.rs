//! Tinta GPU: wgpu compute backend for the adjustment pipeline.
//!
//! Runs the same kernel as `tinta_core::filter::kernel` as one compute
//! invocation per pixel. Output is unclamped, like the CPU driver.

pub mod buffers;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod readback;
pub mod uniforms;

pub use context::{GpuContext, required_features};
pub use error::GpuError;
pub use pipeline::{FilterPipeline, GpuRenderer};
pub use uniforms::FilterParamsGpu;
