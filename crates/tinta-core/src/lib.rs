//! Tinta Core: the five-parameter image adjustment pipeline.
//!
//! This crate contains the sampler, the filter kernel, the frame driver and
//! the presentation clamp. No GPU, windowing or file I/O dependencies.

pub mod error;
pub mod filter;
pub mod image;
pub mod params;
pub mod present;
pub mod preview;

// Re-exports for convenience.
pub use error::CoreError;
pub use filter::kernel::apply_filter;
pub use filter::render::{Schedule, render, render_into, render_with};
pub use filter::sampler::sample;
pub use image::ImageBuffer;
pub use params::{FilterParams, ParamId, ParamRange};
pub use preview::{Preview, RenderJob};
