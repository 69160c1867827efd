//! The per-pixel filter: sampler, color adjustments, kernel and frame driver.

pub mod adjust;
pub mod kernel;
pub mod render;
pub mod sampler;
