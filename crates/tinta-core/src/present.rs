//! Presentation: the single point where rendered values are clamped.
//!
//! Rendering keeps full float range so that chained adjustments and the GPU
//! backend agree bit-for-bit in intent. Values are clamped to `[0, 1]` exactly
//! once, when a buffer is quantized for display or written to disk. Pushing
//! contrast or brightness to the extremes therefore bands here, not inside
//! the kernel.

use crate::error::CoreError;
use crate::image::ImageBuffer;

/// Clamp every channel to `[0, 1]`. NaN becomes 0.
pub fn clamp_unit(sample: [f32; 4]) -> [f32; 4] {
    sample.map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
}

/// Clamp and quantize to interleaved 8-bit RGBA.
pub fn to_rgba8(image: &ImageBuffer) -> Vec<u8> {
    image
        .pixels
        .iter()
        .flat_map(|&px| clamp_unit(px).map(|v| (v * 255.0).round() as u8))
        .collect()
}

/// Normalize interleaved 8-bit RGBA into a float buffer.
pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<ImageBuffer, CoreError> {
    let expected = width as usize * height as usize * 4;
    if bytes.len() != expected {
        return Err(CoreError::ByteLengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| [px[0], px[1], px[2], px[3]].map(|v| f32::from(v) / 255.0))
        .collect();
    ImageBuffer::new(width, height, pixels)
}
