//! Clamp-to-edge, nearest-neighbor pixel reads.

use glam::Vec4;

use crate::image::ImageBuffer;

/// Read the pixel at signed pixel coordinates `(x, y)`.
///
/// Coordinates outside the image are clamped to the nearest edge pixel, so
/// the neighborhood of a border pixel repeats the border instead of wrapping
/// or reading black. An empty image yields transparent black.
pub fn sample(image: &ImageBuffer, x: i64, y: i64) -> Vec4 {
    if image.is_empty() {
        return Vec4::ZERO;
    }
    let cx = x.clamp(0, i64::from(image.width) - 1) as u32;
    let cy = y.clamp(0, i64::from(image.height) - 1) as u32;
    Vec4::from_array(image.pixel(cx, cy))
}
