//! Image representation for the adjustment pipeline.

use crate::error::CoreError;

/// An RGBA image with normalized `f32` channels, stored row-major.
///
/// Channels are nominally in `[0, 1]`. Rendered buffers may leave that range;
/// see [`crate::present`] for where they are clamped.
///
/// The pixel count always equals `width * height`. Buffers are only built
/// through [`ImageBuffer::new`] or [`ImageBuffer::filled`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pixels: Vec<[f32; 4]>,
}

impl ImageBuffer {
    /// Wrap existing pixel data, rejecting a length that does not match the
    /// dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Result<Self, CoreError> {
        if pixels.len() != width as usize * height as usize {
            return Err(CoreError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: [f32; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major `[r, g, b, a]` pixels.
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// Consume the buffer, returning its pixels.
    pub fn into_pixels(self) -> Vec<[f32; 4]> {
        self.pixels
    }

    /// Resize to `width` by `height`. Existing pixels are kept only as far as
    /// the new length allows; callers overwrite every pixel afterwards.
    pub(crate) fn reshape(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.resize(width as usize * height as usize, [0.0; 4]);
    }

    /// Pixel at `(x, y)`. Panics when out of bounds; use
    /// [`crate::filter::sampler::sample`] for clamped access.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixels[self.index(x, y)]
    }

    /// Pixel count.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `other` has the same width and height.
    pub fn same_dimensions(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_pixel_count() {
        let err = ImageBuffer::new(2, 2, vec![[0.0; 4]; 3]).unwrap_err();
        assert_eq!(
            err,
            CoreError::DimensionMismatch {
                width: 2,
                height: 2,
                len: 3
            }
        );
    }

    #[test]
    fn test_pixel_is_row_major() {
        let pixels = (0..6).map(|i| [i as f32, 0.0, 0.0, 1.0]).collect();
        let image = ImageBuffer::new(3, 2, pixels).unwrap();
        assert_eq!(image.pixel(2, 0)[0], 2.0);
        assert_eq!(image.pixel(0, 1)[0], 3.0);
        assert_eq!(image.pixel(2, 1)[0], 5.0);
    }

    #[test]
    fn test_zero_sized_image_is_empty() {
        let image = ImageBuffer::new(0, 5, Vec::new()).unwrap();
        assert!(image.is_empty());
        assert_eq!(image.pixel_count(), 0);
    }

    #[test]
    fn test_reshape_tracks_dimensions() {
        let mut image = ImageBuffer::filled(5, 6, [1.0; 4]);
        image.reshape(2, 2);
        assert_eq!((image.width(), image.height()), (2, 2));
        assert_eq!(image.pixel_count(), 4);

        image.reshape(3, 4);
        assert_eq!(image.pixel_count(), 12);
    }

    #[test]
    fn test_into_pixels_returns_row_major_data() {
        let image = ImageBuffer::new(2, 1, vec![[0.1; 4], [0.2; 4]]).unwrap();
        assert_eq!(image.into_pixels(), vec![[0.1; 4], [0.2; 4]]);
    }
}
