//! Image loading and saving for the command line.

use std::path::Path;

use tinta_core::image::ImageBuffer;
use tinta_core::{CoreError, present};

/// Load an image from disk as normalized RGBA.
///
/// Any format the `image` crate decodes is accepted. Pixels go through 8-bit
/// RGBA first, the same precision a browser texture upload would see.
pub fn load_image(path: &Path) -> Result<ImageBuffer, ImageIoError> {
    let img = image::open(path).map_err(ImageIoError::Decode)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::info!("loaded {} ({width}x{height})", path.display());
    Ok(present::from_rgba8(width, height, rgba.as_raw())?)
}

/// Clamp, quantize and write `image` to `path`. The format follows the
/// extension; formats without alpha drop it.
pub fn save_image(path: &Path, image: &ImageBuffer) -> Result<(), ImageIoError> {
    let bytes = present::to_rgba8(image);
    let rgba = image::RgbaImage::from_raw(image.width(), image.height(), bytes)
        .ok_or(ImageIoError::BufferSize)?;

    let keeps_alpha = matches!(
        image::ImageFormat::from_path(path),
        Ok(image::ImageFormat::Png
            | image::ImageFormat::Tiff
            | image::ImageFormat::WebP
            | image::ImageFormat::Tga
            | image::ImageFormat::Qoi)
    );
    if keeps_alpha {
        rgba.save(path).map_err(ImageIoError::Encode)?;
    } else {
        image::DynamicImage::ImageRgba8(rgba)
            .to_rgb8()
            .save(path)
            .map_err(ImageIoError::Encode)?;
    }
    tracing::info!("wrote {} ({}x{})", path.display(), image.width(), image.height());
    Ok(())
}

/// Errors that can occur while reading or writing images.
#[derive(Debug, thiserror::Error)]
pub enum ImageIoError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error("decoded pixels do not fit the image: {0}")]
    Pixels(#[from] CoreError),
    #[error("rendered buffer does not match its dimensions")]
    BufferSize,
}
