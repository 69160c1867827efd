//! Per-pixel color adjustments (sharpen, temperature, brightness, contrast, saturation).
//!
//! Each function is the identity when its parameter is exactly zero and
//! returns the input untouched in that case, so a neutral slider never
//! introduces rounding drift. None of them clamp.

use glam::Vec3;

/// Mid-gray pivot for contrast scaling.
pub const CONTRAST_PIVOT: f32 = 0.5;

/// Gain applied to the unsharp-mask difference.
pub const SHARPEN_GAIN: f32 = 2.0;

/// Apply unsharp-mask sharpening.
///
/// ```text
/// out = base + (base − blur) × sharpness × 2
/// ```
///
/// Negative sharpness softens toward the blur.
pub fn apply_unsharp(base: Vec3, blur: Vec3, sharpness: f32) -> Vec3 {
    if sharpness == 0.0 {
        return base;
    }
    base + (base - blur) * sharpness * SHARPEN_GAIN
}

/// Shift white balance along the red-blue axis.
///
/// ```text
/// r += temperature
/// b −= temperature
/// ```
///
/// Green is untouched.
pub fn apply_temperature(rgb: Vec3, temperature: f32) -> Vec3 {
    if temperature == 0.0 {
        return rgb;
    }
    Vec3::new(rgb.x + temperature, rgb.y, rgb.z - temperature)
}

/// Add a uniform offset to all three channels.
pub fn apply_brightness(rgb: Vec3, brightness: f32) -> Vec3 {
    if brightness == 0.0 {
        return rgb;
    }
    rgb + Vec3::splat(brightness)
}

/// Scale channels around the mid-gray pivot.
///
/// ```text
/// out = (in − 0.5) × (contrast + 1) + 0.5
/// ```
///
/// `contrast = −1` collapses every channel to exactly 0.5.
pub fn apply_contrast(rgb: Vec3, contrast: f32) -> Vec3 {
    if contrast == 0.0 {
        return rgb;
    }
    let pivot = Vec3::splat(CONTRAST_PIVOT);
    (rgb - pivot) * (contrast + 1.0) + pivot
}

/// Mix between the channel mean and the color.
///
/// ```text
/// gray = (r + g + b) / 3
/// t    = saturation + 1
/// out  = gray × (1 − t) + rgb × t
/// ```
///
/// `saturation = −1` gives exactly `gray`; values above 0 extrapolate past the
/// original color.
pub fn apply_saturation(rgb: Vec3, saturation: f32) -> Vec3 {
    if saturation == 0.0 {
        return rgb;
    }
    let gray = Vec3::splat(rgb.element_sum() / 3.0);
    let t = saturation + 1.0;
    gray * (1.0 - t) + rgb * t
}
