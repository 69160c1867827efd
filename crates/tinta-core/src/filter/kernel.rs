//! The filter kernel, the full adjustment chain for a single output pixel.

use glam::{Vec3, Vec4};

use crate::filter::adjust::{
    apply_brightness, apply_contrast, apply_saturation, apply_temperature, apply_unsharp,
};
use crate::filter::sampler::sample;
use crate::image::ImageBuffer;
use crate::params::FilterParams;

/// 3×3 blur weights, indexed `[dy + 1][dx + 1]`.
pub const KERNEL_WEIGHTS: [[f32; 3]; 3] = [
    [1.0, 2.0, 1.0],
    [2.0, 4.0, 2.0],
    [1.0, 2.0, 1.0],
];

/// Sum of [`KERNEL_WEIGHTS`].
pub const KERNEL_WEIGHT_SUM: f32 = 16.0;

/// Weighted 3×3 average of the RGB channels around `(x, y)`, clamp-to-edge.
pub fn blur_at(image: &ImageBuffer, x: i64, y: i64) -> Vec3 {
    let mut sum = Vec3::ZERO;
    for (row, dy) in KERNEL_WEIGHTS.iter().zip(-1i64..=1) {
        for (&weight, dx) in row.iter().zip(-1i64..=1) {
            sum += sample(image, x + dx, y + dy).truncate() * weight;
        }
    }
    sum / KERNEL_WEIGHT_SUM
}

/// Evaluate the adjustment chain for pixel `(x, y)` of `image`. The GPU
/// `adjust.wgsl` shader mirrors this step for step.
///
/// 1. Base color
/// 2. 3×3 blur (skipped when sharpness is zero)
/// 3. Unsharp mask
/// 4. Temperature
/// 5. Brightness
/// 6. Contrast
/// 7. Saturation
///
/// Alpha is the base alpha. The result is not clamped.
pub fn apply_filter(image: &ImageBuffer, x: u32, y: u32, params: &FilterParams) -> [f32; 4] {
    let (x, y) = (i64::from(x), i64::from(y));
    let base: Vec4 = sample(image, x, y);

    let mut rgb = base.truncate();
    if params.sharpness != 0.0 {
        rgb = apply_unsharp(rgb, blur_at(image, x, y), params.sharpness);
    }
    rgb = apply_temperature(rgb, params.temperature);
    rgb = apply_brightness(rgb, params.brightness);
    rgb = apply_contrast(rgb, params.contrast);
    rgb = apply_saturation(rgb, params.saturation);

    rgb.extend(base.w).to_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamId;

    const EPSILON: f32 = 1e-6;

    fn checker_2x2() -> ImageBuffer {
        ImageBuffer::new(
            2,
            2,
            vec![
                [1.0, 1.0, 1.0, 1.0],
                [0.0, 0.0, 0.0, 1.0],
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 0.5],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_weights_sum_to_normalizer() {
        let sum: f32 = KERNEL_WEIGHTS.iter().flatten().sum();
        assert_eq!(sum, KERNEL_WEIGHT_SUM);
    }

    #[test]
    fn test_blur_of_flat_image_is_the_color() {
        let image = ImageBuffer::filled(4, 3, [0.25, 0.5, 0.75, 1.0]);
        for (x, y) in [(0, 0), (3, 2), (1, 1)] {
            let blur = blur_at(&image, x, y);
            assert!((blur - Vec3::new(0.25, 0.5, 0.75)).abs().max_element() < EPSILON);
        }
    }

    #[test]
    fn test_blur_at_corner_uses_clamped_taps() {
        // Top-left of the checker: taps clamp so that
        // white gets weights 1+2+2+4 = 9, black 1+2 = 3, red 1+2 = 3, blue 1.
        let blur = blur_at(&checker_2x2(), 0, 0);
        let expected = Vec3::new(9.0 + 3.0, 9.0, 9.0 + 1.0) / 16.0;
        assert!((blur - expected).abs().max_element() < EPSILON, "{blur:?} vs {expected:?}");
    }

    #[test]
    fn test_identity_params_return_base_exactly() {
        let image = checker_2x2();
        let params = FilterParams::default();
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(apply_filter(&image, x, y, &params), image.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_alpha_passes_through() {
        let image = checker_2x2();
        let params = FilterParams {
            brightness: 0.3,
            contrast: 0.5,
            saturation: -0.4,
            temperature: 0.2,
            sharpness: 0.7,
        };
        assert_eq!(apply_filter(&image, 1, 1, &params)[3], 0.5);
        assert_eq!(apply_filter(&image, 0, 0, &params)[3], 1.0);
    }

    #[test]
    fn test_sharpen_pushes_corner_away_from_blur() {
        let image = checker_2x2();
        let params = FilterParams::default().with(ParamId::Sharpness, 0.5);
        let out = apply_filter(&image, 0, 0, &params);
        let blur = Vec3::new(12.0, 9.0, 10.0) / 16.0;
        // white + (white - blur) * 0.5 * 2
        let expected = Vec3::ONE + (Vec3::ONE - blur);
        for c in 0..3 {
            assert!((out[c] - expected[c]).abs() < EPSILON, "channel {c}");
        }
    }

    #[test]
    fn test_steps_apply_in_fixed_order() {
        // Brightness before contrast: (0.4 + 0.1 - 0.5) * 2 + 0.5 = 0.5,
        // the other order would give (0.4 - 0.5) * 2 + 0.5 + 0.1 = 0.4.
        let image = ImageBuffer::filled(1, 1, [0.4, 0.4, 0.4, 1.0]);
        let params = FilterParams {
            brightness: 0.1,
            contrast: 1.0,
            ..Default::default()
        };
        let out = apply_filter(&image, 0, 0, &params);
        for c in 0..3 {
            assert!((out[c] - 0.5).abs() < EPSILON, "channel {c}: {}", out[c]);
        }
    }
}
