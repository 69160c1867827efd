//! End-to-end properties of the adjustment pipeline.

use tinta_core::present::{clamp_unit, to_rgba8};
use tinta_core::{FilterParams, ImageBuffer, ParamId, Schedule, apply_filter, render, render_with};

const EPSILON: f32 = 1e-5;

/// A small noisy-looking image with varying alpha, built deterministically.
fn create_test_image(width: u32, height: u32) -> ImageBuffer {
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 37 + y * 11) % 17) as f32 / 16.0;
            let g = ((x * 5 + y * 29) % 13) as f32 / 12.0;
            let b = ((x * 19 + y * 3) % 7) as f32 / 6.0;
            let a = ((x + y) % 4) as f32 / 3.0;
            pixels.push([r, g, b, a]);
        }
    }
    ImageBuffer::new(width, height, pixels).expect("dimensions match")
}

fn white_black_red_blue() -> ImageBuffer {
    ImageBuffer::new(
        2,
        2,
        vec![
            [1.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
        ],
    )
    .expect("dimensions match")
}

#[test]
fn test_zero_params_reproduce_input() {
    let image = create_test_image(12, 9);
    let output = render(&image, &FilterParams::default());
    assert_eq!(output, image);
}

#[test]
fn test_zero_params_are_idempotent_under_repeated_renders() {
    let image = create_test_image(6, 6);
    let params = FilterParams::default();
    let once = render(&image, &params);
    let twice = render(&once, &params);
    assert_eq!(twice, image);
}

#[test]
fn test_saturation_minus_one_is_grayscale_mean() {
    let image = create_test_image(8, 5);
    let params = FilterParams::default().with(ParamId::Saturation, -1.0);
    let output = render(&image, &params);
    for (i, (src, dst)) in image.pixels().iter().zip(output.pixels()).enumerate() {
        let mean = (src[0] + src[1] + src[2]) / 3.0;
        for c in 0..3 {
            assert!(
                (dst[c] - mean).abs() < EPSILON,
                "pixel {i} channel {c}: {} vs mean {mean}",
                dst[c]
            );
        }
        assert_eq!(dst[3], src[3]);
    }
}

#[test]
fn test_contrast_minus_one_collapses_to_mid_gray() {
    let image = create_test_image(5, 7);
    let params = FilterParams::default().with(ParamId::Contrast, -1.0);
    for px in render(&image, &params).pixels() {
        assert_eq!(px[..3], [0.5, 0.5, 0.5]);
    }
}

#[test]
fn test_temperature_shifts_red_and_blue_by_t() {
    let image = create_test_image(6, 4);
    let base = FilterParams {
        brightness: 0.05,
        sharpness: 0.3,
        ..Default::default()
    };
    for t in [-0.7, -0.1, 0.25, 1.0] {
        let warmed = base.with(ParamId::Temperature, t);
        for y in 0..image.height() {
            for x in 0..image.width() {
                let neutral = apply_filter(&image, x, y, &base);
                let shifted = apply_filter(&image, x, y, &warmed);
                assert!((shifted[0] - neutral[0] - t).abs() < EPSILON);
                assert!((shifted[1] - neutral[1]).abs() < EPSILON);
                assert!((shifted[2] - neutral[2] + t).abs() < EPSILON);
            }
        }
    }
}

#[test]
fn test_single_pixel_image_sharpens_to_itself() {
    let image = ImageBuffer::filled(1, 1, [0.3, 0.6, 0.9, 0.7]);
    let params = FilterParams::default().with(ParamId::Sharpness, 1.0);
    let output = render(&image, &params);
    for c in 0..4 {
        assert!((output.pixels()[0][c] - image.pixels()[0][c]).abs() < EPSILON);
    }
}

#[test]
fn test_brightness_scenario_presents_clamped() {
    let image = white_black_red_blue();
    let params = FilterParams::default().with(ParamId::Brightness, 0.2);
    let output = render(&image, &params);

    let expected = [
        [1.0, 1.0, 1.0, 1.0],
        [0.2, 0.2, 0.2, 1.0],
        [1.0, 0.2, 0.2, 1.0],
        [0.2, 0.2, 1.0, 1.0],
    ];
    for (i, (px, want)) in output.pixels().iter().zip(expected).enumerate() {
        let shown = clamp_unit(*px);
        for c in 0..4 {
            assert!(
                (shown[c] - want[c]).abs() < EPSILON,
                "pixel {i} channel {c}: {} vs {}",
                shown[c],
                want[c]
            );
        }
    }
    // Unclamped until presentation.
    assert!((output.pixels()[0][0] - 1.2).abs() < EPSILON);
    assert_eq!(
        to_rgba8(&output),
        vec![255, 255, 255, 255, 51, 51, 51, 255, 255, 51, 51, 255, 51, 51, 255, 255]
    );
}

#[test]
fn test_sharpen_on_non_uniform_2x2_matches_kernel_weights() {
    let image = white_black_red_blue();
    let params = FilterParams::default().with(ParamId::Sharpness, 0.25);
    let output = render_with(&image, &params, Schedule::Sequential);

    // Black at (1, 0): clamped taps give white 3, black 9, red 1, blue 3.
    let blur = [(3.0 + 1.0) / 16.0, 3.0 / 16.0, (3.0 + 3.0) / 16.0];
    for c in 0..3 {
        let expected = 0.0 + (0.0 - blur[c]) * 0.25 * 2.0;
        assert!(
            (output.pixels()[1][c] - expected).abs() < EPSILON,
            "channel {c}: {} vs {expected}",
            output.pixels()[1][c]
        );
    }
}

#[test]
fn test_out_of_range_params_extrapolate() {
    let image = ImageBuffer::filled(2, 2, [0.5, 0.5, 0.5, 1.0]);
    let params = FilterParams::default().with(ParamId::Brightness, 3.0);
    let output = render(&image, &params);
    assert!((output.pixels()[3][0] - 3.5).abs() < EPSILON);
}
