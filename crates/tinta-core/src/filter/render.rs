//! Frame driver. Evaluates the filter kernel for every output pixel.
//!
//! A render is a pure function of `(source, params)`. No pixel depends on
//! another output pixel, so rows are distributed freely across threads.

use std::time::Instant;

use rayon::prelude::*;

use crate::filter::kernel::apply_filter;
use crate::image::ImageBuffer;
use crate::params::FilterParams;

/// How the frame driver walks the output buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Schedule {
    /// Single-threaded row-major scan.
    Sequential,
    /// Rows split across the rayon thread pool.
    #[default]
    Parallel,
}

/// Render `source` with `params` using the default schedule.
pub fn render(source: &ImageBuffer, params: &FilterParams) -> ImageBuffer {
    render_with(source, params, Schedule::default())
}

/// Render `source` with `params` into a freshly allocated buffer.
pub fn render_with(source: &ImageBuffer, params: &FilterParams, schedule: Schedule) -> ImageBuffer {
    let mut output = ImageBuffer::filled(source.width, source.height, [0.0; 4]);
    render_into(source, params, &mut output, schedule);
    output
}

/// Render into a caller-owned buffer, reshaping it to the source dimensions.
///
/// `output` is write-only: its previous contents never influence the result.
pub fn render_into(
    source: &ImageBuffer,
    params: &FilterParams,
    output: &mut ImageBuffer,
    schedule: Schedule,
) {
    let start = Instant::now();

    output.reshape(source.width, source.height);

    if source.is_empty() {
        return;
    }

    let width = source.width as usize;
    let fill_row = |(y, row): (usize, &mut [[f32; 4]])| {
        for (x, px) in row.iter_mut().enumerate() {
            *px = apply_filter(source, x as u32, y as u32, params);
        }
    };

    match schedule {
        Schedule::Sequential => output.pixels.chunks_mut(width).enumerate().for_each(fill_row),
        Schedule::Parallel => output
            .pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(fill_row),
    }

    tracing::debug!(
        "rendered {}x{} ({:?}) in {:.2}ms",
        source.width,
        source.height,
        schedule,
        start.elapsed().as_secs_f64() * 1000.0
    );
}
