//! GPU-to-CPU image download.

use std::sync::mpsc;

use tinta_core::image::ImageBuffer;

use crate::buffers::GpuImageHandle;
use crate::error::GpuError;

/// Download a GPU image buffer back to an [`ImageBuffer`]. Blocks until complete.
///
/// `staging_cache` is reused across calls and grown when too small.
pub fn download_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    handle: &GpuImageHandle,
    staging_cache: &mut Option<wgpu::Buffer>,
) -> Result<ImageBuffer, GpuError> {
    let size = handle.byte_size();
    if staging_cache.as_ref().is_none_or(|buf| buf.size() < size) {
        *staging_cache = None;
    }
    let staging: &wgpu::Buffer = staging_cache.get_or_insert_with(|| {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tinta_image_staging"),
            size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        })
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("tinta_image_download_encoder"),
    });
    encoder.copy_buffer_to_buffer(&handle.buffer, 0, staging, 0, size);
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..size);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(|e| GpuError::BufferMap(e.to_string()))?;
    rx.recv()
        .map_err(|e| GpuError::BufferMap(e.to_string()))?
        .map_err(|e| GpuError::BufferMap(e.to_string()))?;

    let pixels = {
        let data = slice.get_mapped_range();
        bytemuck::cast_slice::<u8, [f32; 4]>(&data).to_vec()
    };
    staging.unmap();

    ImageBuffer::new(handle.width, handle.height, pixels)
        .map_err(|e| GpuError::BufferMap(e.to_string()))
}
