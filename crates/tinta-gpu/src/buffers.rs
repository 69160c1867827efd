//! GPU storage buffers holding images as `array<vec4<f32>>`.

use tinta_core::image::ImageBuffer;
use wgpu::util::DeviceExt;

use crate::error::GpuError;
use crate::pipeline::WORKGROUP_SIZE;

/// Bytes per RGBA f32 pixel.
pub const BYTES_PER_PIXEL: u64 = 16;

/// Handle to a GPU image stored as a storage buffer of `vec4<f32>`.
pub struct GpuImageHandle {
    pub buffer: wgpu::Buffer,
    pub width: u32,
    pub height: u32,
}

impl GpuImageHandle {
    /// Upload an [`ImageBuffer`] as a read-only source.
    pub fn upload(device: &wgpu::Device, image: &ImageBuffer) -> Result<Self, GpuError> {
        if image.is_empty() {
            return Err(GpuError::EmptyImage);
        }
        check_limits(&device.limits(), image.width(), image.height())?;
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tinta_image_upload"),
            contents: bytemuck::cast_slice(image.pixels()),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });
        Ok(Self {
            buffer,
            width: image.width(),
            height: image.height(),
        })
    }

    /// Create an uninitialized output buffer the shader writes into.
    pub fn create_output(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tinta_image_output"),
            size: byte_size(width, height),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Pixel count.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Buffer size in bytes.
    pub fn byte_size(&self) -> u64 {
        byte_size(self.width, self.height)
    }
}

fn byte_size(width: u32, height: u32) -> u64 {
    u64::from(width) * u64::from(height) * BYTES_PER_PIXEL
}

/// Reject images the device cannot hold in one storage buffer or cover in
/// one dispatch.
pub fn check_limits(limits: &wgpu::Limits, width: u32, height: u32) -> Result<(), GpuError> {
    let too_large = |limit, required, max| GpuError::ImageTooLarge {
        width,
        height,
        limit,
        required,
        max,
    };

    let bytes = byte_size(width, height);
    if bytes > limits.max_buffer_size {
        return Err(too_large("max_buffer_size", bytes, limits.max_buffer_size));
    }
    let binding_max = u64::from(limits.max_storage_buffer_binding_size);
    if bytes > binding_max {
        return Err(too_large("max_storage_buffer_binding_size", bytes, binding_max));
    }

    let groups_max = u64::from(limits.max_compute_workgroups_per_dimension);
    let groups = u64::from(width.div_ceil(WORKGROUP_SIZE).max(height.div_ceil(WORKGROUP_SIZE)));
    if groups > groups_max {
        return Err(too_large("max_compute_workgroups_per_dimension", groups, groups_max));
    }
    Ok(())
}
