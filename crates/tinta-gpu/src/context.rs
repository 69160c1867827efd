//! Adapter and device acquisition.

use crate::error::GpuError;

/// Features the adjustment pipeline needs. Plain storage buffers only.
pub fn required_features() -> wgpu::Features {
    wgpu::Features::empty()
}

/// A device/queue pair owned by the backend.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    /// Human-readable adapter name, for logs.
    pub adapter_name: String,
}

impl GpuContext {
    /// Request the default high-performance adapter and a device on it.
    /// Blocks the calling thread.
    pub fn create_blocking() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            ..Default::default()
        }))?;

        let info = adapter.get_info();
        tracing::info!("using GPU adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("tinta_device"),
            required_features: required_features(),
            required_limits: adapter.limits(),
            ..Default::default()
        }))?;

        Ok(Self {
            device,
            queue,
            adapter_name: info.name,
        })
    }
}
