//! The adjustment compute pipeline and the renderer that drives it.

use std::num::NonZeroU64;
use std::time::Instant;

use tinta_core::image::ImageBuffer;
use tinta_core::params::FilterParams;

use crate::buffers::{BYTES_PER_PIXEL, GpuImageHandle};
use crate::context::GpuContext;
use crate::error::GpuError;
use crate::readback;
use crate::uniforms::FilterParamsGpu;

/// Workgroup edge length, matching `@workgroup_size(8, 8, 1)`.
pub(crate) const WORKGROUP_SIZE: u32 = 8;

/// Manages the `adjust.wgsl` compute pipeline and its uniform buffer.
pub struct FilterPipeline {
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    params_buffer: wgpu::Buffer,
}

impl FilterPipeline {
    /// Compile `adjust.wgsl` and build the pipeline.
    ///
    /// Compilation and linking run inside a validation error scope. A failure
    /// is returned with the compiler's diagnostic text.
    pub fn new(device: &wgpu::Device) -> Result<Self, GpuError> {
        Self::from_source(device, include_str!("../shaders/adjust.wgsl"))
    }

    /// Build the pipeline from WGSL source. The entry point must be `adjust`
    /// and the bindings must match [`FilterPipeline::new`].
    pub fn from_source(device: &wgpu::Device, source: &str) -> Result<Self, GpuError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tinta_adjust_shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tinta_adjust_layout"),
            entries: &[
                // binding 0: source pixels
                storage_entry(0, true),
                // binding 1: output pixels
                storage_entry(1, false),
                // binding 2: params uniform
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<FilterParamsGpu>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tinta_adjust_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("tinta_adjust_pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("adjust"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            tracing::error!("adjustment shader failed to build");
            return Err(GpuError::ShaderCompilation(err.to_string()));
        }

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tinta_adjust_params_uniform"),
            size: std::mem::size_of::<FilterParamsGpu>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            pipeline,
            bind_group_layout,
            params_buffer,
        })
    }

    /// Record the adjustment pass onto `encoder`.
    ///
    /// `output` must have the source's dimensions. The caller submits the
    /// encoder.
    pub fn dispatch(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        params: &FilterParams,
        source: &GpuImageHandle,
        output: &GpuImageHandle,
        encoder: &mut wgpu::CommandEncoder,
    ) {
        debug_assert_eq!((source.width, source.height), (output.width, output.height));

        let gpu_params = FilterParamsGpu::from_params(params, source.width, source.height);
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&gpu_params));

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tinta_adjust_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: source.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.params_buffer.as_entire_binding(),
                },
            ],
        });

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("tinta_adjust_pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(
                source.width.div_ceil(WORKGROUP_SIZE),
                source.height.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }
    }
}

/// Upload, adjust and download in one call.
///
/// Keeps the output and staging buffers between frames so repeated renders
/// of the same size only re-upload the parameters.
pub struct GpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: FilterPipeline,
    output: Option<GpuImageHandle>,
    staging: Option<wgpu::Buffer>,
}

impl GpuRenderer {
    /// Build a renderer on an existing device and queue.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Result<Self, GpuError> {
        let pipeline = FilterPipeline::new(&device)?;
        Ok(Self {
            device,
            queue,
            pipeline,
            output: None,
            staging: None,
        })
    }

    /// Acquire a device and build a renderer on it. Blocks.
    pub fn create_blocking() -> Result<Self, GpuError> {
        let GpuContext { device, queue, .. } = GpuContext::create_blocking()?;
        let renderer = Self::new(device, queue)?;
        tracing::info!("GPU adjustment pipeline initialized");
        Ok(renderer)
    }

    /// Upload a source image once for repeated [`render_uploaded`](Self::render_uploaded) calls.
    pub fn upload(&self, image: &ImageBuffer) -> Result<GpuImageHandle, GpuError> {
        device_scoped(&self.device, || GpuImageHandle::upload(&self.device, image))?
    }

    /// Render `source` with `params`. Output is unclamped.
    pub fn render(
        &mut self,
        source: &ImageBuffer,
        params: &FilterParams,
    ) -> Result<ImageBuffer, GpuError> {
        if source.is_empty() {
            return Ok(ImageBuffer::filled(source.width(), source.height(), [0.0; 4]));
        }
        let handle = self.upload(source)?;
        self.render_uploaded(&handle, params)
    }

    /// Render an already uploaded source with `params`.
    pub fn render_uploaded(
        &mut self,
        source: &GpuImageHandle,
        params: &FilterParams,
    ) -> Result<ImageBuffer, GpuError> {
        let start = Instant::now();

        let needs_realloc = match &self.output {
            Some(out) => out.width != source.width || out.height != source.height,
            None => true,
        };
        if needs_realloc {
            self.output = None;
        }
        let scoped = device_scoped(&self.device, || {
            let output: &GpuImageHandle = self.output.get_or_insert_with(|| {
                GpuImageHandle::create_output(&self.device, source.width, source.height)
            });

            let mut encoder = self
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("tinta_adjust_encoder"),
                });
            self.pipeline.dispatch(
                &self.device,
                &self.queue,
                params,
                source,
                output,
                &mut encoder,
            );
            self.queue.submit(std::iter::once(encoder.finish()));

            readback::download_image(&self.device, &self.queue, output, &mut self.staging)
        });
        let image = match scoped {
            Ok(image) => image?,
            Err(e) => {
                // Buffers created inside a failed scope may be invalid.
                self.output = None;
                self.staging = None;
                return Err(e);
            }
        };

        tracing::debug!(
            "gpu rendered {}x{} ({} KiB) in {:.2}ms",
            source.width,
            source.height,
            source.pixel_count() * BYTES_PER_PIXEL / 1024,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(image)
    }
}

// ── Layout helpers ──────────────────────────────────────────────────

/// Run `f` inside validation and out-of-memory error scopes. A captured error
/// is returned instead of reaching the device's uncaptured-error handler.
fn device_scoped<T>(device: &wgpu::Device, f: impl FnOnce() -> T) -> Result<T, GpuError> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    let validation = pollster::block_on(device.pop_error_scope());
    let out_of_memory = pollster::block_on(device.pop_error_scope());
    match validation.or(out_of_memory) {
        Some(err) => {
            tracing::error!("GPU error during adjustment: {err}");
            Err(GpuError::Validation(err.to_string()))
        }
        None => Ok(value),
    }
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(BYTES_PER_PIXEL),
        },
        count: None,
    }
}
