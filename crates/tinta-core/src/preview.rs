//! On-demand re-rendering for interactive front ends.
//!
//! A [`Preview`] owns the current source image and parameter snapshot and
//! re-renders only when one of them changed. Every change bumps a generation
//! counter; a frame rendered from an older generation is dropped when it
//! comes back, so a slow render is simply superseded by the next request.

use std::sync::Arc;

use crate::filter::render::{Schedule, render_with};
use crate::image::ImageBuffer;
use crate::params::{FilterParams, ParamId};

/// A self-contained render request that can run on any thread.
#[derive(Debug, Clone)]
pub struct RenderJob {
    source: Arc<ImageBuffer>,
    params: FilterParams,
    schedule: Schedule,
    generation: u64,
}

impl RenderJob {
    /// Generation this job was requested at. Pass it back to
    /// [`Preview::complete`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The parameter snapshot this job renders with.
    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Run the render. Pure: the same job always yields the same frame.
    pub fn run(&self) -> ImageBuffer {
        render_with(&self.source, &self.params, self.schedule)
    }
}

/// Source, parameters and the most recent frame of an interactive session.
#[derive(Debug, Default)]
pub struct Preview {
    source: Option<Arc<ImageBuffer>>,
    params: FilterParams,
    schedule: Schedule,
    generation: u64,
    frame: Option<(u64, Arc<ImageBuffer>)>,
}

impl Preview {
    /// An empty session with identity parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `schedule` for renders started from this session.
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Replace the source image. Always invalidates the current frame.
    pub fn set_image(&mut self, image: impl Into<Arc<ImageBuffer>>) {
        let image = image.into();
        tracing::debug!("preview source set to {}x{}", image.width, image.height);
        self.source = Some(image);
        self.generation += 1;
    }

    /// Replace the parameter snapshot. Returns `false` (and keeps the current
    /// frame) when nothing changed.
    pub fn set_params(&mut self, params: FilterParams) -> bool {
        if self.params == params {
            return false;
        }
        self.params = params;
        self.generation += 1;
        true
    }

    /// Change a single parameter, as a slider would.
    pub fn set_param(&mut self, id: ParamId, value: f32) -> bool {
        self.set_params(self.params.with(id, value))
    }

    /// Current parameter snapshot.
    pub fn params(&self) -> FilterParams {
        self.params
    }

    /// Current source image, if one was set.
    pub fn source(&self) -> Option<&Arc<ImageBuffer>> {
        self.source.as_ref()
    }

    /// Monotonic change counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a source exists and the cached frame does not reflect it.
    pub fn is_stale(&self) -> bool {
        self.source.is_some()
            && self
                .frame
                .as_ref()
                .is_none_or(|(generation, _)| *generation != self.generation)
    }

    /// Snapshot the current state into a job. `None` until an image is set.
    pub fn request(&self) -> Option<RenderJob> {
        let source = self.source.clone()?;
        Some(RenderJob {
            source,
            params: self.params,
            schedule: self.schedule,
            generation: self.generation,
        })
    }

    /// Hand back a finished frame. It is kept only if no change happened
    /// since its job was requested.
    pub fn complete(&mut self, generation: u64, frame: ImageBuffer) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "dropping superseded frame (generation {generation}, current {})",
                self.generation
            );
            return false;
        }
        self.frame = Some((generation, Arc::new(frame)));
        true
    }

    /// The up-to-date frame, rendering synchronously if it is stale.
    pub fn frame(&mut self) -> Option<Arc<ImageBuffer>> {
        if self.is_stale() {
            let job = self.request()?;
            let frame = job.run();
            self.complete(job.generation(), frame);
        }
        self.latest().cloned()
    }

    /// The most recent frame without rendering. May be stale.
    pub fn latest(&self) -> Option<&Arc<ImageBuffer>> {
        self.frame.as_ref().map(|(_, frame)| frame)
    }
}
