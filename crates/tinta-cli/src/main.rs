//! Tinta: apply brightness, contrast, saturation, temperature and sharpness
//! to an image from the command line.

mod config;
mod image_io;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum, ValueHint};
use tinta_core::{FilterParams, ImageBuffer, ParamId, Schedule, render_with};
use tinta_gpu::{GpuError, GpuRenderer};

use crate::config::ConfigError;
use crate::image_io::ImageIoError;

/// Where the adjustment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Multi-threaded CPU frame driver.
    Cpu,
    /// wgpu compute shader. Falls back to the CPU if setup fails.
    Gpu,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Five-slider image adjustment")]
struct Cli {
    /// Source image (PNG, JPEG, TIFF, ...)
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Destination image; the format follows the extension
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// JSON file with any of the five parameters; flags override it
    #[arg(long, value_hint = ValueHint::FilePath)]
    params: Option<PathBuf>,

    /// Uniform offset added to R, G and B
    #[arg(long, allow_negative_numbers = true)]
    brightness: Option<f32>,

    /// Scale around mid-gray; -1 flattens the image
    #[arg(long, allow_negative_numbers = true)]
    contrast: Option<f32>,

    /// Distance from the channel mean; -1 is grayscale
    #[arg(long, allow_negative_numbers = true)]
    saturation: Option<f32>,

    /// Positive warms (red), negative cools (blue)
    #[arg(long, allow_negative_numbers = true)]
    temperature: Option<f32>,

    /// Unsharp-mask strength
    #[arg(long, allow_negative_numbers = true)]
    sharpness: Option<f32>,

    /// Snap every parameter to the slider range [-1, 1] in 0.01 steps
    #[arg(long)]
    snap: bool,

    /// Rendering backend
    #[arg(long, value_enum, env = "TINTA_BACKEND", default_value_t = Backend::Cpu)]
    backend: Backend,

    /// Render on a single thread (CPU backend)
    #[arg(long)]
    sequential: bool,

    /// Print the resolved parameters as JSON before rendering
    #[arg(long)]
    print_params: bool,
}

impl Cli {
    fn overrides(&self) -> [(ParamId, Option<f32>); 5] {
        [
            (ParamId::Brightness, self.brightness),
            (ParamId::Contrast, self.contrast),
            (ParamId::Saturation, self.saturation),
            (ParamId::Temperature, self.temperature),
            (ParamId::Sharpness, self.sharpness),
        ]
    }

    fn schedule(&self) -> Schedule {
        if self.sequential {
            Schedule::Sequential
        } else {
            Schedule::Parallel
        }
    }
}

/// Errors that end the program.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Image(#[from] ImageIoError),
    #[error("failed to encode parameters: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init_tracing() {
        eprintln!("warning: logging disabled: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let base = match &cli.params {
        Some(path) => config::load_params(path)?,
        None => FilterParams::default(),
    };
    let params = config::resolve_params(base, &cli.overrides(), cli.snap);
    if cli.print_params {
        println!("{}", serde_json::to_string_pretty(&params)?);
    }

    let source = image_io::load_image(&cli.input)?;

    let start = Instant::now();
    let output = render_on(cli.backend, &source, &params, cli.schedule());
    tracing::info!(
        "adjusted {}x{} in {:.2}ms",
        output.width(),
        output.height(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    image_io::save_image(&cli.output, &output)?;
    Ok(())
}

/// Render with the requested backend. A GPU that cannot be set up is reported
/// once and the CPU driver is used instead.
fn render_on(
    backend: Backend,
    source: &ImageBuffer,
    params: &FilterParams,
    schedule: Schedule,
) -> ImageBuffer {
    if backend == Backend::Gpu {
        match render_gpu(source, params) {
            Ok(image) => return image,
            Err(e) => {
                tracing::error!("GPU rendering unavailable: {e}");
                tracing::warn!("falling back to the CPU renderer");
            }
        }
    }
    render_with(source, params, schedule)
}

fn render_gpu(source: &ImageBuffer, params: &FilterParams) -> Result<ImageBuffer, GpuError> {
    let mut renderer = GpuRenderer::create_blocking()?;
    renderer.render(source, params)
}
