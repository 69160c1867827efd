//! Errors raised when constructing buffers or naming parameters.

/// Errors produced by `tinta-core`.
///
/// The filter itself cannot fail; only malformed buffers and unknown
/// parameter names are rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("pixel count {len} does not match {width}x{height}")]
    DimensionMismatch { width: u32, height: u32, len: usize },
    #[error("expected {expected} bytes of RGBA8 data, got {actual}")]
    ByteLengthMismatch { expected: usize, actual: usize },
    #[error("unknown parameter `{0}` (expected brightness, contrast, saturation, temperature or sharpness)")]
    UnknownParameter(String),
}
