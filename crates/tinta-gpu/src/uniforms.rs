//! GPU-side layout of the parameter snapshot.

use bytemuck::{Pod, Zeroable};
use tinta_core::params::FilterParams;

/// Uniform block read by `adjust.wgsl`. Field order matches the WGSL
/// `Params` struct; 32 bytes, no implicit padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FilterParamsGpu {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub temperature: f32,
    pub sharpness: f32,
    pub width: u32,
    pub height: u32,
    pub _pad: u32,
}

impl FilterParamsGpu {
    /// Pack a parameter snapshot for an image of `width` x `height`.
    pub fn from_params(params: &FilterParams, width: u32, height: u32) -> Self {
        Self {
            brightness: params.brightness,
            contrast: params.contrast,
            saturation: params.saturation,
            temperature: params.temperature,
            sharpness: params.sharpness,
            width,
            height,
            _pad: 0,
        }
    }
}
