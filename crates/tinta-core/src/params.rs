//! The parameter snapshot that drives one rendered frame.
//!
//! `FilterParams` is the single source of truth for an adjustment. Every
//! slider writes here; the CPU driver and the GPU uniform both read the
//! full struct. A render takes it by value, so a frame never observes a
//! half-updated record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifies one of the five adjustment parameters, in slider order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamId {
    Brightness,
    Contrast,
    Saturation,
    Temperature,
    Sharpness,
}

impl ParamId {
    /// Lowercase name used in parameter files and on the command line.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Temperature => "temperature",
            Self::Sharpness => "sharpness",
        }
    }

    /// All parameters in the order the sliders are laid out.
    pub fn all() -> &'static [Self] {
        const ALL: [ParamId; 5] = [
            ParamId::Brightness,
            ParamId::Contrast,
            ParamId::Saturation,
            ParamId::Temperature,
            ParamId::Sharpness,
        ];
        &ALL
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ParamId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|id| id.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownParameter(s.to_string()))
    }
}

/// Slider range shared by every parameter.
///
/// Only an input surface snaps to this range. The pipeline accepts any value
/// and lets the formulas extrapolate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}

impl ParamRange {
    /// The `[-1, 1]` range in `0.01` steps, centered on the identity.
    pub const SLIDER: Self = Self {
        min: -1.0,
        max: 1.0,
        step: 0.01,
        default: 0.0,
    };

    /// Clamp `value` into the range and round it to the nearest step.
    pub fn snap(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    /// Whether `value` lies inside `[min, max]`.
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// The five scalars consumed by one frame. All zero is the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterParams {
    /// Uniform additive offset on R, G and B.
    pub brightness: f32,
    /// Scale around mid-gray. `-1` flattens to 0.5, `0` is neutral.
    pub contrast: f32,
    /// Mix away from the channel mean. `-1` is grayscale, `0` is neutral.
    pub saturation: f32,
    /// Positive warms (adds red, removes blue), negative cools.
    pub temperature: f32,
    /// Unsharp-mask strength. `0` disables the blur term entirely.
    pub sharpness: f32,
}

impl FilterParams {
    /// Current value of one parameter.
    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::Brightness => self.brightness,
            ParamId::Contrast => self.contrast,
            ParamId::Saturation => self.saturation,
            ParamId::Temperature => self.temperature,
            ParamId::Sharpness => self.sharpness,
        }
    }

    /// Overwrite one parameter. Values are stored as given.
    pub fn set(&mut self, id: ParamId, value: f32) {
        let slot = match id {
            ParamId::Brightness => &mut self.brightness,
            ParamId::Contrast => &mut self.contrast,
            ParamId::Saturation => &mut self.saturation,
            ParamId::Temperature => &mut self.temperature,
            ParamId::Sharpness => &mut self.sharpness,
        };
        *slot = value;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, id: ParamId, value: f32) -> Self {
        self.set(id, value);
        self
    }

    /// True when every parameter is exactly zero.
    pub fn is_identity(&self) -> bool {
        ParamId::all().iter().all(|&id| self.get(id) == 0.0)
    }

    /// Parameters whose value lies outside [`ParamRange::SLIDER`].
    pub fn out_of_range(&self) -> Vec<ParamId> {
        ParamId::all()
            .iter()
            .copied()
            .filter(|&id| !ParamRange::SLIDER.contains(self.get(id)))
            .collect()
    }
}
