//! Blend configuration types

use std::convert::Infallible;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use tracing::warn;

use crate::image_pipeline::common::error::{FusionError, Result};

/// Opacity range offered by interactive front ends. The core accepts `0.0..=1.0`.
pub const OPACITY_UI_RANGE: RangeInclusive<f32> = 0.1..=1.0;

/// Print scale range offered by interactive front ends. The core accepts any positive scale.
pub const SCALE_UI_RANGE: RangeInclusive<f32> = 0.2..=2.0;

/// Per-channel blend formula applied between fabric and print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Multiply below mid-grey, screen above it (keyed on the fabric value)
    #[default]
    Overlay,
    /// `base * print`, darkens
    Multiply,
    /// `1 - (1 - base) * (1 - print)`, lightens
    Screen,
}

impl BlendMode {
    pub const ALL: [BlendMode; 3] = [BlendMode::Overlay, BlendMode::Multiply, BlendMode::Screen];

    /// Looks a mode up by name, ignoring case and surrounding whitespace.
    ///
    /// Unrecognised names resolve to [`BlendMode::Overlay`] rather than failing,
    /// so a front end can pass its selection through without validating it.
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        match BlendMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(trimmed))
        {
            Some(mode) => mode,
            None => {
                warn!("Unknown blend mode {:?}, falling back to overlay", name);
                BlendMode::Overlay
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlendMode::Overlay => "overlay",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
        }
    }

    /// Blends one normalised channel value of the fabric with the print.
    #[inline]
    pub fn apply(&self, base: f32, print: f32) -> f32 {
        match self {
            BlendMode::Multiply => base * print,
            BlendMode::Screen => 1.0 - (1.0 - base) * (1.0 - print),
            BlendMode::Overlay => {
                if base < 0.5 {
                    2.0 * base * print
                } else {
                    1.0 - 2.0 * (1.0 - base) * (1.0 - print)
                }
            }
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(BlendMode::from_name(s))
    }
}

/// Parameters of a single fusion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendParameters {
    blend_mode: BlendMode,
    opacity: f32,
    scale: f32,
}

impl Default for BlendParameters {
    fn default() -> Self {
        Self {
            blend_mode: BlendMode::Overlay,
            opacity: 0.7,
            scale: 1.0,
        }
    }
}

impl BlendParameters {
    /// Fails with [`FusionError::Parameter`] unless `opacity` lies in `0.0..=1.0`
    /// and `scale` is positive and finite.
    pub fn new(blend_mode: BlendMode, opacity: f32, scale: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(FusionError::Parameter(format!(
                "opacity must be within 0.0..=1.0, got {}",
                opacity
            )));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(FusionError::Parameter(format!(
                "scale must be a positive number, got {}",
                scale
            )));
        }

        Ok(Self {
            blend_mode,
            opacity,
            scale,
        })
    }

    pub fn builder() -> BlendParametersBuilder {
        BlendParametersBuilder::default()
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether opacity and scale sit inside the ranges interactive front ends expose.
    pub fn within_ui_bounds(&self) -> bool {
        OPACITY_UI_RANGE.contains(&self.opacity) && SCALE_UI_RANGE.contains(&self.scale)
    }
}

/// Builder for BlendParameters
#[derive(Default)]
pub struct BlendParametersBuilder {
    blend_mode: Option<BlendMode>,
    opacity: Option<f32>,
    scale: Option<f32>,
}

impl BlendParametersBuilder {
    pub fn blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = Some(mode);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn build(self) -> Result<BlendParameters> {
        let default = BlendParameters::default();
        BlendParameters::new(
            self.blend_mode.unwrap_or(default.blend_mode),
            self.opacity.unwrap_or(default.opacity),
            self.scale.unwrap_or(default.scale),
        )
    }
}
