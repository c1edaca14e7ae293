//! Output configuration types

use std::path::Path;

use crate::image_pipeline::common::error::{FusionError, Result};

/// Encoded file format of a fusion result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless, pixels round-trip exactly
    Png,
    /// Lossy, quality taken from [`FusionConfig::jpeg_quality`]
    Jpeg,
}

impl OutputFormat {
    /// Picks the format from the path's extension (`png`, `jpg`, `jpeg`, any case).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(OutputFormat::Jpeg),
            _ => Err(FusionError::Encode(format!(
                "unsupported output extension: {}",
                path.display()
            ))),
        }
    }
}

/// Configuration for loading, validating and saving rasters
#[derive(Debug, Clone)]
pub struct FusionConfig {
    /// JPEG quality, 1 (smallest) to 100 (best)
    pub jpeg_quality: u8,
    /// Whether to reject loaded rasters with unusable dimensions
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<u32>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            validate_dimensions: true,
            max_dimension: Some(50_000),
        }
    }
}

impl FusionConfig {
    pub fn builder() -> FusionConfigBuilder {
        FusionConfigBuilder::default()
    }
}

/// Builder for FusionConfig
#[derive(Default)]
pub struct FusionConfigBuilder {
    jpeg_quality: Option<u8>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
}

impl FusionConfigBuilder {
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> FusionConfig {
        let default = FusionConfig::default();
        FusionConfig {
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
