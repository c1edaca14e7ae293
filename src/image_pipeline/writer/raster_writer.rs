use std::io::Write;

use image::RgbImage;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::writer::types::{FusionConfig, OutputFormat};

pub trait RasterWriter {
    fn write_raster(
        &self,
        image: &RgbImage,
        format: OutputFormat,
        output: &mut dyn Write,
        config: &FusionConfig,
    ) -> Result<()>;
}
