use std::io::{Cursor, Write};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use tracing::debug;

use crate::image_pipeline::common::error::{FusionError, Result};
use crate::image_pipeline::writer::raster_writer::RasterWriter;
use crate::image_pipeline::writer::types::{FusionConfig, OutputFormat};

pub struct StandardRasterWriter;

impl RasterWriter for StandardRasterWriter {
    fn write_raster(
        &self,
        image: &RgbImage,
        format: OutputFormat,
        output: &mut dyn Write,
        config: &FusionConfig,
    ) -> Result<()> {
        debug!("Encoding {:?} image: {}x{}", format, image.width(), image.height());

        let mut buffer = Vec::new();

        match format {
            OutputFormat::Png => {
                PngEncoder::new(Cursor::new(&mut buffer))
                    .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgb8)
                    .map_err(|e| FusionError::Encode(e.to_string()))?;
            }
            OutputFormat::Jpeg => {
                let quality = config.jpeg_quality.clamp(1, 100);
                JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality)
                    .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgb8)
                    .map_err(|e| FusionError::Encode(e.to_string()))?;
            }
        }

        output.write_all(&buffer)?;

        debug!("Encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
