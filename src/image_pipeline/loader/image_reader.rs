//! Raster reader backed by the `image` crate.
//!
//! Decoders in the `image` crate always hand back pixels in RGB(A) order, so
//! no channel reordering is needed after decode. Format detection is done from
//! the file's magic bytes, the extension only decides whether alpha survives.

use tracing::debug;

use crate::image_pipeline::common::error::{FusionError, Result};
use crate::image_pipeline::loader::reader::RasterReader;
use crate::image_pipeline::raster::types::Raster;

/// Decodes PNG and JPEG input via [`image::load_from_memory`].
pub struct ImageCrateReader;

impl RasterReader for ImageCrateReader {
    fn read_raster(&self, data: &[u8], keep_alpha: bool) -> Result<Raster> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| FusionError::Decode(e.to_string()))?;

        let color = decoded.color();
        debug!(
            "Decoded image: {}x{} ({:?})",
            decoded.width(),
            decoded.height(),
            color
        );

        // Wider sample types (16-bit PNG) are narrowed to 8 bits here too.
        let raster = if keep_alpha && color.has_alpha() {
            Raster::Rgba(decoded.to_rgba8())
        } else {
            Raster::Rgb(decoded.to_rgb8())
        };

        Ok(raster)
    }
}
