use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::types::Raster;

pub trait RasterReader {
    /// Decodes encoded image bytes. With `keep_alpha` set, an image carrying an
    /// alpha channel decodes to [`Raster::Rgba`]; otherwise the result is always RGB.
    fn read_raster(&self, data: &[u8], keep_alpha: bool) -> Result<Raster>;
}

/// True when the path ends in `.png`, ignoring case.
pub fn is_png_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}
