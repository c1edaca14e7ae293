use image::{ImageBuffer, Pixel};
use tracing::debug;

use crate::image_pipeline::common::error::{FusionError, Result};
use crate::image_pipeline::raster::types::Raster;

/// Repeats `print` on a regular grid from the top-left origin and crops the
/// result to exactly `width`x`height`.
///
/// Seams are hard: the output pixel at `(x, y)` is the print pixel at
/// `(x mod pw, y mod ph)`. A print larger than the canvas degenerates to a
/// single top-left crop.
pub fn tile(print: &Raster, width: u32, height: u32) -> Result<Raster> {
    let (pw, ph) = print.dimensions();
    if pw == 0 || ph == 0 {
        return Err(FusionError::Parameter(format!(
            "cannot tile an empty {}x{} print",
            pw, ph
        )));
    }
    if width == 0 || height == 0 {
        return Err(FusionError::Parameter(format!(
            "cannot tile onto an empty {}x{} canvas",
            width, height
        )));
    }

    debug!(
        "Tiling {}x{} print as {}x{} grid over {}x{} canvas",
        pw,
        ph,
        width.div_ceil(pw),
        height.div_ceil(ph),
        width,
        height
    );

    let tiled = match print {
        Raster::Rgb(img) => Raster::Rgb(repeat(img, width, height)),
        Raster::Rgba(img) => Raster::Rgba(repeat(img, width, height)),
    };
    Ok(tiled)
}

fn repeat<P>(img: &ImageBuffer<P, Vec<u8>>, width: u32, height: u32) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let (pw, ph) = img.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| *img.get_pixel(x % pw, y % ph))
}
