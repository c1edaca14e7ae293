use image::imageops::{self, FilterType};
use image::{ImageBuffer, Pixel};
use tracing::debug;

use crate::image_pipeline::common::error::{FusionError, Result};
use crate::image_pipeline::raster::types::Raster;

/// Bilinear resampling.
const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// Largest scaled print buffer, counted as RGBA bytes (4 GiB).
pub const MAX_SCALED_BYTES: u64 = 1 << 32;

/// Computes `(round(target_width * scale), round(target_height * scale))`.
///
/// Fails with [`FusionError::Parameter`] when `scale` is not a positive finite
/// number, either side rounds down to zero, or the scaled print would exceed
/// [`MAX_SCALED_BYTES`].
pub fn scaled_dimensions(target_width: u32, target_height: u32, scale: f32) -> Result<(u32, u32)> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(FusionError::Parameter(format!(
            "scale must be a positive number, got {}",
            scale
        )));
    }

    let width = (f64::from(target_width) * f64::from(scale)).round();
    let height = (f64::from(target_height) * f64::from(scale)).round();

    if width < 1.0 || height < 1.0 {
        return Err(FusionError::Parameter(format!(
            "scale {} reduces {}x{} to an empty {}x{} print",
            scale, target_width, target_height, width, height
        )));
    }
    if width > f64::from(u32::MAX) || height > f64::from(u32::MAX) {
        return Err(FusionError::Parameter(format!(
            "scale {} overflows the print size for {}x{}",
            scale, target_width, target_height
        )));
    }

    let (width, height) = (width as u32, height as u32);
    let bytes = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_mul(4));
    match bytes {
        Some(bytes) if bytes <= MAX_SCALED_BYTES => Ok((width, height)),
        _ => Err(FusionError::Parameter(format!(
            "scale {} makes a {}x{} print, larger than {} bytes",
            scale, width, height, MAX_SCALED_BYTES
        ))),
    }
}

/// Resamples `print` to `target * scale`, keeping its channel layout.
pub fn resize(print: &Raster, target_width: u32, target_height: u32, scale: f32) -> Result<Raster> {
    if print.width() == 0 || print.height() == 0 {
        return Err(FusionError::Parameter(format!(
            "cannot resize an empty {}x{} print",
            print.width(),
            print.height()
        )));
    }

    let (width, height) = scaled_dimensions(target_width, target_height, scale)?;
    debug!(
        "Resizing print {}x{} -> {}x{} (scale {})",
        print.width(),
        print.height(),
        width,
        height,
        scale
    );

    let resized = match print {
        Raster::Rgb(img) => Raster::Rgb(resample(img, width, height)),
        Raster::Rgba(img) => Raster::Rgba(resample(img, width, height)),
    };
    Ok(resized)
}

fn resample<P>(img: &ImageBuffer<P, Vec<u8>>, width: u32, height: u32) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width, height, RESIZE_FILTER)
}
