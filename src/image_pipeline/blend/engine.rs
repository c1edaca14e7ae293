use image::{Rgb, RgbImage};
use tracing::debug;

use crate::image_pipeline::blend::types::BlendMode;
use crate::image_pipeline::common::error::{FusionError, Result};
use crate::image_pipeline::raster::types::Raster;

/// Composites `overlay` onto `base` with the given blend mode.
///
/// Channel values are normalised to `0.0..=1.0`, blended per channel and mixed
/// back as `base * (1 - strength) + blended * strength`. For an RGB overlay
/// `strength` is `opacity` everywhere; for RGBA it is `alpha / 255 * opacity`
/// per pixel. The alpha channel is consumed and the result is always RGB.
///
/// Both rasters must have identical dimensions, otherwise
/// [`FusionError::ShapeMismatch`] is returned.
pub fn blend(base: &RgbImage, overlay: &Raster, mode: BlendMode, opacity: f32) -> Result<RgbImage> {
    if base.dimensions() != overlay.dimensions() {
        return Err(FusionError::ShapeMismatch {
            base: base.dimensions(),
            overlay: overlay.dimensions(),
        });
    }
    if !(0.0..=1.0).contains(&opacity) {
        return Err(FusionError::Parameter(format!(
            "opacity must be within 0.0..=1.0, got {}",
            opacity
        )));
    }

    let (width, height) = base.dimensions();
    debug!(
        "Blending {}x{} ({} channel overlay) with mode={}, opacity={}",
        width,
        height,
        overlay.channels(),
        mode,
        opacity
    );

    let mut output = RgbImage::new(width, height);
    match overlay {
        Raster::Rgb(print) => {
            for ((out, fabric), print) in output.pixels_mut().zip(base.pixels()).zip(print.pixels()) {
                *out = composite_pixel(fabric, [print[0], print[1], print[2]], mode, opacity);
            }
        }
        Raster::Rgba(print) => {
            for ((out, fabric), print) in output.pixels_mut().zip(base.pixels()).zip(print.pixels()) {
                let strength = f32::from(print[3]) / 255.0 * opacity;
                *out = composite_pixel(fabric, [print[0], print[1], print[2]], mode, strength);
            }
        }
    }

    Ok(output)
}

#[inline]
fn composite_pixel(fabric: &Rgb<u8>, print: [u8; 3], mode: BlendMode, strength: f32) -> Rgb<u8> {
    let mut out = [0u8; 3];
    for (c, value) in out.iter_mut().enumerate() {
        let base = normalize(fabric[c]);
        let blended = mode.apply(base, normalize(print[c]));
        *value = denormalize(base * (1.0 - strength) + blended * strength);
    }
    Rgb(out)
}

#[inline]
fn normalize(value: u8) -> f32 {
    f32::from(value) / 255.0
}

#[inline]
fn denormalize(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
