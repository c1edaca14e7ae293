use image::RgbImage;
use tracing::{debug, instrument};

use crate::image_pipeline::blend::{BlendParameters, blend};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fusion::timing::FusionTimings;
use crate::image_pipeline::raster::types::Raster;
use crate::image_pipeline::transform::{resize, tile};

/// Composites `print` onto `fabric`: scale the print relative to the fabric,
/// tile it over the fabric canvas, then blend.
///
/// Inputs are only read. The returned raster has the fabric's dimensions and
/// is always RGB.
#[instrument(
    skip(fabric, print, params),
    fields(
        fabric = ?fabric.dimensions(),
        print = ?print.dimensions(),
        mode = %params.blend_mode(),
    )
)]
pub fn fuse(fabric: &RgbImage, print: &Raster, params: &BlendParameters) -> Result<RgbImage> {
    let mut timings = FusionTimings::new();
    fuse_timed(fabric, print, params, &mut timings)
}

pub(crate) fn fuse_timed(
    fabric: &RgbImage,
    print: &Raster,
    params: &BlendParameters,
    timings: &mut FusionTimings,
) -> Result<RgbImage> {
    let (width, height) = fabric.dimensions();

    let resized = timings.measure("resize_print", || {
        let _span = tracing::info_span!("resize_print", scale = params.scale()).entered();
        resize(print, width, height, params.scale())
    })?;

    let tiled = timings.measure("tile_print", || {
        let _span = tracing::info_span!("tile_print",
            tile_width = resized.width(),
            tile_height = resized.height()
        ).entered();
        tile(&resized, width, height)
    })?;

    let fused = timings.measure("blend", || {
        let _span = tracing::info_span!("blend", opacity = params.opacity()).entered();
        blend(fabric, &tiled, params.blend_mode(), params.opacity())
    })?;

    debug!(width, height, "Fusion complete");
    Ok(fused)
}
