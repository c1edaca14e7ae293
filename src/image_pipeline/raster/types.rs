//! In-memory raster types

use image::{DynamicImage, RgbImage, RgbaImage};

/// Decoded 8-bit raster, either opaque RGB or RGBA with per-pixel alpha.
///
/// The channel layout is fixed when the raster is created. The only way to
/// change it is an explicit conversion such as [`Raster::into_rgb`].
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    /// Three interleaved channels [R, G, B, R, G, B, ...]
    Rgb(RgbImage),
    /// Four interleaved channels [R, G, B, A, ...], alpha in 0..=255
    Rgba(RgbaImage),
}

impl Raster {
    pub fn width(&self) -> u32 {
        match self {
            Raster::Rgb(img) => img.width(),
            Raster::Rgba(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Raster::Rgb(img) => img.height(),
            Raster::Rgba(img) => img.height(),
        }
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn channels(&self) -> usize {
        match self {
            Raster::Rgb(_) => 3,
            Raster::Rgba(_) => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, Raster::Rgba(_))
    }

    /// Drops the alpha channel, if any.
    pub fn into_rgb(self) -> RgbImage {
        match self {
            Raster::Rgb(img) => img,
            Raster::Rgba(img) => DynamicImage::ImageRgba8(img).to_rgb8(),
        }
    }
}

impl From<RgbImage> for Raster {
    fn from(img: RgbImage) -> Self {
        Raster::Rgb(img)
    }
}

impl From<RgbaImage> for Raster {
    fn from(img: RgbaImage) -> Self {
        Raster::Rgba(img)
    }
}
