//! Image loading module
//!
//! This module decodes PNG and JPEG files into [`Raster`](crate::image_pipeline::Raster)s.

mod reader;
mod image_reader;

pub use reader::{RasterReader, is_png_path};
pub use image_reader::ImageCrateReader;
