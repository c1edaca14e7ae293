//! Output writing module
//!
//! This module encodes fusion results as PNG or JPEG.

mod raster_writer;
mod standard_writer;
pub mod types;

pub use raster_writer::RasterWriter;
pub use standard_writer::StandardRasterWriter;
pub use types::{FusionConfig, FusionConfigBuilder, OutputFormat};
