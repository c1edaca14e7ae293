//! Fabric print fusion pipeline
//!
//! This module composites a repeating print onto a fabric image, with separate
//! modules for loading, print transformation, blending, writing and orchestration.

pub mod raster;
pub mod loader;
pub mod transform;
pub mod blend;
pub mod writer;
pub mod fusion;
pub mod common;

pub use common::{
    FusionError,
    Result,
};

pub use raster::Raster;

pub use loader::{
    RasterReader,
    ImageCrateReader,
};

pub use blend::{
    BlendMode,
    BlendParameters,
    BlendParametersBuilder,
};

pub use writer::{
    FusionConfig,
    FusionConfigBuilder,
    OutputFormat,
    RasterWriter,
    StandardRasterWriter,
};

pub use fusion::{
    FabricFusionPipeline,
    FusionTimings,
    fuse,
};
