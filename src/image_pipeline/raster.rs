//! Raster module
//!
//! The in-memory pixel representation passed between pipeline stages.

pub mod types;

pub use types::Raster;
