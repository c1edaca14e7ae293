//! Common utilities module
//!
//! This module contains the error type shared by every stage of the fusion pipeline.

pub mod error;

pub use error::{FusionError, Result};
