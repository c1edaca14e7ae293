//! Blend engine module
//!
//! Per-pixel blend-mode math and opacity/alpha compositing of a print onto fabric.

mod engine;
pub mod types;


pub use engine::blend;
pub use types::{
    BlendMode, BlendParameters, BlendParametersBuilder, OPACITY_UI_RANGE, SCALE_UI_RANGE,
};
