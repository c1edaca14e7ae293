//! Print transformation module
//!
//! Scales a print relative to the fabric and repeats it across the fabric canvas.

mod resize;
mod tile;


pub use resize::{MAX_SCALED_BYTES, resize, scaled_dimensions};
pub use tile::tile;
