use thiserror::Error;

#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Invalid fusion parameters: {0}")]
    Parameter(String),

    #[error(
        "Raster shape mismatch: base is {}x{}, overlay is {}x{}",
        base.0, base.1, overlay.0, overlay.1
    )]
    ShapeMismatch {
        base: (u32, u32),
        overlay: (u32, u32),
    },

    #[error("Failed to encode output image: {0}")]
    Encode(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FusionError>;
