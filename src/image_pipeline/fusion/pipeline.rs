use std::path::Path;

use image::RgbImage;
use tracing::{info, instrument, warn};

use crate::image_pipeline::{
    blend::BlendParameters,
    common::error::{FusionError, Result},
    fusion::orchestrator::{fuse, fuse_timed},
    fusion::timing::FusionTimings,
    loader::{ImageCrateReader, RasterReader, is_png_path},
    raster::Raster,
    writer::{FusionConfig, OutputFormat, RasterWriter, StandardRasterWriter},
};

/// Loads fabric and print files, fuses them and writes the result.
///
/// The fusion itself is stateless: [`fuse`](Self::fuse) only reads its inputs
/// and returns a new raster, so a failed [`save`](Self::save) can be retried
/// with the same result.
pub struct FabricFusionPipeline<R: RasterReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: FusionConfig,
}

impl FabricFusionPipeline<ImageCrateReader, StandardRasterWriter> {
    pub fn new(config: FusionConfig) -> Self {
        Self {
            reader: ImageCrateReader,
            writer: StandardRasterWriter,
            config,
        }
    }
}

impl<R: RasterReader, W: RasterWriter> FabricFusionPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: FusionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(FusionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(FusionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    fn read_file(&self, path: &Path, keep_alpha: bool) -> Result<Raster> {
        let data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(path)
                .map_err(|e| FusionError::Decode(format!("{}: {}", path.display(), e)))?
        };

        let raster = {
            let _span = tracing::info_span!("decode", keep_alpha).entered();
            self.reader
                .read_raster(&data, keep_alpha)
                .map_err(|e| match e {
                    FusionError::Decode(msg) => {
                        FusionError::Decode(format!("{}: {}", path.display(), msg))
                    }
                    other => other,
                })?
        };

        self.validate_dimensions(raster.width(), raster.height())?;
        Ok(raster)
    }

    /// Loads a print. PNG files keep their alpha channel, anything else decodes as RGB.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Raster> {
        let path = path.as_ref();
        let raster = self.read_file(path, is_png_path(path))?;
        info!(
            width = raster.width(),
            height = raster.height(),
            channels = raster.channels(),
            "Loaded image"
        );
        Ok(raster)
    }

    /// Loads a fabric. Fabric is always opaque, any alpha in the file is dropped.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_fabric<P: AsRef<Path>>(&self, path: P) -> Result<RgbImage> {
        let fabric = self.read_file(path.as_ref(), false)?.into_rgb();
        info!(width = fabric.width(), height = fabric.height(), "Loaded fabric");
        Ok(fabric)
    }

    pub fn fuse(&self, fabric: &RgbImage, print: &Raster, params: &BlendParameters) -> Result<RgbImage> {
        fuse(fabric, print, params)
    }

    #[instrument(skip(self, fabric, print, params))]
    pub fn fuse_with_timings(
        &self,
        fabric: &RgbImage,
        print: &Raster,
        params: &BlendParameters,
    ) -> Result<(RgbImage, FusionTimings)> {
        let mut timings = FusionTimings::new();
        let fused = fuse_timed(fabric, print, params, &mut timings)?;

        info!(
            "Fusion complete: {}x{} in {:.3}ms",
            fused.width(),
            fused.height(),
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok((fused, timings))
    }

    /// Encodes `image` in the format implied by the path's extension and writes it.
    ///
    /// Encoding happens in memory before the file is created, so an encoder
    /// failure leaves any existing file at `path` untouched.
    #[instrument(skip(self, image, path), fields(path = %path.as_ref().display()))]
    pub fn save<P: AsRef<Path>>(&self, image: &RgbImage, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = OutputFormat::from_path(path)?;

        let mut buffer = Vec::new();
        {
            let _span = tracing::info_span!("encode", format = ?format).entered();
            self.writer.write_raster(image, format, &mut buffer, &self.config)?;
        }

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(path, &buffer)
                .map_err(|e| FusionError::Encode(format!("{}: {}", path.display(), e)))?;
        }

        info!(bytes = buffer.len(), "Saved fusion result");
        Ok(())
    }

    /// Loads both inputs, fuses them and saves the result, which is also returned.
    #[instrument(skip_all)]
    pub fn fuse_files<P, Q, O>(
        &self,
        fabric_path: P,
        print_path: Q,
        output_path: O,
        params: &BlendParameters,
    ) -> Result<RgbImage>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        O: AsRef<Path>,
    {
        info!(
            fabric = %fabric_path.as_ref().display(),
            print = %print_path.as_ref().display(),
            output = %output_path.as_ref().display(),
            "Fusing files"
        );

        let fabric = self.load_fabric(fabric_path)?;
        let print = self.load(print_path)?;
        let fused = self.fuse(&fabric, &print, params)?;
        self.save(&fused, output_path)?;

        Ok(fused)
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FusionConfig) {
        self.config = config;
    }
}
