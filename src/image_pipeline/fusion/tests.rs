#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    use crate::image_pipeline::blend::{BlendMode, BlendParameters};
    use crate::image_pipeline::common::error::{FusionError, Result};
    use crate::image_pipeline::fusion::{FabricFusionPipeline, fuse};
    use crate::image_pipeline::loader::RasterReader;
    use crate::image_pipeline::raster::types::Raster;
    use crate::image_pipeline::writer::{FusionConfig, OutputFormat, RasterWriter};

    struct MockReader {
        should_fail: bool,
        mock_data: Option<Raster>,
        alpha_requests: Arc<Mutex<Vec<bool>>>,
    }

    impl MockReader {
        fn new(mock_data: Option<Raster>) -> Self {
            Self {
                should_fail: false,
                mock_data,
                alpha_requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl RasterReader for MockReader {
        fn read_raster(&self, _data: &[u8], keep_alpha: bool) -> Result<Raster> {
            self.alpha_requests.lock().unwrap().push(keep_alpha);
            if self.should_fail {
                return Err(FusionError::Decode("Mock decode error".to_string()));
            }
            let raster = self
                .mock_data
                .clone()
                .unwrap_or_else(|| Raster::Rgba(RgbaImage::from_pixel(20, 20, Rgba([9, 9, 9, 128]))));
            Ok(match raster {
                Raster::Rgba(img) if !keep_alpha => Raster::Rgb(Raster::Rgba(img).into_rgb()),
                other => other,
            })
        }
    }

    struct MockWriter {
        should_fail: bool,
        written: Arc<Mutex<Vec<(OutputFormat, u32, u32)>>>,
    }

    impl RasterWriter for MockWriter {
        fn write_raster(
            &self,
            image: &RgbImage,
            format: OutputFormat,
            output: &mut dyn Write,
            _config: &FusionConfig,
        ) -> Result<()> {
            if self.should_fail {
                return Err(FusionError::Encode("Mock encode error".to_string()));
            }
            output.write_all(b"mock")?;
            self.written
                .lock()
                .unwrap()
                .push((format, image.width(), image.height()));
            Ok(())
        }
    }

    fn mock_writer(should_fail: bool) -> (MockWriter, Arc<Mutex<Vec<(OutputFormat, u32, u32)>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        (
            MockWriter {
                should_fail,
                written: written.clone(),
            },
            written,
        )
    }

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"not really an image").unwrap();
        path
    }

    fn solid(width: u32, height: u32, value: u8) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([value, value, value]))
    }

    fn params(mode: BlendMode, opacity: f32, scale: f32) -> BlendParameters {
        BlendParameters::new(mode, opacity, scale).unwrap()
    }

    #[test]
    fn test_multiply_by_white_is_identity() {
        let fabric = solid(100, 100, 128);
        let print = Raster::Rgb(solid(10, 10, 255));
        let fused = fuse(&fabric, &print, &params(BlendMode::Multiply, 1.0, 1.0)).unwrap();
        assert_eq!(fused, fabric);
    }

    #[test]
    fn test_screen_with_black_is_identity() {
        let fabric = solid(100, 100, 128);
        let print = Raster::Rgb(solid(10, 10, 0));
        let fused = fuse(&fabric, &print, &params(BlendMode::Screen, 1.0, 1.0)).unwrap();
        assert_eq!(fused, fabric);
    }

    #[test]
    fn test_overlay_keeps_black_fabric() {
        let fabric = solid(100, 100, 0);
        let print = Raster::Rgb(solid(10, 10, 255));
        let fused = fuse(&fabric, &print, &params(BlendMode::Overlay, 1.0, 1.0)).unwrap();
        assert_eq!(fused, fabric);
    }

    #[test]
    fn test_fuse_output_matches_fabric_shape() {
        let fabric = solid(37, 23, 90);
        let print = Raster::Rgba(RgbaImage::from_pixel(5, 9, Rgba([200, 10, 10, 200])));
        for scale in [0.2, 0.5, 1.0, 1.7, 2.0] {
            let fused = fuse(&fabric, &print, &params(BlendMode::Overlay, 0.7, scale)).unwrap();
            assert_eq!(fused.dimensions(), (37, 23));
        }
    }

    #[test]
    fn test_fuse_tiles_scaled_print() {
        // 2x2 checker scaled to half of an 8x8 fabric: four 4x4 tiles.
        let checker = RgbImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) }
        });
        let fabric = solid(8, 8, 200);
        let fused = fuse(&fabric, &Raster::Rgb(checker), &params(BlendMode::Multiply, 1.0, 0.5)).unwrap();

        for (x, y, pixel) in fused.enumerate_pixels() {
            assert_eq!(pixel, fused.get_pixel(x % 4, y % 4), "at ({}, {})", x, y);
        }
    }

    #[test]
    fn test_zero_opacity_returns_fabric() {
        let fabric = RgbImage::from_fn(30, 20, |x, y| Rgb([x as u8 * 7, y as u8 * 11, 42]));
        let print = Raster::Rgb(solid(4, 4, 17));
        for mode in BlendMode::ALL {
            let fused = fuse(&fabric, &print, &params(mode, 0.0, 0.3)).unwrap();
            assert_eq!(fused, fabric);
        }
    }

    #[test]
    fn test_transparent_print_returns_fabric() {
        let fabric = RgbImage::from_fn(30, 20, |x, y| Rgb([x as u8, y as u8, 250]));
        let print = Raster::Rgba(RgbaImage::from_pixel(6, 6, Rgba([255, 0, 0, 0])));
        let fused = fuse(&fabric, &print, &params(BlendMode::Screen, 1.0, 0.25)).unwrap();
        assert_eq!(fused, fabric);
    }

    #[test]
    fn test_opaque_rgba_print_matches_rgb_print() {
        let fabric = RgbImage::from_fn(16, 16, |x, y| Rgb([x as u8 * 16, y as u8 * 16, 77]));
        let rgb = solid(4, 4, 180);
        let rgba = RgbaImage::from_pixel(4, 4, Rgba([180, 180, 180, 255]));
        let p = params(BlendMode::Overlay, 0.7, 1.0);

        let from_rgb = fuse(&fabric, &Raster::Rgb(rgb), &p).unwrap();
        let from_rgba = fuse(&fabric, &Raster::Rgba(rgba), &p).unwrap();
        assert_eq!(from_rgb, from_rgba);
    }

    #[test]
    fn test_degenerate_scale_is_parameter_error() {
        let fabric = solid(100, 100, 128);
        let print = Raster::Rgb(solid(10, 10, 255));
        let result = fuse(&fabric, &print, &params(BlendMode::Overlay, 0.7, 0.001));
        assert!(matches!(result, Err(FusionError::Parameter(_))));
    }

    #[test]
    fn test_huge_scale_is_parameter_error() {
        let fabric = solid(1000, 1000, 128);
        let print = Raster::Rgb(solid(10, 10, 255));
        let result = fuse(&fabric, &print, &params(BlendMode::Multiply, 1.0, 4_000_000.0));
        assert!(matches!(result, Err(FusionError::Parameter(_))));
    }

    #[test]
    fn test_fuse_does_not_touch_inputs() {
        let fabric = solid(12, 12, 64);
        let print = Raster::Rgb(solid(3, 3, 250));
        let (fabric_before, print_before) = (fabric.clone(), print.clone());
        let _ = fuse(&fabric, &print, &params(BlendMode::Screen, 0.9, 1.3)).unwrap();
        assert_eq!(fabric, fabric_before);
        assert_eq!(print, print_before);
    }

    #[test]
    fn test_fuse_with_timings_records_steps() {
        let (writer, _) = mock_writer(false);
        let pipeline = FabricFusionPipeline::with_custom(MockReader::new(None), writer, FusionConfig::default());

        let fabric = solid(16, 16, 100);
        let print = Raster::Rgb(solid(4, 4, 200));
        let (fused, timings) = pipeline
            .fuse_with_timings(&fabric, &print, &BlendParameters::default())
            .unwrap();

        assert_eq!(fused.dimensions(), (16, 16));
        let names: Vec<&str> = timings.steps().iter().map(|s| s.name).collect();
        assert_eq!(names, ["resize_print", "tile_print", "blend"]);
        assert!(timings.get_step("blend").is_some());
    }

    #[test]
    fn test_load_keeps_alpha_only_for_png() {
        let dir = TempDir::new().unwrap();
        let reader = MockReader::new(None);
        let requests = reader.alpha_requests.clone();
        let (writer, _) = mock_writer(false);
        let pipeline = FabricFusionPipeline::with_custom(reader, writer, FusionConfig::default());

        let png = pipeline.load(touch(&dir, "print.PNG")).unwrap();
        let jpg = pipeline.load(touch(&dir, "print.jpg")).unwrap();
        let fabric = pipeline.load_fabric(touch(&dir, "fabric.png")).unwrap();

        assert!(png.has_alpha());
        assert!(!jpg.has_alpha());
        assert_eq!(fabric.dimensions(), (20, 20));
        assert_eq!(*requests.lock().unwrap(), vec![true, false, false]);
    }

    #[test]
    fn test_reader_failure() {
        let dir = TempDir::new().unwrap();
        let mut reader = MockReader::new(None);
        reader.should_fail = true;
        let (writer, _) = mock_writer(false);
        let pipeline = FabricFusionPipeline::with_custom(reader, writer, FusionConfig::default());

        let result = pipeline.load(touch(&dir, "print.png"));
        assert!(matches!(result, Err(FusionError::Decode(_))));
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let (writer, _) = mock_writer(false);
        let pipeline = FabricFusionPipeline::with_custom(MockReader::new(None), writer, FusionConfig::default());

        let result = pipeline.load(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(FusionError::Decode(_))));
    }

    #[test]
    fn test_writer_failure_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("result.png");
        std::fs::write(&output, b"previous").unwrap();

        let (writer, written) = mock_writer(true);
        let pipeline = FabricFusionPipeline::with_custom(MockReader::new(None), writer, FusionConfig::default());

        let result = pipeline.save(&solid(4, 4, 1), &output);
        assert!(matches!(result, Err(FusionError::Encode(_))));
        assert!(written.lock().unwrap().is_empty());
        assert_eq!(std::fs::read(&output).unwrap(), b"previous");
    }

    #[test]
    fn test_save_picks_format_from_extension() {
        let dir = TempDir::new().unwrap();
        let (writer, written) = mock_writer(false);
        let pipeline = FabricFusionPipeline::with_custom(MockReader::new(None), writer, FusionConfig::default());

        pipeline.save(&solid(3, 2, 1), dir.path().join("a.png")).unwrap();
        pipeline.save(&solid(3, 2, 1), dir.path().join("b.JPEG")).unwrap();
        let unsupported = pipeline.save(&solid(3, 2, 1), dir.path().join("c.bmp"));

        assert!(matches!(unsupported, Err(FusionError::Encode(_))));
        assert_eq!(
            *written.lock().unwrap(),
            vec![(OutputFormat::Png, 3, 2), (OutputFormat::Jpeg, 3, 2)]
        );
    }

    #[test]
    fn test_save_to_unwritable_path() {
        let (writer, _) = mock_writer(false);
        let pipeline = FabricFusionPipeline::with_custom(MockReader::new(None), writer, FusionConfig::default());

        let result = pipeline.save(&solid(3, 2, 1), "/definitely/not/here/out.png");
        assert!(matches!(result, Err(FusionError::Encode(_))));
    }

    #[test]
    fn test_fuse_files() {
        let dir = TempDir::new().unwrap();
        let (writer, written) = mock_writer(false);
        let pipeline = FabricFusionPipeline::with_custom(MockReader::new(None), writer, FusionConfig::default());

        let fused = pipeline
            .fuse_files(
                touch(&dir, "fabric.jpg"),
                touch(&dir, "print.png"),
                dir.path().join("out.png"),
                &BlendParameters::default(),
            )
            .unwrap();

        assert_eq!(fused.dimensions(), (20, 20));
        assert_eq!(*written.lock().unwrap(), vec![(OutputFormat::Png, 20, 20)]);
        assert!(dir.path().join("out.png").exists());
    }

    #[test]
    fn test_dimension_validation_failure() {
        let dir = TempDir::new().unwrap();
        let reader = MockReader::new(Some(Raster::Rgb(solid(300, 10, 0))));
        let (writer, _) = mock_writer(false);
        let config = FusionConfig::builder()
            .validate_dimensions(true)
            .max_dimension(Some(256))
            .build();
        let pipeline = FabricFusionPipeline::with_custom(reader, writer, config);

        let result = pipeline.load(touch(&dir, "print.png"));
        assert!(matches!(result, Err(FusionError::InvalidDimensions(300, 10))));
    }

    #[test]
    fn test_dimension_validation_disabled() {
        let dir = TempDir::new().unwrap();
        let reader = MockReader::new(Some(Raster::Rgb(solid(300, 10, 0))));
        let (writer, _) = mock_writer(false);
        let config = FusionConfig::builder()
            .validate_dimensions(false)
            .max_dimension(Some(256))
            .build();
        let pipeline = FabricFusionPipeline::with_custom(reader, writer, config);

        assert!(pipeline.load(touch(&dir, "print.png")).is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = FusionConfig::builder()
            .jpeg_quality(75)
            .validate_dimensions(false)
            .max_dimension(None)
            .build();

        assert_eq!(config.jpeg_quality, 75);
        assert!(!config.validate_dimensions);
        assert_eq!(config.max_dimension, None);

        let mut pipeline = FabricFusionPipeline::new(FusionConfig::default());
        assert_eq!(pipeline.config().jpeg_quality, 90);
        pipeline.set_config(config);
        assert_eq!(pipeline.config().jpeg_quality, 75);
    }
}
