use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use fabric_fusion::image_pipeline::blend::{OPACITY_UI_RANGE, SCALE_UI_RANGE};
use fabric_fusion::image_pipeline::{BlendMode, BlendParameters, FabricFusionPipeline, FusionConfig};
use fabric_fusion::logger::{self, error, info};

/// Composite a repeating print onto a fabric image.
#[derive(Parser, Debug)]
#[command(
    name = "fabric-fusion",
    about = "Tile a print across a fabric image and blend the two",
    long_about = "Scales the print relative to the fabric, tiles it over the whole fabric\n\
                  and blends it in with overlay, multiply or screen.\n\n\
                  Example:\n  \
                  fabric-fusion --fabric linen.jpg --print flowers.png --output out.png --mode multiply"
)]
struct CliArgs {
    /// Fabric image (PNG or JPEG). Any transparency is ignored.
    #[arg(short, long, value_name = "FILE")]
    fabric: PathBuf,

    /// Print image (PNG or JPEG). PNG transparency is honoured.
    #[arg(short, long, value_name = "FILE")]
    print: PathBuf,

    /// Output file; the extension (.png, .jpg, .jpeg) selects the format.
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Blend mode: overlay, multiply or screen. Unknown names use overlay.
    #[arg(short, long, default_value = "overlay")]
    mode: String,

    /// Print opacity, 0.1 to 1.0.
    #[arg(long, default_value_t = 0.7, value_parser = opacity_in_range)]
    opacity: f32,

    /// Print scale relative to the fabric size, 0.2 to 2.0.
    #[arg(short, long, default_value_t = 1.0, value_parser = scale_in_range)]
    scale: f32,

    /// JPEG quality (1-100).
    #[arg(short, long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Log per-step timings of the fusion.
    #[arg(long)]
    timings: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_in_range(value: &str, range: &RangeInclusive<f32>) -> Result<f32, String> {
    let parsed: f32 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if range.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!(
            "{} is outside {}..={}",
            parsed,
            range.start(),
            range.end()
        ))
    }
}

fn opacity_in_range(value: &str) -> Result<f32, String> {
    parse_in_range(value, &OPACITY_UI_RANGE)
}

fn scale_in_range(value: &str) -> Result<f32, String> {
    parse_in_range(value, &SCALE_UI_RANGE)
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    let params = BlendParameters::builder()
        .blend_mode(BlendMode::from_name(&args.mode))
        .opacity(args.opacity)
        .scale(args.scale)
        .build()
        .context("invalid fusion parameters")?;

    let config = FusionConfig::builder().jpeg_quality(args.quality).build();
    let pipeline = FabricFusionPipeline::new(config);

    info!(
        "Fusion parameters: mode={}, opacity={:.2}, scale={:.2}",
        params.blend_mode(),
        params.opacity(),
        params.scale()
    );

    let fabric = pipeline
        .load_fabric(&args.fabric)
        .with_context(|| format!("failed to load fabric {}", args.fabric.display()))?;
    let print = pipeline
        .load(&args.print)
        .with_context(|| format!("failed to load print {}", args.print.display()))?;

    let fused = if args.timings {
        let (fused, timings) = pipeline.fuse_with_timings(&fabric, &print, &params)?;
        timings.log_summary();
        fused
    } else {
        pipeline.fuse(&fabric, &print, &params)?
    };

    pipeline
        .save(&fused, &args.output)
        .with_context(|| format!("failed to save {}", args.output.display()))?;

    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    logger::init_with_default(if args.verbose { "debug" } else { "info" });

    info!("Starting fabric-fusion...");

    match run(&args) {
        Ok(()) => {
            info!("Saved fusion to {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fusion failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
