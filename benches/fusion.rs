use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fabric_fusion::image_pipeline::{fuse, BlendMode, BlendParameters, Raster};
use image::{Rgb, RgbImage, Rgba, RgbaImage};

fn generate_fabric(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let value = ((x + y) % 256) as u8;
        Rgb([value, value / 2, 255 - value])
    })
}

fn generate_print(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, ((x * y) % 256) as u8])
    })
}

fn benchmark_fusion_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("fusion_by_size");
    let print = Raster::Rgba(generate_print(64, 64));
    let params = BlendParameters::default();

    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (1000, 1000, "1000x1000"),
    ];

    for (width, height, label) in sizes {
        let fabric = generate_fabric(width, height);

        group.bench_with_input(BenchmarkId::from_parameter(label), &fabric, |b, fabric| {
            b.iter(|| fuse(black_box(fabric), black_box(&print), &params));
        });
    }

    group.finish();
}

fn benchmark_blend_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("blend_modes");
    let fabric = generate_fabric(500, 500);
    let print = Raster::Rgb(generate_fabric(50, 50));

    for mode in BlendMode::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            let params = BlendParameters::new(mode, 0.7, 0.25).unwrap();
            b.iter(|| fuse(black_box(&fabric), black_box(&print), &params));
        });
    }

    group.finish();
}

fn benchmark_scale_impact(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale_impact");
    let fabric = generate_fabric(500, 500);
    let print = Raster::Rgba(generate_print(128, 128));

    for scale in [0.2f32, 1.0, 2.0] {
        group.bench_with_input(BenchmarkId::from_parameter(scale), &scale, |b, &scale| {
            let params = BlendParameters::builder().scale(scale).build().unwrap();
            b.iter(|| fuse(black_box(&fabric), black_box(&print), &params));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_fusion_sizes,
    benchmark_blend_modes,
    benchmark_scale_impact
);
criterion_main!(benches);
