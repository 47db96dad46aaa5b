//! Benchmarks for the per-page work of a conversion run.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{DynamicImage, Rgba, RgbaImage};
use pageshrink::{to_rgb, Encoder, EncoderConfig, DEFAULT_QUALITY};
use std::hint::black_box;

/// Generate a gradient RGBA page for benchmarking.
fn generate_gradient_page(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        let r = ((x * 255) / width.max(1)) as u8;
        let g = ((y * 255) / height.max(1)) as u8;
        let b = (((x + y) * 127) / (width + height).max(1)) as u8;
        Rgba([r, g, b, 255])
    }))
}

const SIZES: &[(u32, u32)] = &[(256, 256), (827, 1169), (1654, 2339)];

fn bench_to_rgb(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_rgb");

    for &(width, height) in SIZES {
        let page = generate_gradient_page(width, height);
        group.throughput(Throughput::Elements((width * height) as u64));

        group.bench_with_input(
            BenchmarkId::new("rgba", format!("{}x{}", width, height)),
            &page,
            |b, page| b.iter(|| to_rgb(black_box(page))),
        );
    }

    group.finish();
}

fn bench_encode_q80(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_q80");
    group.sample_size(20);

    for &(width, height) in SIZES {
        let page = generate_gradient_page(width, height);
        let rgb = page.to_rgb8().into_raw();
        let img = to_rgb(&page);
        let config = EncoderConfig::new().quality(DEFAULT_QUALITY);
        group.throughput(Throughput::Elements((width * height) as u64));

        group.bench_with_input(
            BenchmarkId::new("bytes", format!("{}x{}", width, height)),
            &rgb,
            |b, rgb| b.iter(|| config.encode_rgb(black_box(rgb), width, height).unwrap()),
        );

        group.bench_with_input(
            BenchmarkId::new("imgref", format!("{}x{}", width, height)),
            &img,
            |b, img| {
                b.iter(|| {
                    Encoder::from_rgb(black_box(img.as_ref()))
                        .config(config.clone())
                        .encode()
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_to_rgb, bench_encode_q80);
criterion_main!(benches);
