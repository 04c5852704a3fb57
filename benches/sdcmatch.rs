use criterion::{criterion_group, criterion_main, Criterion};
use sdcmatch::{generate_variants, GrayImage, IntensityScale, SearchConfig, Searcher};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> GrayImage {
    GrayImage::from_fn(width, height, IntensityScale::Byte, |x, y| {
        (((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF) as f32
    })
    .unwrap()
}

fn bench_search(c: &mut Criterion) {
    let target = make_image(256, 256);
    let template = target.crop(120, 100, 32, 32).unwrap();

    let single = generate_variants(&template, &[1.0], &[0.0]).unwrap();
    let searcher = Searcher::new().with_config(SearchConfig {
        threshold: 0.0,
        parallel: false,
    });
    c.bench_function("search_single_variant", |b| {
        b.iter(|| black_box(searcher.search(&target, &single).unwrap()));
    });

    // Nothing matches exactly, so every variant is scanned.
    let multi = generate_variants(&template, &[0.75, 1.25], &[10.0, 20.0]).unwrap();
    c.bench_function("search_four_variants_no_match", |b| {
        b.iter(|| black_box(searcher.search(&target, &multi).unwrap()));
    });

    let parallel = Searcher::new().with_config(SearchConfig {
        threshold: 0.0,
        parallel: true,
    });
    c.bench_function("search_four_variants_parallel", |b| {
        b.iter(|| black_box(parallel.search(&target, &multi).unwrap()));
    });

    c.bench_function("generate_variants_3x4", |b| {
        b.iter(|| {
            black_box(
                generate_variants(&template, &[0.5, 1.0, 1.5], &[0.0, 90.0, 180.0, 270.0])
                    .unwrap(),
            )
        });
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
