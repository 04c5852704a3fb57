use sdcmatch::lowlevel::{rotate_bilinear, scale_area};
use sdcmatch::{
    corners, generate_variants, generate_variants_with, search, BilinearResampler, GrayImage,
    IntensityScale, Position, ResampleConfig, Searcher, Sweep,
};

fn make_template(width: usize, height: usize) -> GrayImage {
    GrayImage::from_fn(width, height, IntensityScale::Byte, |x, y| {
        (20 + ((x * 13) ^ (y * 7) ^ (x * y)) % 230) as f32
    })
    .unwrap()
}

/// Pastes `patch` into a zero image of `width x height` at `(row, col)`.
fn embed(patch: &GrayImage, width: usize, height: usize, row: usize, col: usize) -> GrayImage {
    GrayImage::from_fn(width, height, patch.scale(), |x, y| {
        if y >= row && x >= col {
            patch.get(x - col, y - row).unwrap_or(0.0)
        } else {
            0.0
        }
    })
    .unwrap()
}

#[test]
fn pipeline_finds_scaled_template() {
    let template = make_template(8, 8);
    let scaled = scale_area(&template, 2.0).unwrap();
    let target = embed(&scaled, 40, 40, 5, 9);

    let variants = generate_variants(&template, &[0.5, 1.0, 2.0], &[0.0]).unwrap();
    assert_eq!(variants.len(), 3);

    let result = search(&target, &variants, 1e-9).unwrap().unwrap();
    assert_eq!(result.variant_index, 2);
    assert_eq!(result.scale, 2.0);
    assert_eq!(result.top_left, Position::new(5, 9));
    assert_eq!((result.width, result.height), (16, 16));

    let c = corners(&result);
    assert_eq!(c.top_right, Position::new(5, 25));
    assert_eq!(c.bottom_left, Position::new(21, 9));
    assert_eq!(c.bottom_right, Position::new(21, 25));
}

#[test]
fn pipeline_finds_rotated_template() {
    let template = make_template(12, 12);
    let rotated = rotate_bilinear(&template, 90.0, 0.0).unwrap();
    let target = embed(&rotated, 50, 36, 20, 3);

    let angles = Sweep::full_turn(90.0).unwrap().to_vec();
    let variants = generate_variants(&template, &[1.0], &angles).unwrap();
    assert_eq!(variants.len(), 4);

    let result = search(&target, &variants, 1e-9).unwrap().unwrap();
    assert_eq!(result.variant_index, 1);
    assert_eq!(result.angle_deg, 90.0);
    assert_eq!(result.top_left, Position::new(20, 3));
}

#[test]
fn all_variant_evaluation_exposes_global_best() {
    let template = make_template(8, 8);
    let scaled = scale_area(&template, 1.5).unwrap();
    let target = embed(&scaled, 30, 30, 2, 2);

    let variants = generate_variants(&template, &[1.0, 1.5], &[0.0]).unwrap();
    let outcomes = Searcher::new().evaluate_all(&target, &variants).unwrap();
    let best = outcomes
        .iter()
        .filter_map(|o| o.best())
        .min_by(|a, b| a.score.total_cmp(&b.score))
        .unwrap();
    assert_eq!(best.variant_index, 1);
    assert_eq!(best.position, Position::new(2, 2));
    assert_eq!(best.score, 0.0);
}

#[test]
fn custom_fill_value_is_used_for_rotation() {
    let template = make_template(10, 4);
    let resampler = BilinearResampler::new().with_config(ResampleConfig { fill_value: 7.0 });
    let variants = generate_variants_with(&template, &[1.0], &[90.0], &resampler).unwrap();
    let img = variants[0].image();
    assert_eq!((img.width(), img.height()), (10, 4));
    assert_eq!(img.get(0, 0), Some(7.0));

    let bad = BilinearResampler::new().with_config(ResampleConfig { fill_value: 300.0 });
    assert!(generate_variants_with(&template, &[1.0], &[45.0], &bad).is_err());
}
