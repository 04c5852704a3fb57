#![cfg(feature = "rayon")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sdcmatch::{generate_variants, GrayImage, IntensityScale, SearchConfig, Searcher, TemplateVariant};

fn random_image(rng: &mut StdRng, width: usize, height: usize) -> GrayImage {
    let data = (0..width * height).map(|_| rng.random::<f32>()).collect();
    GrayImage::new(data, width, height, IntensityScale::Unit).unwrap()
}

fn searchers(threshold: f64) -> (Searcher, Searcher) {
    let seq = Searcher::new().with_config(SearchConfig {
        threshold,
        parallel: false,
    });
    let par = Searcher::new().with_config(SearchConfig {
        threshold,
        parallel: true,
    });
    (seq, par)
}

#[test]
fn parallel_matches_sequential_across_variants() {
    let mut rng = StdRng::seed_from_u64(2024);
    let target = random_image(&mut rng, 64, 48);
    let template = target.crop(20, 10, 10, 8).unwrap();
    let variants =
        generate_variants(&template, &[0.8, 1.0, 1.25], &[0.0, 15.0, 30.0]).unwrap();

    for threshold in [0.0, 0.05, 0.5] {
        let (seq, par) = searchers(threshold);
        let a = seq.search(&target, &variants).unwrap();
        let b = par.search(&target, &variants).unwrap();
        assert_eq!(a, b, "threshold {threshold}");
        assert_eq!(
            seq.evaluate_all(&target, &variants).unwrap(),
            par.evaluate_all(&target, &variants).unwrap()
        );
    }
}

#[test]
fn parallel_keeps_first_acceptable_policy() {
    let target = GrayImage::new(vec![0.2; 100], 10, 10, IntensityScale::Unit).unwrap();
    let constant = |value: f32, size: usize| {
        GrayImage::new(vec![value; size * size], size, size, IntensityScale::Unit).unwrap()
    };
    let variants = vec![
        TemplateVariant::new(0, 1.0, 0.0, constant(0.9, 3)),
        TemplateVariant::new(1, 1.0, 0.0, constant(0.6, 4)),
        TemplateVariant::new(2, 1.0, 0.0, constant(0.25, 5)),
    ];
    let (seq, par) = searchers(0.3);
    let a = seq.search(&target, &variants).unwrap().unwrap();
    let b = par.search(&target, &variants).unwrap().unwrap();
    assert_eq!(a.variant_index, 1);
    assert_eq!(a, b);
}

#[test]
fn parallel_tie_break_is_row_major() {
    // Constant target: every placement ties, the first one must win.
    let target = GrayImage::new(vec![0.5; 40 * 30], 40, 30, IntensityScale::Unit).unwrap();
    let variants = vec![TemplateVariant::new(
        0,
        1.0,
        0.0,
        GrayImage::new(vec![0.4; 20], 5, 4, IntensityScale::Unit).unwrap(),
    )];
    let (_, par) = searchers(1.0);
    let result = par.search(&target, &variants).unwrap().unwrap();
    assert_eq!((result.top_left.row, result.top_left.col), (0, 0));
}
