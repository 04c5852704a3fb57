//! Rayon-parallel scans (feature-gated).
//!
//! Placement rows are distributed across the thread pool. Each row yields its
//! own minimum and the per-row minima are folded in row order, so the result
//! is identical to a sequential scan.

use crate::candidate::best::{BestPlacement, Placement};
use crate::kernel::Kernel;
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel full scan with kernel `K`.
///
/// Returns `None` when the variant does not fit inside the image.
pub fn scan_full_par<K: Kernel>(
    image: ImageView<'_, f32>,
    tpl: ImageView<'_, f32>,
) -> Option<Placement> {
    if tpl.width() > image.width() || tpl.height() > image.height() {
        return None;
    }
    let max_y = image.height() - tpl.height();

    let row_results: Vec<BestPlacement> = (0..=max_y)
        .into_par_iter()
        .map(|y| K::scan_rows(image, tpl, y, y))
        .collect();

    let mut best = BestPlacement::new();
    for row in row_results {
        best.merge(row);
    }
    best.get()
}
