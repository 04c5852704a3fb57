//! Region scoring kernels.
//!
//! Every kernel computes the same metric, the mean squared intensity
//! difference between a variant and the equally sized image region at a
//! placement:
//!
//! `score = (1 / (h * w)) * sum((region[i, j] - variant[i, j])^2)`
//!
//! Sums are accumulated in `f64`. A kernel must be deterministic: the same
//! inputs always yield bit-identical scores.

use crate::candidate::best::{BestPlacement, Placement};
use crate::ImageView;

/// Kernel trait for scoring and scan operations.
pub trait Kernel {
    /// Computes the score with the variant's top-left corner at `(x, y)`.
    ///
    /// Returns `f64::INFINITY` if the variant does not fit at that placement.
    fn score_at(image: ImageView<'_, f32>, tpl: ImageView<'_, f32>, x: usize, y: usize) -> f64;

    /// Scans every column for placement rows `y0..=y1` and returns the
    /// minimum. Rows are clamped to the valid placement range.
    fn scan_rows(
        image: ImageView<'_, f32>,
        tpl: ImageView<'_, f32>,
        y0: usize,
        y1: usize,
    ) -> BestPlacement {
        let mut best = BestPlacement::new();
        if tpl.width() > image.width() || tpl.height() > image.height() {
            return best;
        }
        let max_x = image.width() - tpl.width();
        let max_y = image.height() - tpl.height();
        for y in y0..=y1.min(max_y) {
            for x in 0..=max_x {
                let score = Self::score_at(image, tpl, x, y);
                best.push(Placement {
                    row: y,
                    col: x,
                    score,
                });
            }
        }
        best
    }

    /// Scans the full valid placement range.
    ///
    /// Returns `None` when the variant does not fit inside the image.
    fn scan_full(image: ImageView<'_, f32>, tpl: ImageView<'_, f32>) -> Option<Placement> {
        if tpl.width() > image.width() || tpl.height() > image.height() {
            return None;
        }
        let max_y = image.height() - tpl.height();
        Self::scan_rows(image, tpl, 0, max_y).get()
    }
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Kernel used by the search engine and the public region scorer.
#[cfg(not(feature = "simd"))]
pub type DefaultKernel = scalar::SdcScalar;
/// Kernel used by the search engine and the public region scorer.
#[cfg(feature = "simd")]
pub type DefaultKernel = simd::SdcSimd;
