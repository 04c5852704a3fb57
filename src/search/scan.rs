//! Exhaustive positional scans of a single variant.

use crate::candidate::best::Placement;
use crate::image::GrayImage;
#[cfg(feature = "rayon")]
use crate::kernel::rayon::scan_full_par;
use crate::kernel::{DefaultKernel, Kernel};
use crate::util::{SdcError, SdcResult};
use crate::ImageView;

/// Scores one region against one variant of identical size.
///
/// This is the mean squared intensity difference over all aligned pixels.
/// Mismatched sizes are a caller defect and fail with `SizeMismatch`.
pub fn score_region(region: ImageView<'_, f32>, variant: ImageView<'_, f32>) -> SdcResult<f64> {
    if !region.same_size(&variant) {
        return Err(SdcError::SizeMismatch {
            region_width: region.width(),
            region_height: region.height(),
            variant_width: variant.width(),
            variant_height: variant.height(),
        });
    }
    Ok(DefaultKernel::score_at(region, variant, 0, 0))
}

/// Finds the minimum-score placement of `tpl` over every valid position.
///
/// The scan never stops early: every placement is scored before the minimum
/// is returned. Ties resolve to the first placement in row-major order.
/// Returns `None` when the variant does not fit.
pub(crate) fn scan_min(
    image: ImageView<'_, f32>,
    tpl: ImageView<'_, f32>,
    parallel: bool,
) -> Option<Placement> {
    #[cfg(feature = "rayon")]
    if parallel {
        return scan_full_par::<DefaultKernel>(image, tpl);
    }
    #[cfg(not(feature = "rayon"))]
    let _ = parallel;
    DefaultKernel::scan_full(image, tpl)
}

/// Dense matrix of scores for every placement of one template.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreMap {
    scores: Vec<f64>,
    cols: usize,
    rows: usize,
}

impl ScoreMap {
    /// Number of placement columns, `img_w - tpl_w + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of placement rows, `img_h - tpl_h + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row-major scores.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Score with the template's top-left corner at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.scores.get(row * self.cols + col).copied()
    }

    /// Lowest score and its placement; the first one in row-major order on
    /// ties.
    pub fn argmin(&self) -> Option<Placement> {
        let mut best: Option<Placement> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            if best.map_or(true, |b| score < b.score) {
                best = Some(Placement {
                    row: idx / self.cols,
                    col: idx % self.cols,
                    score,
                });
            }
        }
        best
    }
}

/// Scores every placement of `template` inside `image`.
///
/// Unlike the search engine, which skips variants that do not fit, a score
/// map for an oversized template fails with `TemplateTooLarge`.
pub fn score_map(image: &GrayImage, template: &GrayImage) -> SdcResult<ScoreMap> {
    if image.scale() != template.scale() {
        return Err(SdcError::IntensityMismatch {
            target: image.scale().name(),
            template: template.scale().name(),
        });
    }
    if template.width() > image.width() || template.height() > image.height() {
        return Err(SdcError::TemplateTooLarge {
            tpl_width: template.width(),
            tpl_height: template.height(),
            img_width: image.width(),
            img_height: image.height(),
        });
    }

    let cols = image.width() - template.width() + 1;
    let rows = image.height() - template.height() + 1;
    let img_view = image.view();
    let tpl_view = template.view();
    let mut scores = Vec::with_capacity(rows * cols);
    for y in 0..rows {
        for x in 0..cols {
            scores.push(DefaultKernel::score_at(img_view, tpl_view, x, y));
        }
    }

    Ok(ScoreMap { scores, cols, rows })
}
