//! Multi-variant search engine.
//!
//! Variants are tried strictly in generation order. Each variant that fits
//! inside the target is scanned exhaustively for its minimum score. The first
//! variant whose minimum is at or below the threshold is accepted and the
//! search stops; later variants are never consulted, even if one of them
//! would score better. Callers that want the best match over all variants
//! should use [`Searcher::evaluate_all`] and pick from the outcomes.
//!
//! With the `rayon` feature and `SearchConfig::parallel`, every variant is
//! evaluated concurrently and [`select_first_acceptable`] then applies the
//! same ordered policy, so both paths report the same match.

pub(crate) mod scan;

use crate::geometry::Position;
use crate::image::GrayImage;
use crate::trace::{trace_event, trace_span};
use crate::util::{SdcError, SdcResult};
use crate::variant::TemplateVariant;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub use scan::{score_map, score_region, ScoreMap};

/// Search configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Largest accepted mean squared difference, inclusive.
    pub threshold: f64,
    /// Evaluate variants and placement rows on the rayon pool.
    ///
    /// Ignored unless the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            parallel: false,
        }
    }
}

/// An accepted match.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    /// Top-left corner in target image coordinates.
    pub top_left: Position,
    /// Width of the matching variant.
    pub width: usize,
    /// Height of the matching variant.
    pub height: usize,
    /// Minimum score of the matching variant.
    pub score: f64,
    /// Generation index of the matching variant.
    pub variant_index: usize,
    /// Scale factor of the matching variant.
    pub scale: f32,
    /// Rotation angle of the matching variant in degrees.
    pub angle_deg: f32,
}

/// Minimum-score placement of one variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantBest {
    /// Generation index of the variant.
    pub variant_index: usize,
    /// Scale factor of the variant.
    pub scale: f32,
    /// Rotation angle of the variant in degrees.
    pub angle_deg: f32,
    /// Top-left corner of the minimum-score placement.
    pub position: Position,
    /// Variant width in pixels.
    pub width: usize,
    /// Variant height in pixels.
    pub height: usize,
    /// Minimum score over all placements.
    pub score: f64,
}

impl From<VariantBest> for SearchResult {
    fn from(best: VariantBest) -> Self {
        Self {
            top_left: best.position,
            width: best.width,
            height: best.height,
            score: best.score,
            variant_index: best.variant_index,
            scale: best.scale,
            angle_deg: best.angle_deg,
        }
    }
}

/// What evaluating one variant produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VariantOutcome {
    /// The variant is larger than the target in at least one dimension.
    Skipped { variant_index: usize },
    /// The variant was scanned; holds its minimum.
    Scanned(VariantBest),
}

impl VariantOutcome {
    /// Returns the scanned minimum, if the variant was not skipped.
    pub fn best(&self) -> Option<&VariantBest> {
        match self {
            VariantOutcome::Skipped { .. } => None,
            VariantOutcome::Scanned(best) => Some(best),
        }
    }
}

/// Applies the acceptance policy to outcomes listed in generation order.
///
/// Returns the first scanned variant whose minimum is `<= threshold`.
pub fn select_first_acceptable(
    outcomes: &[VariantOutcome],
    threshold: f64,
) -> Option<SearchResult> {
    outcomes
        .iter()
        .filter_map(VariantOutcome::best)
        .find(|best| best.score <= threshold)
        .map(|best| SearchResult::from(*best))
}

/// Template search engine.
#[derive(Clone, Debug, Default)]
pub struct Searcher {
    cfg: SearchConfig,
}

impl Searcher {
    /// Creates a searcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: SearchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    /// Returns the first acceptable match, or `None` if no variant clears
    /// the threshold.
    ///
    /// Variants that do not fit inside `target` are skipped. An empty variant
    /// list yields `None`.
    pub fn search(
        &self,
        target: &GrayImage,
        variants: &[TemplateVariant],
    ) -> SdcResult<Option<SearchResult>> {
        self.validate(target, variants)?;
        let threshold = self.cfg.threshold;
        let _span = trace_span!("search", variants = variants.len(), threshold = threshold).entered();

        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            let outcomes = self.evaluate_par(target, variants);
            let result = select_first_acceptable(&outcomes, threshold);
            report(&result);
            return Ok(result);
        }

        for variant in variants {
            let outcome = evaluate_variant(target, variant, false);
            if let Some(result) = select_first_acceptable(&[outcome], threshold) {
                report(&Some(result));
                return Ok(Some(result));
            }
        }
        report(&None);
        Ok(None)
    }

    /// Evaluates every variant without early exit, in generation order.
    pub fn evaluate_all(
        &self,
        target: &GrayImage,
        variants: &[TemplateVariant],
    ) -> SdcResult<Vec<VariantOutcome>> {
        self.validate(target, variants)?;
        let _span = trace_span!("evaluate_all", variants = variants.len()).entered();

        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            return Ok(self.evaluate_par(target, variants));
        }

        Ok(variants
            .iter()
            .map(|variant| evaluate_variant(target, variant, false))
            .collect())
    }

    #[cfg(feature = "rayon")]
    fn evaluate_par(&self, target: &GrayImage, variants: &[TemplateVariant]) -> Vec<VariantOutcome> {
        variants
            .par_iter()
            .map(|variant| evaluate_variant(target, variant, true))
            .collect()
    }

    fn validate(&self, target: &GrayImage, variants: &[TemplateVariant]) -> SdcResult<()> {
        let threshold = self.cfg.threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(SdcError::InvalidParameter {
                reason: "threshold must be finite and >= 0",
            });
        }
        if let Some(variant) = variants
            .iter()
            .find(|v| v.image().scale() != target.scale())
        {
            return Err(SdcError::IntensityMismatch {
                target: target.scale().name(),
                template: variant.image().scale().name(),
            });
        }
        Ok(())
    }
}

/// Searches `variants` for the first one whose best placement scores at or
/// below `threshold`.
pub fn search(
    target: &GrayImage,
    variants: &[TemplateVariant],
    threshold: f64,
) -> SdcResult<Option<SearchResult>> {
    Searcher::new()
        .with_config(SearchConfig {
            threshold,
            ..SearchConfig::default()
        })
        .search(target, variants)
}

fn evaluate_variant(target: &GrayImage, variant: &TemplateVariant, parallel: bool) -> VariantOutcome {
    let variant_index = variant.index();
    let _span = trace_span!(
        "scan_variant",
        index = variant_index,
        width = variant.width(),
        height = variant.height()
    )
    .entered();

    match scan::scan_min(target.view(), variant.image().view(), parallel) {
        None => {
            trace_event!("variant_skipped", index = variant_index);
            VariantOutcome::Skipped { variant_index }
        }
        Some(placement) => {
            trace_event!(
                "variant_scanned",
                index = variant_index,
                score = placement.score,
                row = placement.row,
                col = placement.col
            );
            VariantOutcome::Scanned(VariantBest {
                variant_index,
                scale: variant.scale(),
                angle_deg: variant.angle_deg(),
                position: Position::new(placement.row, placement.col),
                width: variant.width(),
                height: variant.height(),
                score: placement.score,
            })
        }
    }
}

fn report(result: &Option<SearchResult>) {
    match result {
        Some(result) => {
            trace_event!(
                "match_accepted",
                index = result.variant_index,
                score = result.score,
                row = result.top_left.row,
                col = result.top_left.col
            );
        }
        None => {
            trace_event!("no_match");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{select_first_acceptable, Position, VariantBest, VariantOutcome};

    fn scanned(idx: usize, score: f64) -> VariantOutcome {
        VariantOutcome::Scanned(VariantBest {
            variant_index: idx,
            scale: 1.0,
            angle_deg: 0.0,
            position: Position::new(idx, idx),
            width: 2,
            height: 2,
            score,
        })
    }

    #[test]
    fn earliest_acceptable_wins_over_better_later() {
        let outcomes = [
            VariantOutcome::Skipped { variant_index: 0 },
            scanned(1, 0.5),
            scanned(2, 0.2),
            scanned(3, 0.01),
        ];
        let result = select_first_acceptable(&outcomes, 0.3).unwrap();
        assert_eq!(result.variant_index, 2);
        assert_eq!(result.score, 0.2);
    }

    #[test]
    fn threshold_is_inclusive() {
        let outcomes = [scanned(0, 0.25)];
        assert!(select_first_acceptable(&outcomes, 0.25).is_some());
        assert!(select_first_acceptable(&outcomes, 0.2499).is_none());
    }

    #[test]
    fn skipped_only_is_no_match() {
        let outcomes = [VariantOutcome::Skipped { variant_index: 0 }];
        assert!(select_first_acceptable(&outcomes, 1e9).is_none());
        assert!(select_first_acceptable(&[], 1e9).is_none());
    }
}
