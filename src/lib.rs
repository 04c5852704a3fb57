//! SdcMatch locates a small template inside a larger grayscale image by
//! exhaustive comparison, optionally across scaled and rotated variants of
//! the template.
//!
//! The pipeline is three calls:
//!
//! 1. [`generate_variants`] builds the ordered variant list (scales outer,
//!    angles inner).
//! 2. [`search`] scans each variant over every placement, scoring with the
//!    mean squared intensity difference, and accepts the first variant whose
//!    minimum is at or below the threshold.
//! 3. [`corners`] turns an accepted match into a bounding box.
//!
//! Optional features: `rayon` (parallel scans with identical results),
//! `simd` (vectorized scoring via `wide`), `image-io` (decoding via `image`)
//! and `tracing` (spans and events).

mod candidate;
pub mod geometry;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod search;
mod trace;
pub mod util;
pub mod variant;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crate::image::{GrayImage, ImageView, IntensityScale};
pub use geometry::{corners, Corners, Position};
pub use search::{
    score_map, score_region, search, select_first_acceptable, ScoreMap, SearchConfig,
    SearchResult, Searcher, VariantBest, VariantOutcome,
};
pub use util::{SdcError, SdcResult};
pub use variant::{
    generate_variants, generate_variants_with, BilinearResampler, Resample, ResampleConfig,
    Sweep, TemplateVariant,
};
