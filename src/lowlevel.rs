//! Low-level building blocks for custom matching pipelines.
//!
//! Most users should prefer [`generate_variants`](crate::generate_variants),
//! [`search`](crate::search) and [`Searcher`](crate::Searcher).

pub use crate::candidate::best::{BestPlacement, Placement};
pub use crate::geometry::box_corners;
pub use crate::kernel::scalar::SdcScalar;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::SdcSimd;
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::scan_full_par;
pub use crate::kernel::{DefaultKernel, Kernel};
pub use crate::variant::{rotate_bilinear, scale_area, scaled_size};
