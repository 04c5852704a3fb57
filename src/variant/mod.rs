//! Template variant generation.
//!
//! A variant is the base template scaled by one factor and then rotated by
//! one angle. Variants are produced with scales as the outer loop and angles
//! as the inner loop; that order is the order in which the search engine
//! tries them and therefore decides which match is reported.

mod resample;
mod sweep;

pub use resample::{
    rotate_bilinear, scale_area, scaled_size, BilinearResampler, Resample, ResampleConfig,
};
pub use sweep::Sweep;

use crate::image::GrayImage;
use crate::trace::{trace_event, trace_span};
use crate::util::{SdcError, SdcResult};

/// One scaled and rotated copy of the base template.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateVariant {
    index: usize,
    scale: f32,
    angle_deg: f32,
    image: GrayImage,
}

impl TemplateVariant {
    /// Wraps an already transformed image as a variant.
    pub fn new(index: usize, scale: f32, angle_deg: f32, image: GrayImage) -> Self {
        Self {
            index,
            scale,
            angle_deg,
            image,
        }
    }

    /// Position of this variant in generation order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Scale factor applied to the base template.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Rotation angle in degrees applied after scaling.
    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    /// Transformed pixels.
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// Variant width in pixels.
    pub fn width(&self) -> usize {
        self.image.width()
    }

    /// Variant height in pixels.
    pub fn height(&self) -> usize {
        self.image.height()
    }
}

/// Generates variants with the default [`BilinearResampler`].
pub fn generate_variants(
    template: &GrayImage,
    scales: &[f32],
    angles: &[f32],
) -> SdcResult<Vec<TemplateVariant>> {
    generate_variants_with(template, scales, angles, &BilinearResampler::new())
}

/// Generates one variant per `(scale, angle)` pair using `resampler`.
///
/// Scales are iterated in the outer loop and angles in the inner loop, both
/// in the order supplied. Every parameter is validated before any resampling
/// happens. No variant is dropped here, even if it will not fit a target.
pub fn generate_variants_with<R: Resample + ?Sized>(
    template: &GrayImage,
    scales: &[f32],
    angles: &[f32],
    resampler: &R,
) -> SdcResult<Vec<TemplateVariant>> {
    if let Some(&bad) = scales.iter().find(|s| !s.is_finite() || **s <= 0.0) {
        let reason = if bad.is_finite() {
            "scale factor must be > 0"
        } else {
            "scale factor must be finite"
        };
        return Err(SdcError::InvalidParameter { reason });
    }
    if angles.iter().any(|a| !a.is_finite()) {
        return Err(SdcError::InvalidParameter {
            reason: "rotation angle must be finite",
        });
    }

    let _span = trace_span!(
        "generate_variants",
        scales = scales.len(),
        angles = angles.len()
    )
    .entered();

    let mut variants = Vec::with_capacity(scales.len() * angles.len());
    for &scale in scales {
        for &angle_deg in angles {
            let image = resampler.resample(template, scale, angle_deg)?;
            if image.scale() != template.scale() {
                return Err(SdcError::IntensityMismatch {
                    target: template.scale().name(),
                    template: image.scale().name(),
                });
            }
            let index = variants.len();
            trace_event!(
                "variant_generated",
                index = index,
                scale = scale,
                angle_deg = angle_deg,
                width = image.width(),
                height = image.height()
            );
            variants.push(TemplateVariant::new(index, scale, angle_deg, image));
        }
    }

    Ok(variants)
}
