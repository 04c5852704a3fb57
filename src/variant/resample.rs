//! Geometric resampling of template images.
//!
//! Scaling is separable: each axis maps destination samples onto weighted
//! source samples. Shrinking averages the covered source area so the result
//! is anti-aliased; enlarging interpolates bilinearly between pixel centers.
//! Rotation is bilinear about the image center and keeps the dimensions of
//! its input.

use crate::image::GrayImage;
use crate::util::math::{is_identity_angle, sin_cos_deg};
use crate::util::{SdcError, SdcResult};

/// Largest pixel count a resampled template may have (16384 x 16384).
pub const MAX_PIXELS: usize = 1 << 28;

const OVERSIZED: SdcError = SdcError::InvalidParameter {
    reason: "scale factor produces an oversized template",
};

/// Capability that turns a base template into one scaled, rotated variant.
///
/// The generator only depends on this trait, so search policy can be tested
/// with a stub transform independently of interpolation quality.
pub trait Resample {
    /// Scales `src` by `scale`, then rotates it by `angle_deg` degrees
    /// counter-clockwise about its center.
    fn resample(&self, src: &GrayImage, scale: f32, angle_deg: f32) -> SdcResult<GrayImage>;
}

/// Configuration for [`BilinearResampler`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResampleConfig {
    /// Intensity written where a rotated sample falls outside the source.
    pub fill_value: f32,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self { fill_value: 0.0 }
    }
}

/// Default resampler: area-averaged downscale, bilinear upscale and rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct BilinearResampler {
    cfg: ResampleConfig,
}

impl BilinearResampler {
    /// Creates a resampler with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: ResampleConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ResampleConfig {
        &self.cfg
    }
}

impl Resample for BilinearResampler {
    fn resample(&self, src: &GrayImage, scale: f32, angle_deg: f32) -> SdcResult<GrayImage> {
        let max = src.scale().max_value();
        let fill = self.cfg.fill_value;
        if !fill.is_finite() || fill < 0.0 || fill > max {
            return Err(SdcError::InvalidParameter {
                reason: "fill_value must lie inside the template intensity range",
            });
        }
        let scaled = scale_area(src, scale)?;
        rotate_bilinear(&scaled, angle_deg, fill)
    }
}

/// Returns the dimensions a `width x height` image has after scaling.
///
/// Fails when the scaled image would exceed [`MAX_PIXELS`].
pub fn scaled_size(width: usize, height: usize, scale: f32) -> SdcResult<(usize, usize)> {
    validate_scale(scale)?;
    let w = scaled_len(width, scale)?;
    let h = scaled_len(height, scale)?;
    match w.checked_mul(h) {
        Some(pixels) if pixels <= MAX_PIXELS => Ok((w, h)),
        _ => Err(OVERSIZED),
    }
}

/// Resizes an image by `scale` with area averaging when shrinking and
/// bilinear interpolation when enlarging.
///
/// Output dimensions are `round(dim * scale)`, at least 1. A scale of exactly
/// 1 returns an unmodified copy.
pub fn scale_area(src: &GrayImage, scale: f32) -> SdcResult<GrayImage> {
    let (dst_width, dst_height) = scaled_size(src.width(), src.height(), scale)?;
    if dst_width == src.width() && dst_height == src.height() {
        return Ok(src.clone());
    }

    let x_taps = axis_taps(src.width(), dst_width);
    let y_taps = axis_taps(src.height(), dst_height);
    let data = src.data();

    // Horizontal pass into a dst_width x src_height buffer.
    let tmp_len = dst_width
        .checked_mul(src.height())
        .filter(|&len| len <= MAX_PIXELS)
        .ok_or(OVERSIZED)?;
    let mut tmp = vec![0.0f32; tmp_len];
    for y in 0..src.height() {
        let row = &data[y * src.width()..(y + 1) * src.width()];
        for (x, taps) in x_taps.iter().enumerate() {
            tmp[y * dst_width + x] = taps.iter().map(|&(sx, w)| row[sx] * w).sum();
        }
    }

    let max = src.scale().max_value();
    let mut out = vec![0.0f32; dst_width * dst_height];
    for (y, taps) in y_taps.iter().enumerate() {
        for x in 0..dst_width {
            let value: f32 = taps.iter().map(|&(sy, w)| tmp[sy * dst_width + x] * w).sum();
            out[y * dst_width + x] = value.clamp(0.0, max);
        }
    }

    Ok(GrayImage::from_parts(out, dst_width, dst_height, src.scale()))
}

/// Rotates an image counter-clockwise about its center using bilinear
/// sampling.
///
/// The center is `((w - 1) / 2, (h - 1) / 2)`. Each destination pixel is
/// mapped into the source with the inverse rotation; samples falling outside
/// the source are set to `fill`. The output keeps the input dimensions.
pub fn rotate_bilinear(src: &GrayImage, angle_deg: f32, fill: f32) -> SdcResult<GrayImage> {
    if !angle_deg.is_finite() {
        return Err(SdcError::InvalidParameter {
            reason: "rotation angle must be finite",
        });
    }
    if is_identity_angle(angle_deg) {
        return Ok(src.clone());
    }

    let width = src.width();
    let height = src.height();
    let data = src.data();
    let max = src.scale().max_value();
    let mut out = vec![fill; width * height];

    let (sin_a, cos_a) = sin_cos_deg(angle_deg);
    let cx = (width as f32 - 1.0) * 0.5;
    let cy = (height as f32 - 1.0) * 0.5;
    let max_x = width as f32 - 1.0;
    let max_y = height as f32 - 1.0;
    let epsilon = 1e-4;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let src_x = cos_a * dx - sin_a * dy + cx;
            let src_y = sin_a * dx + cos_a * dy + cy;

            if src_x < -epsilon
                || src_y < -epsilon
                || src_x > max_x + epsilon
                || src_y > max_y + epsilon
            {
                continue;
            }

            let src_x = src_x.clamp(0.0, max_x);
            let src_y = src_y.clamp(0.0, max_y);
            let x0 = src_x.floor() as usize;
            let y0 = src_y.floor() as usize;
            let x1 = (x0 + 1).min(width - 1);
            let y1 = (y0 + 1).min(height - 1);
            let fx = src_x - x0 as f32;
            let fy = src_y - y0 as f32;

            let a = data[y0 * width + x0];
            let b = data[y0 * width + x1];
            let c = data[y1 * width + x0];
            let d = data[y1 * width + x1];

            let value = a * (1.0 - fx) * (1.0 - fy)
                + b * fx * (1.0 - fy)
                + c * (1.0 - fx) * fy
                + d * fx * fy;
            out[y * width + x] = value.clamp(0.0, max);
        }
    }

    Ok(GrayImage::from_parts(out, width, height, src.scale()))
}

fn validate_scale(scale: f32) -> SdcResult<()> {
    if !scale.is_finite() {
        return Err(SdcError::InvalidParameter {
            reason: "scale factor must be finite",
        });
    }
    if scale <= 0.0 {
        return Err(SdcError::InvalidParameter {
            reason: "scale factor must be > 0",
        });
    }
    Ok(())
}

fn scaled_len(len: usize, scale: f32) -> SdcResult<usize> {
    let scaled = (len as f64 * f64::from(scale)).round();
    if scaled > MAX_PIXELS as f64 {
        return Err(OVERSIZED);
    }
    Ok((scaled as usize).max(1))
}

/// Computes `(source index, weight)` taps for every destination sample.
///
/// Weights of each destination sample sum to one.
fn axis_taps(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f32)>> {
    let ratio = src_len as f64 / dst_len as f64;
    let mut taps = Vec::with_capacity(dst_len);
    for i in 0..dst_len {
        if dst_len <= src_len {
            let start = i as f64 * ratio;
            let end = ((i + 1) as f64 * ratio).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);
            let mut row = Vec::with_capacity(last - first);
            for s in first..last {
                let overlap = end.min((s + 1) as f64) - start.max(s as f64);
                if overlap > 0.0 {
                    row.push((s, (overlap / ratio) as f32));
                }
            }
            taps.push(row);
        } else {
            let center = ((i as f64 + 0.5) * ratio - 0.5).clamp(0.0, (src_len - 1) as f64);
            let s0 = center.floor() as usize;
            let s1 = (s0 + 1).min(src_len - 1);
            let f = (center - s0 as f64) as f32;
            if s1 == s0 || f == 0.0 {
                taps.push(vec![(s0, 1.0)]);
            } else {
                taps.push(vec![(s0, 1.0 - f), (s1, f)]);
            }
        }
    }
    taps
}
