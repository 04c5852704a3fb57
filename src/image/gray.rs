//! Owned grayscale buffers with a declared intensity scale.

use crate::image::ImageView;
use crate::util::{SdcError, SdcResult};

/// Intensity range that pixel values are normalized to.
///
/// Scores are only comparable between images that share a scale, so every
/// `GrayImage` records the range it was decoded into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntensityScale {
    /// Fractional intensities in `[0, 1]`.
    #[default]
    Unit,
    /// 8-bit intensities in `[0, 255]`.
    Byte,
}

impl IntensityScale {
    /// Largest representable intensity.
    pub fn max_value(self) -> f32 {
        match self {
            IntensityScale::Unit => 1.0,
            IntensityScale::Byte => 255.0,
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            IntensityScale::Unit => "unit",
            IntensityScale::Byte => "byte",
        }
    }
}

/// Owned contiguous grayscale image with real-valued intensities.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayImage {
    data: Vec<f32>,
    width: usize,
    height: usize,
    scale: IntensityScale,
}

impl GrayImage {
    /// Creates an image from a row-major buffer of exactly `width * height`
    /// pixels, each finite and inside `scale`'s range.
    pub fn new(
        data: Vec<f32>,
        width: usize,
        height: usize,
        scale: IntensityScale,
    ) -> SdcResult<Self> {
        if width == 0 || height == 0 {
            return Err(SdcError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(SdcError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(SdcError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(SdcError::BufferLengthMismatch {
                expected: needed,
                got: data.len(),
            });
        }
        let max = scale.max_value();
        if let Some((index, &value)) = data
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0 || **v > max)
        {
            return Err(SdcError::PixelOutOfRange { index, value, max });
        }
        Ok(Self {
            data,
            width,
            height,
            scale,
        })
    }

    /// Creates a `Byte`-scale image from 8-bit samples.
    pub fn from_u8(data: &[u8], width: usize, height: usize) -> SdcResult<Self> {
        let data = data.iter().map(|&v| f32::from(v)).collect();
        Self::new(data, width, height, IntensityScale::Byte)
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, scale: IntensityScale, mut f: F) -> SdcResult<Self>
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut data = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(data, width, height, scale)
    }

    /// Copies a view into a new image.
    pub fn from_view(view: ImageView<'_, f32>, scale: IntensityScale) -> SdcResult<Self> {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for y in 0..view.height() {
            let row = view.row(y).ok_or(SdcError::BufferTooSmall {
                needed: (y + 1) * view.stride(),
                got: view.as_slice().len(),
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, view.width(), view.height(), scale)
    }

    /// Wraps a buffer already known to satisfy the invariants.
    pub(crate) fn from_parts(
        data: Vec<f32>,
        width: usize,
        height: usize,
        scale: IntensityScale,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
            scale,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the intensity scale the pixels are expressed in.
    pub fn scale(&self) -> IntensityScale {
        self.scale
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, f32> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Copies the `width x height` region at `(x, y)` into a new image.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> SdcResult<Self> {
        let roi = self.view().roi(x, y, width, height)?;
        Self::from_view(roi, self.scale)
    }

    /// Rescales intensities into another range.
    pub fn to_scale(&self, scale: IntensityScale) -> Self {
        if scale == self.scale {
            return self.clone();
        }
        let factor = scale.max_value() / self.scale.max_value();
        let max = scale.max_value();
        let data = self
            .data
            .iter()
            .map(|&v| (v * factor).clamp(0.0, max))
            .collect();
        Self::from_parts(data, self.width, self.height, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::{GrayImage, IntensityScale};
    use crate::util::SdcError;

    #[test]
    fn rejects_pixels_outside_declared_range() {
        let err = GrayImage::new(vec![0.0, 0.5, 1.5, 0.2], 2, 2, IntensityScale::Unit)
            .err()
            .unwrap();
        assert_eq!(
            err,
            SdcError::PixelOutOfRange {
                index: 2,
                value: 1.5,
                max: 1.0,
            }
        );
        assert!(GrayImage::new(vec![0.0, f32::NAN], 2, 1, IntensityScale::Byte).is_err());
    }

    #[test]
    fn rejects_buffer_length_mismatch() {
        let err = GrayImage::new(vec![0.0; 3], 2, 2, IntensityScale::Unit)
            .err()
            .unwrap();
        assert_eq!(err, SdcError::BufferTooSmall { needed: 4, got: 3 });
        let err = GrayImage::new(vec![0.0; 5], 2, 2, IntensityScale::Unit)
            .err()
            .unwrap();
        assert_eq!(
            err,
            SdcError::BufferLengthMismatch {
                expected: 4,
                got: 5,
            }
        );
        assert!(err.is_invalid_parameter());
        assert_eq!(err.to_string(), "buffer length mismatch: expected 4, got 5");
    }

    #[test]
    fn byte_to_unit_conversion() {
        let img = GrayImage::from_u8(&[0, 51, 255, 102], 2, 2).unwrap();
        let unit = img.to_scale(IntensityScale::Unit);
        assert_eq!(unit.scale(), IntensityScale::Unit);
        let expected = [0.0f32, 0.2, 1.0, 0.4];
        for (v, e) in unit.data().iter().zip(expected.iter()) {
            assert!((v - e).abs() < 1e-6);
        }
    }

    #[test]
    fn crop_copies_region() {
        let img = GrayImage::from_fn(4, 3, IntensityScale::Byte, |x, y| (y * 4 + x) as f32).unwrap();
        let crop = img.crop(1, 1, 2, 2).unwrap();
        assert_eq!(crop.data(), &[5.0, 6.0, 9.0, 10.0]);
        assert!(img.crop(3, 2, 2, 2).is_err());
    }
}
