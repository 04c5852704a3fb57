//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Decoded images are
//! converted to luminance in `[0, 1]`; alpha is dropped.

use crate::image::{GrayImage, IntensityScale};
use crate::util::{SdcError, SdcResult};
use std::path::Path;

/// Creates a `Byte`-scale image from an 8-bit grayscale buffer.
pub fn gray_from_luma8(img: &image::GrayImage) -> SdcResult<GrayImage> {
    GrayImage::from_u8(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Converts a decoded image of any color type to `Unit`-scale luminance.
pub fn gray_from_dynamic_image(img: &image::DynamicImage) -> SdcResult<GrayImage> {
    let luma = img.to_luma32f();
    let width = luma.width() as usize;
    let height = luma.height() as usize;
    let data = luma
        .into_raw()
        .into_iter()
        .map(|v| v.clamp(0.0, 1.0))
        .collect();
    GrayImage::new(data, width, height, IntensityScale::Unit)
}

/// Loads an image from disk and converts it to `Unit`-scale luminance.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> SdcResult<GrayImage> {
    let img = image::open(path).map_err(|err| SdcError::ImageIo {
        reason: err.to_string(),
    })?;
    gray_from_dynamic_image(&img)
}

#[cfg(test)]
mod tests {
    use super::{gray_from_dynamic_image, gray_from_luma8};
    use crate::image::IntensityScale;

    #[test]
    fn rgb_white_maps_to_unit_one() {
        let rgb = image::RgbImage::from_pixel(3, 2, image::Rgb([255, 255, 255]));
        let gray = gray_from_dynamic_image(&image::DynamicImage::ImageRgb8(rgb)).unwrap();
        assert_eq!(gray.scale(), IntensityScale::Unit);
        assert_eq!((gray.width(), gray.height()), (3, 2));
        assert!(gray.data().iter().all(|&v| (v - 1.0).abs() < 1e-5));
    }

    #[test]
    fn luma8_keeps_byte_scale() {
        let luma = image::GrayImage::from_raw(2, 1, vec![7, 200]).unwrap();
        let gray = gray_from_luma8(&luma).unwrap();
        assert_eq!(gray.scale(), IntensityScale::Byte);
        assert_eq!(gray.data(), &[7.0, 200.0]);
    }
}
