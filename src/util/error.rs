//! Error types for sdcmatch.

use thiserror::Error;

/// Result alias for sdcmatch operations.
pub type SdcResult<T> = std::result::Result<T, SdcError>;

/// Errors that can occur when generating variants or running a search.
///
/// "No match" is never an error: searches report it as `Ok(None)`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SdcError {
    /// A caller-supplied parameter is out of range (scale, angle, threshold).
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: &'static str },
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the declared layout needs.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Owned buffer holds more pixels than `width * height`.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch { expected: usize, got: usize },
    /// A pixel is non-finite or outside the declared intensity range.
    #[error("pixel {index} has value {value}, outside [0, {max}]")]
    PixelOutOfRange { index: usize, value: f32, max: f32 },
    /// Target and template were normalized to different intensity scales.
    #[error("intensity scale mismatch: target is {target}, template is {template}")]
    IntensityMismatch {
        target: &'static str,
        template: &'static str,
    },
    /// Region and variant passed to the scorer differ in size.
    #[error("size mismatch: region {region_width}x{region_height}, variant {variant_width}x{variant_height}")]
    SizeMismatch {
        region_width: usize,
        region_height: usize,
        variant_width: usize,
        variant_height: usize,
    },
    /// The template cannot be placed anywhere inside the image.
    #[error("template {tpl_width}x{tpl_height} is larger than image {img_width}x{img_height}")]
    TemplateTooLarge {
        tpl_width: usize,
        tpl_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A region of interest does not fit inside its parent view.
    #[error("roi out of bounds: x={x}, y={y}, {width}x{height} in {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Image decoding or encoding failed.
    #[cfg(feature = "image-io")]
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}

impl SdcError {
    /// Returns true for errors caused by malformed caller input.
    ///
    /// Dimension, stride, buffer, pixel range and intensity scale failures
    /// are all refinements of an invalid parameter.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            SdcError::InvalidParameter { .. }
                | SdcError::InvalidDimensions { .. }
                | SdcError::InvalidStride { .. }
                | SdcError::BufferTooSmall { .. }
                | SdcError::BufferLengthMismatch { .. }
                | SdcError::PixelOutOfRange { .. }
                | SdcError::IntensityMismatch { .. }
        )
    }
}
