//! SIMD-accelerated kernel using the `wide` crate.
//!
//! The inner pixel loop of each template row is vectorized four pixels at a
//! time with `f64x4`; the row remainder falls back to scalar code.

use crate::kernel::scalar::fits;
use crate::kernel::Kernel;
use crate::ImageView;
use wide::f64x4;

const LANES: usize = 4;

/// Loads four `f32` values widened to `f64x4`.
#[inline]
fn load_f32x4_as_f64x4(slice: &[f32]) -> f64x4 {
    f64x4::from([
        f64::from(slice[0]),
        f64::from(slice[1]),
        f64::from(slice[2]),
        f64::from(slice[3]),
    ])
}

/// Horizontal sum of `f64x4`.
#[inline]
fn hsum(v: f64x4) -> f64 {
    let arr = v.to_array();
    arr[0] + arr[1] + arr[2] + arr[3]
}

/// SIMD mean-squared-difference kernel.
pub struct SdcSimd;

impl Kernel for SdcSimd {
    fn score_at(image: ImageView<'_, f32>, tpl: ImageView<'_, f32>, x: usize, y: usize) -> f64 {
        let tpl_width = tpl.width();
        let tpl_height = tpl.height();
        if !fits(image, tpl, x, y) {
            return f64::INFINITY;
        }

        let simd_end = tpl_width / LANES * LANES;
        let mut sse_vec = f64x4::ZERO;
        let mut sse_s = 0.0f64;

        for ty in 0..tpl_height {
            let (Some(img_row), Some(tpl_row)) = (image.row(y + ty), tpl.row(ty)) else {
                return f64::INFINITY;
            };
            let img_row = &img_row[x..x + tpl_width];

            let mut tx = 0;
            while tx < simd_end {
                let diff = load_f32x4_as_f64x4(&img_row[tx..])
                    - load_f32x4_as_f64x4(&tpl_row[tx..]);
                sse_vec += diff * diff;
                tx += LANES;
            }

            while tx < tpl_width {
                let diff = f64::from(img_row[tx]) - f64::from(tpl_row[tx]);
                sse_s += diff * diff;
                tx += 1;
            }
        }

        (hsum(sse_vec) + sse_s) / (tpl_width * tpl_height) as f64
    }
}
