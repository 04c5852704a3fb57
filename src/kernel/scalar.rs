//! Scalar reference kernel.

use crate::kernel::Kernel;
use crate::ImageView;

/// Scalar mean-squared-difference kernel.
pub struct SdcScalar;

impl Kernel for SdcScalar {
    fn score_at(image: ImageView<'_, f32>, tpl: ImageView<'_, f32>, x: usize, y: usize) -> f64 {
        let tpl_width = tpl.width();
        let tpl_height = tpl.height();
        if !fits(image, tpl, x, y) {
            return f64::INFINITY;
        }

        let mut sse = 0.0f64;
        for ty in 0..tpl_height {
            let (Some(img_row), Some(tpl_row)) = (image.row(y + ty), tpl.row(ty)) else {
                return f64::INFINITY;
            };
            for (&value, &t) in img_row[x..x + tpl_width].iter().zip(tpl_row) {
                let diff = f64::from(value) - f64::from(t);
                sse += diff * diff;
            }
        }

        sse / (tpl_width * tpl_height) as f64
    }
}

/// Returns true if the template placed at `(x, y)` lies inside the image.
#[inline]
pub(crate) fn fits(image: ImageView<'_, f32>, tpl: ImageView<'_, f32>, x: usize, y: usize) -> bool {
    tpl.width() <= image.width()
        && tpl.height() <= image.height()
        && x <= image.width() - tpl.width()
        && y <= image.height() - tpl.height()
}

#[cfg(test)]
mod tests {
    use super::SdcScalar;
    use crate::kernel::Kernel;
    use crate::ImageView;

    #[test]
    fn score_is_mean_squared_difference() {
        let image = [0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0];
        let tpl = [1.0f32, 1.0, 4.0, 4.0];
        let image = ImageView::from_slice(&image, 3, 2).unwrap();
        let tpl = ImageView::from_slice(&tpl, 2, 2).unwrap();
        // diffs at (0,0): -1, 0, -1, 0 -> 2 / 4
        assert_eq!(SdcScalar::score_at(image, tpl, 0, 0), 0.5);
        // diffs at (1,0): 0, 1, 0, 1 -> 2 / 4
        assert_eq!(SdcScalar::score_at(image, tpl, 1, 0), 0.5);
        assert_eq!(SdcScalar::score_at(image, tpl, 2, 0), f64::INFINITY);
    }

    #[test]
    fn scan_full_finds_exact_patch() {
        let image: Vec<f32> = (0..20).map(|v| v as f32).collect();
        let tpl = [6.0f32, 7.0, 11.0, 12.0];
        let image = ImageView::from_slice(&image, 5, 4).unwrap();
        let tpl = ImageView::from_slice(&tpl, 2, 2).unwrap();
        let best = SdcScalar::scan_full(image, tpl).unwrap();
        assert_eq!((best.row, best.col), (1, 1));
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn scan_full_rejects_oversized_template() {
        let image = [0.0f32; 4];
        let tpl = [0.0f32; 6];
        let image = ImageView::from_slice(&image, 2, 2).unwrap();
        let tpl = ImageView::from_slice(&tpl, 3, 2).unwrap();
        assert!(SdcScalar::scan_full(image, tpl).is_none());
    }
}
