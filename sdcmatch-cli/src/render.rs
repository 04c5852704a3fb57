//! Bounding-box rendering onto color images.

use image::{Rgb, RgbImage};
use sdcmatch::SearchResult;

/// Strokes the outline of a match onto `img`.
///
/// The stroke lies inside the box and is clipped to the image; `thickness`
/// larger than half the box fills it.
pub fn draw_border(img: &mut RgbImage, result: &SearchResult, color: [u8; 3], thickness: u32) {
    let img_w = img.width() as usize;
    let img_h = img.height() as usize;
    let top = result.top_left.row;
    let left = result.top_left.col;
    let bottom = (top + result.height).min(img_h);
    let right = (left + result.width).min(img_w);
    let t = thickness as usize;

    for y in top..bottom {
        for x in left..right {
            let on_edge = y < top + t
                || y + t >= top + result.height
                || x < left + t
                || x + t >= left + result.width;
            if on_edge {
                img.put_pixel(x as u32, y as u32, Rgb(color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::draw_border;
    use image::{Rgb, RgbImage};
    use sdcmatch::{Position, SearchResult};

    fn result(row: usize, col: usize, width: usize, height: usize) -> SearchResult {
        SearchResult {
            top_left: Position::new(row, col),
            width,
            height,
            score: 0.0,
            variant_index: 0,
            scale: 1.0,
            angle_deg: 0.0,
        }
    }

    #[test]
    fn strokes_edges_and_leaves_interior() {
        let mut img = RgbImage::new(10, 10);
        draw_border(&mut img, &result(2, 3, 5, 4), [255, 0, 0], 1);
        let red = Rgb([255, 0, 0]);
        assert_eq!(*img.get_pixel(3, 2), red);
        assert_eq!(*img.get_pixel(7, 5), red);
        assert_eq!(*img.get_pixel(5, 3), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(8, 2), Rgb([0, 0, 0]));
    }

    #[test]
    fn clips_to_image_bounds() {
        let mut img = RgbImage::new(4, 4);
        draw_border(&mut img, &result(2, 2, 5, 5), [0, 255, 0], 5);
        assert_eq!(*img.get_pixel(3, 3), Rgb([0, 255, 0]));
    }
}
