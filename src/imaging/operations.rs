//! Exact pixel operations: crop, paste, and black canvases.
//!
//! Unlike resampling these have a single correct answer, so they are plain
//! functions over `RgbImage` rather than backend methods.

use image::{Rgb, RgbImage, imageops};

/// Solid black, the letterbox colour.
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Copy the `width` × `height` rectangle at (`x`, `y`) into a new buffer.
///
/// The rectangle is clipped to the image bounds.
pub fn crop_box(image: &RgbImage, x: u32, y: u32, width: u32, height: u32) -> RgbImage {
    imageops::crop_imm(image, x, y, width, height).to_image()
}

/// A new all-black buffer.
pub fn black_canvas(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, BLACK)
}

/// Copy `src` into `dest` with its top-left corner at (`x`, `y`).
///
/// Parts of `src` that fall outside `dest` are dropped.
pub fn paste(dest: &mut RgbImage, src: &RgbImage, x: u32, y: u32) {
    imageops::replace(dest, src, i64::from(x), i64::from(y));
}

/// Place `image` on a black canvas of `width` × `height` at (`x`, `y`).
pub fn pad(image: &RgbImage, width: u32, height: u32, x: u32, y: u32) -> RgbImage {
    let mut canvas = black_canvas(width, height);
    paste(&mut canvas, image, x, y);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 7]))
    }

    #[test]
    fn crop_copies_region() {
        let img = checker(10, 8);
        let cropped = crop_box(&img, 2, 3, 4, 2);
        assert_eq!(cropped.dimensions(), (4, 2));
        assert_eq!(*cropped.get_pixel(0, 0), Rgb([2, 3, 7]));
        assert_eq!(*cropped.get_pixel(3, 1), Rgb([5, 4, 7]));
    }

    #[test]
    fn crop_clips_to_bounds() {
        let img = checker(10, 8);
        let cropped = crop_box(&img, 8, 0, 5, 8);
        assert_eq!(cropped.dimensions(), (2, 8));
    }

    #[test]
    fn canvas_is_black() {
        let canvas = black_canvas(3, 2);
        assert!(canvas.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn paste_places_at_offset() {
        let mut dest = black_canvas(6, 4);
        let src = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        paste(&mut dest, &src, 3, 1);
        assert_eq!(*dest.get_pixel(3, 1), Rgb([255, 255, 255]));
        assert_eq!(*dest.get_pixel(4, 2), Rgb([255, 255, 255]));
        assert_eq!(*dest.get_pixel(2, 1), BLACK);
        assert_eq!(*dest.get_pixel(5, 1), BLACK);
    }

    #[test]
    fn paste_drops_overflow() {
        let mut dest = black_canvas(4, 4);
        let src = RgbImage::from_pixel(3, 3, Rgb([1, 2, 3]));
        paste(&mut dest, &src, 2, 2);
        assert_eq!(*dest.get_pixel(3, 3), Rgb([1, 2, 3]));
        assert_eq!(dest.dimensions(), (4, 4));
    }

    #[test]
    fn pad_surrounds_with_black() {
        let src = RgbImage::from_pixel(2, 2, Rgb([9, 9, 9]));
        let padded = pad(&src, 2, 6, 0, 2);
        assert_eq!(padded.dimensions(), (2, 6));
        let column: Vec<Rgb<u8>> = (0..6).map(|y| *padded.get_pixel(0, y)).collect();
        assert_eq!(
            column,
            vec![BLACK, BLACK, Rgb([9, 9, 9]), Rgb([9, 9, 9]), BLACK, BLACK]
        );
    }
}
