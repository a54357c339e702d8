//! Border-connected flood fill over a pixel grid.
//!
//! The fill uses an explicit work list and a dense row-major visited grid, so
//! very large images cannot overflow the call stack.

use image::RgbImage;

use crate::predicate::BackgroundPredicate;

/// The four corner coordinates of a `width` x `height` image.
///
/// For 1-pixel-wide or 1-pixel-tall images some corners coincide; duplicates
/// are harmless because visited pixels are skipped.
#[must_use]
pub fn corner_seeds(width: u32, height: u32) -> [(u32, u32); 4] {
    let (x_max, y_max) = (width.saturating_sub(1), height.saturating_sub(1));
    [(0, 0), (x_max, 0), (0, y_max), (x_max, y_max)]
}

/// Mark every background pixel reachable from `seeds` through 4-connected
/// background pixels.
///
/// Returns a `width * height` grid indexed as `y * width + x`. Seeds that lie
/// outside the image or on a non-background pixel contribute nothing.
#[must_use]
pub fn flood_fill(
    image: &RgbImage,
    predicate: &BackgroundPredicate,
    seeds: &[(u32, u32)],
) -> Vec<bool> {
    let mut visited = vec![false; image.width() as usize * image.height() as usize];
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for &(x, y) in seeds {
        admit(image, predicate, &mut visited, &mut stack, x, y);
    }
    while let Some((x, y)) = stack.pop() {
        // Underflow wraps to u32::MAX, which the bounds check rejects.
        for (nx, ny) in [
            (x.wrapping_sub(1), y),
            (x.saturating_add(1), y),
            (x, y.wrapping_sub(1)),
            (x, y.saturating_add(1)),
        ] {
            admit(image, predicate, &mut visited, &mut stack, nx, ny);
        }
    }

    visited
}

/// Push `(x, y)` if it is an unvisited in-bounds background pixel, marking it
/// visited at push time so the stack never exceeds `width * height` entries.
fn admit(
    image: &RgbImage,
    predicate: &BackgroundPredicate,
    visited: &mut [bool],
    stack: &mut Vec<(u32, u32)>,
    x: u32,
    y: u32,
) {
    let (width, height) = image.dimensions();
    if x >= width || y >= height {
        return;
    }
    let idx = y as usize * width as usize + x as usize;
    if visited[idx] || !predicate.is_background(*image.get_pixel(x, y)) {
        return;
    }
    visited[idx] = true;
    stack.push((x, y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    #[test]
    fn corner_seeds_cover_all_corners() {
        assert_eq!(corner_seeds(4, 3), [(0, 0), (3, 0), (0, 2), (3, 2)]);
        assert_eq!(corner_seeds(1, 1), [(0, 0); 4]);
    }

    #[test]
    fn fill_stops_at_foreground_wall() {
        // Vertical black line at x = 2 splits a 5x3 white image.
        let img = RgbImage::from_fn(5, 3, |x, _| if x == 2 { BLACK } else { WHITE });
        let visited = flood_fill(&img, &BackgroundPredicate::default(), &[(0, 0)]);
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(visited[y * 5 + x], x < 2, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn fill_does_not_cross_diagonals() {
        // Checkerboard: white cells only touch diagonally.
        let img =
            RgbImage::from_fn(3, 3, |x, y| if (x + y) % 2 == 0 { WHITE } else { BLACK });
        let visited = flood_fill(&img, &BackgroundPredicate::default(), &[(0, 0)]);
        assert_eq!(visited.iter().filter(|&&v| v).count(), 1);
    }

    #[test]
    fn out_of_bounds_and_foreground_seeds_are_ignored() {
        let img = RgbImage::from_pixel(2, 2, BLACK);
        let visited = flood_fill(&img, &BackgroundPredicate::default(), &[(5, 5), (0, 0)]);
        assert!(visited.iter().all(|&v| !v));
    }

    #[test]
    fn large_open_image_fills_without_recursion() {
        let img = RgbImage::from_pixel(600, 600, WHITE);
        let visited = flood_fill(&img, &BackgroundPredicate::default(), &corner_seeds(600, 600));
        assert!(visited.iter().all(|&v| v));
    }

    #[test]
    fn admit_pushes_each_pixel_once() {
        let img = RgbImage::from_pixel(3, 3, WHITE);
        let predicate = BackgroundPredicate::default();
        let mut visited = vec![false; 9];
        let mut stack = Vec::new();
        for (x, y) in [(1, 1), (1, 1), (3, 0), (0, u32::MAX)] {
            admit(&img, &predicate, &mut visited, &mut stack, x, y);
        }
        assert_eq!(stack, vec![(1, 1)]);
        assert!(visited[4]);
    }

    #[test]
    fn duplicate_corner_seeds_fill_once() {
        let img = RgbImage::from_pixel(1, 5, WHITE);
        let visited = flood_fill(&img, &BackgroundPredicate::default(), &corner_seeds(1, 5));
        assert_eq!(visited, vec![true; 5]);
    }
}
