use image::{Rgba, RgbaImage};

/// Default number of erosion passes
pub const DEFAULT_PASSES: u32 = 1;

/// Strip green-tinted, semi-transparent fringe pixels that border transparency.
///
/// Each pass walks the image row by row and mutates in place, so a pixel
/// cleared earlier in a pass already counts as a transparent neighbor for
/// pixels visited after it. Every extra pass erodes at least one more ring.
pub fn defringe(image: &mut RgbaImage, passes: u32) {
    let (width, height) = image.dimensions();

    for _ in 0..passes {
        for y in 0..height {
            for x in 0..width {
                let pixel = *image.get_pixel(x, y);
                if is_fringe(pixel) && has_transparent_neighbor(image, x, y) {
                    image.put_pixel(x, y, Rgba([0, 0, 0, 0]));
                }
            }
        }
    }
}

fn is_fringe(pixel: Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    let (r, g, b) = (u16::from(r), u16::from(g), u16::from(b));

    a > 0 && a < 200 && g > r + 30 && g > b + 30
}

/// Check the 4-connected neighbors that fall inside the image
fn has_transparent_neighbor(image: &RgbaImage, x: u32, y: u32) -> bool {
    let (width, height) = image.dimensions();
    let neighbors = [
        x.checked_sub(1).map(|nx| (nx, y)),
        (x + 1 < width).then_some((x + 1, y)),
        y.checked_sub(1).map(|ny| (x, ny)),
        (y + 1 < height).then_some((x, y + 1)),
    ];

    neighbors
        .into_iter()
        .flatten()
        .any(|(nx, ny)| image.get_pixel(nx, ny)[3] == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRINGE: Rgba<u8> = Rgba([40, 120, 40, 128]);
    const SOLID: Rgba<u8> = Rgba([200, 50, 50, 255]);

    #[test]
    fn test_fringe_next_to_transparency_removed() {
        let mut img = RgbaImage::new(3, 1);
        img.put_pixel(1, 0, FRINGE);
        img.put_pixel(2, 0, SOLID);

        defringe(&mut img, 1);

        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
        assert_eq!(*img.get_pixel(2, 0), SOLID);
    }

    #[test]
    fn test_opaque_green_kept() {
        // Alpha at or above 200 is treated as real artwork
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(1, 0, Rgba([40, 120, 40, 200]));

        defringe(&mut img, 1);

        assert_eq!(img.get_pixel(1, 0).0, [40, 120, 40, 200]);
    }

    #[test]
    fn test_fringe_without_transparent_neighbor_kept() {
        let mut img = RgbaImage::from_pixel(3, 3, SOLID);
        img.put_pixel(1, 1, FRINGE);

        defringe(&mut img, 1);

        assert_eq!(*img.get_pixel(1, 1), FRINGE);
    }

    #[test]
    fn test_diagonal_neighbor_does_not_count() {
        let mut img = RgbaImage::from_pixel(2, 2, SOLID);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 1, FRINGE);

        defringe(&mut img, 1);

        assert_eq!(*img.get_pixel(1, 1), FRINGE);
    }

    #[test]
    fn test_row_major_pass_sees_earlier_removals() {
        // A run of fringe starting at a transparent pixel collapses in one pass
        let mut img = RgbaImage::from_pixel(5, 1, FRINGE);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));

        defringe(&mut img, 1);

        assert!(img.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_passes_erode_inward() {
        // Transparency at the right edge only reaches back one pixel per pass
        let mut img = RgbaImage::from_pixel(4, 1, FRINGE);
        img.put_pixel(3, 0, Rgba([0, 0, 0, 0]));

        defringe(&mut img, 1);
        assert_eq!(img.get_pixel(2, 0)[3], 0);
        assert_eq!(*img.get_pixel(1, 0), FRINGE);

        defringe(&mut img, 2);
        assert!(img.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_zero_passes_is_noop() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(1, 0, FRINGE);

        defringe(&mut img, 0);

        assert_eq!(*img.get_pixel(1, 0), FRINGE);
    }
}
