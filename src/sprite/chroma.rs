use image::{Rgba, RgbaImage};

/// Default per-channel distance from pure #00FF00 still treated as key color
pub const DEFAULT_TOLERANCE: u8 = 80;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Make every green-screen pixel fully transparent.
///
/// A pixel is keyed out if either test matches:
/// - green dominates: `g > 150` and both red and blue sit more than 30 below green
/// - it lies within `tolerance` of pure `#00FF00` on every channel
///
/// Keyed pixels become `(0, 0, 0, 0)`; everything else is left as is.
pub fn remove_chroma_key(image: &mut RgbaImage, tolerance: u8) {
    for pixel in image.pixels_mut() {
        if is_key_color(*pixel, tolerance) {
            *pixel = TRANSPARENT;
        }
    }
}

fn is_key_color(pixel: Rgba<u8>, tolerance: u8) -> bool {
    let [r, g, b, _] = pixel.0;
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let tolerance = i32::from(tolerance);

    let green_dominant = g > 150 && r < g - 30 && b < g - 30;
    let near_key = r < tolerance && (255 - g) < tolerance && b < tolerance;

    green_dominant || near_key
}
