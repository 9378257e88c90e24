use image::{Rgba, Rgba32FImage, RgbaImage, imageops, imageops::FilterType};

use super::TargetSize;

/// Fit an image onto a canvas of exactly `target` pixels.
///
/// Backgrounds are stretched to fill the canvas. Everything else is scaled
/// to fit while keeping its aspect ratio, then centered on a transparent canvas.
pub fn resize_to_canvas(
    image: &RgbaImage,
    target: TargetSize,
    is_background: bool,
    filter: FilterType,
) -> RgbaImage {
    let (target_width, target_height) = target.dimensions();

    if is_background {
        return resample(image, target_width, target_height, filter);
    }

    let mut canvas = RgbaImage::new(target_width, target_height);
    if image.width() == 0 || image.height() == 0 {
        return canvas;
    }

    let (new_width, new_height) = fit_dimensions(image.dimensions(), target);
    let resized = resample(image, new_width, new_height, filter);

    let x_offset = (target_width - new_width) / 2;
    let y_offset = (target_height - new_height) / 2;
    imageops::overlay(
        &mut canvas,
        &resized,
        i64::from(x_offset),
        i64::from(y_offset),
    );

    canvas
}

/// Resize with premultiplied alpha so transparent pixels don't bleed their
/// (black) color into visible edges.
fn resample(image: &RgbaImage, width: u32, height: u32, filter: FilterType) -> RgbaImage {
    let premultiplied = Rgba32FImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0.map(|c| f32::from(c) / 255.0);
        Rgba([r * a, g * a, b * a, a])
    });

    let resized = imageops::resize(&premultiplied, width, height, filter);

    RgbaImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0;
        let alpha = to_channel(a);
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        Rgba([to_channel(r / a), to_channel(g / a), to_channel(b / a), alpha])
    })
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0..=255 before the cast"
)]
fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Largest size with the source's aspect ratio that fits inside `target`
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "rounded sides are positive and never exceed the target"
)]
pub fn fit_dimensions((width, height): (u32, u32), target: TargetSize) -> (u32, u32) {
    let orig_ratio = f64::from(width) / f64::from(height);

    if orig_ratio > target.ratio() {
        let new_height = (f64::from(target.width) / orig_ratio).round() as u32;
        (target.width, new_height.clamp(1, target.height))
    } else {
        let new_width = (f64::from(target.height) * orig_ratio).round() as u32;
        (new_width.clamp(1, target.width), target.height)
    }
}
