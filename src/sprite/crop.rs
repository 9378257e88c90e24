use image::RgbaImage;

/// Default transparent margin kept around cropped content
pub const DEFAULT_PADDING: u32 = 2;

/// Inclusive pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Bounds {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

/// Find the bounding box of all pixels with non-zero alpha
pub fn content_bounds(image: &RgbaImage) -> Option<Bounds> {
    let (width, height) = image.dimensions();

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0u32;
    let mut max_y = 0u32;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] > 0 {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    // Fully transparent (or empty) image
    if max_x < min_x || max_y < min_y {
        return None;
    }

    Some(Bounds {
        min_x,
        min_y,
        max_x,
        max_y,
    })
}

/// Crop to visible content plus `padding` pixels on every side, clamped to the image.
///
/// An image with no visible pixels is returned unchanged.
pub fn crop_to_content(image: RgbaImage, padding: u32) -> RgbaImage {
    let Some(bounds) = content_bounds(&image) else {
        return image;
    };
    let (width, height) = image.dimensions();

    let left = bounds.min_x.saturating_sub(padding);
    let top = bounds.min_y.saturating_sub(padding);
    let right = (bounds.min_x + bounds.width()).saturating_add(padding).min(width);
    let bottom = (bounds.min_y + bounds.height()).saturating_add(padding).min(height);

    if left == 0 && top == 0 && right == width && bottom == height {
        return image;
    }

    image::imageops::crop_imm(&image, left, top, right - left, bottom - top).to_image()
}
