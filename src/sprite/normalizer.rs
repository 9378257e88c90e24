use image::{RgbaImage, imageops::FilterType};

use super::{
    DEFAULT_PADDING, DEFAULT_PASSES, DEFAULT_TOLERANCE, SpriteSpec, TargetSize, content_bounds,
    crop_to_content, defringe, remove_chroma_key, resize_to_canvas,
};

/// Tunables for the sprite normalization pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    /// Chroma key tolerance around pure #00FF00
    pub tolerance: u8,
    /// Number of defringe erosion passes
    pub defringe_passes: u32,
    /// Transparent margin kept when cropping to content
    pub crop_padding: u32,
    /// Resampling filter used for the final resize
    pub filter: FilterType,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            defringe_passes: DEFAULT_PASSES,
            crop_padding: DEFAULT_PADDING,
            filter: FilterType::Lanczos3,
        }
    }
}

/// A raster ready to be written out
#[derive(Debug, Clone)]
pub struct Normalized {
    pub image: RgbaImage,
    /// False when keying left nothing visible (e.g. a fully green source)
    pub has_visible_content: bool,
}

/// Result of running a sprite through [`Normalizer::process`]
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The image already matches its target and was left alone
    AlreadyProcessed,
    Normalized(Normalized),
}

impl Normalizer {
    pub fn tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn defringe_passes(mut self, passes: u32) -> Self {
        self.defringe_passes = passes;
        self
    }

    pub fn crop_padding(mut self, padding: u32) -> Self {
        self.crop_padding = padding;
        self
    }

    pub fn filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Run the full pipeline on one raster.
    ///
    /// Sprites go through chroma keying, defringing, cropping and a centered
    /// aspect-preserving resize. Backgrounds are only stretched to `target`.
    pub fn normalize(
        &self,
        image: RgbaImage,
        target: TargetSize,
        is_background: bool,
    ) -> Normalized {
        if is_background {
            return Normalized {
                image: resize_to_canvas(&image, target, true, self.filter),
                has_visible_content: true,
            };
        }

        let mut image = image;
        remove_chroma_key(&mut image, self.tolerance);
        defringe(&mut image, self.defringe_passes);

        let has_visible_content = content_bounds(&image).is_some();
        let image = crop_to_content(image, self.crop_padding);

        Normalized {
            image: resize_to_canvas(&image, target, false, self.filter),
            has_visible_content,
        }
    }

    /// Normalize a sprite unless it already looks processed (and `force` is off)
    pub fn process(&self, image: RgbaImage, spec: &SpriteSpec, force: bool) -> Outcome {
        let is_background = spec.is_background();

        if !force && is_already_processed(&image, spec.target_size, is_background) {
            return Outcome::AlreadyProcessed;
        }

        Outcome::Normalized(self.normalize(image, spec.target_size, is_background))
    }
}

/// An image at its target size counts as processed if it is a background,
/// or if it carries any transparency.
pub fn is_already_processed(image: &RgbaImage, target: TargetSize, is_background: bool) -> bool {
    if image.dimensions() != target.dimensions() {
        return false;
    }

    is_background || image.pixels().any(|p| p[3] < 255)
}
