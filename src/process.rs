//! Batch driver: load each sprite named in the manifest, normalize it and
//! write it back in place.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{ImageReader, RgbaImage};
use log::debug;
use rayon::prelude::*;

use crate::cli::CompressionLevel;
use crate::config::KilnConfig;
use crate::error::KilnError;
use crate::manifest::ManifestEntry;
use crate::output::save_sprite_image;
use crate::sprite::{Normalizer, Outcome, TargetSize};

/// Settings for one batch run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory the manifest filenames are relative to
    pub sprites_dir: PathBuf,
    pub normalizer: Normalizer,
    /// Reprocess images that already look processed
    pub force: bool,
    pub compress: Option<CompressionLevel>,
}

#[derive(Debug)]
pub enum SpriteStatus {
    Processed {
        source_size: (u32, u32),
        target_size: TargetSize,
        is_background: bool,
        has_visible_content: bool,
    },
    AlreadyProcessed,
    /// The sprite was skipped; its file is left untouched
    Failed(anyhow::Error),
}

/// What happened to a single manifest entry
#[derive(Debug)]
pub struct SpriteReport {
    pub id: String,
    pub filename: String,
    pub status: SpriteStatus,
}

impl SpriteReport {
    pub fn succeeded(&self) -> bool {
        !matches!(self.status, SpriteStatus::Failed(_))
    }
}

/// Summary of a single-file normalization
#[derive(Debug, Clone, Copy)]
pub struct FileReport {
    pub source_size: (u32, u32),
    pub has_visible_content: bool,
}

/// Process every entry independently and in parallel.
///
/// A failing sprite never stops the batch. Reports come back in manifest order.
/// Only the first entry for a given filename is processed; later ones fail,
/// since files are rewritten in place.
pub fn process_sprites(
    entries: &[ManifestEntry],
    config: &KilnConfig,
    options: &BatchOptions,
) -> Vec<SpriteReport> {
    let mut seen = HashSet::new();
    let first_use: Vec<bool> = entries
        .iter()
        .map(|entry| seen.insert(entry.filename.as_str()))
        .collect();

    entries
        .par_iter()
        .zip(first_use)
        .map(|(entry, first)| {
            let status = if first {
                process_entry(entry, config, options).unwrap_or_else(SpriteStatus::Failed)
            } else {
                SpriteStatus::Failed(KilnError::DuplicateFilename(entry.filename.clone()).into())
            };
            SpriteReport {
                id: entry.id.clone(),
                filename: entry.filename.clone(),
                status,
            }
        })
        .collect()
}

fn process_entry(
    entry: &ManifestEntry,
    config: &KilnConfig,
    options: &BatchOptions,
) -> Result<SpriteStatus> {
    // Resolve before touching the file so a bad size label leaves it alone
    let spec = entry.resolve(config)?;
    let path = options.sprites_dir.join(&spec.filename);

    let image = load_image(&path)?;
    let source_size = image.dimensions();

    let normalized = match options.normalizer.process(image, &spec, options.force) {
        Outcome::AlreadyProcessed => {
            debug!("{} already processed", spec.filename);
            return Ok(SpriteStatus::AlreadyProcessed);
        }
        Outcome::Normalized(normalized) => normalized,
    };

    debug!(
        "Processed {}: {}x{} -> {}",
        spec.filename, source_size.0, source_size.1, spec.target_size
    );
    save_sprite_image(&normalized.image, &path, options.compress)?;

    Ok(SpriteStatus::Processed {
        source_size,
        target_size: spec.target_size,
        is_background: spec.is_background(),
        has_visible_content: normalized.has_visible_content,
    })
}

/// Normalize one file without a manifest, writing the result to `output`
pub fn normalize_file(
    input: &Path,
    output: &Path,
    target: TargetSize,
    is_background: bool,
    normalizer: &Normalizer,
    compress: Option<CompressionLevel>,
) -> Result<FileReport> {
    let image = load_image(input)?;
    let source_size = image.dimensions();

    let normalized = normalizer.normalize(image, target, is_background);
    save_sprite_image(&normalized.image, output, compress)?;

    Ok(FileReport {
        source_size,
        has_visible_content: normalized.has_visible_content,
    })
}

/// Decode any supported image file into an RGBA raster
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    if !path.exists() {
        return Err(KilnError::InputNotFound(path.to_path_buf()).into());
    }

    let image = ImageReader::open(path)
        .map_err(|e| KilnError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| KilnError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| KilnError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    Ok(image)
}
