use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KilnError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("Unknown size '{label}' for {filename}")]
    UnknownSize { label: String, filename: String },

    #[error("'{0}' is listed more than once in the manifest; only the first entry is processed")]
    DuplicateFilename(String),

    #[error("Sprite ID '{0}' not found in manifest")]
    UnknownSpriteId(String),

    #[error("Invalid target size {width}x{height} for '{label}': both sides must be at least 1")]
    InvalidTargetSize {
        label: String,
        width: u32,
        height: u32,
    },
}
