pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod output;
pub mod process;
pub mod sprite;

pub use cli::{CliArgs, Command};
pub use error::KilnError;
pub use sprite::{Category, Normalized, Normalizer, SpriteSpec, TargetSize};
