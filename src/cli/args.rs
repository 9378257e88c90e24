use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(version, about = "Sprite post-processor for generated pixel art", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Process every sprite listed in the manifest, in place
    Process(ProcessArgs),
    /// Normalize a single image file
    Normalize(NormalizeArgs),
    /// Write a config file with the built-in defaults
    Init(InitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ProcessArgs {
    /// Sprite manifest JSON [default: sprites/prompts.json]
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Directory containing the sprite images [default: public/assets/sprites]
    #[arg(short = 'd', long, value_name = "DIR")]
    pub sprites_dir: Option<PathBuf>,

    /// Process only this sprite ID
    #[arg(long)]
    pub id: Option<String>,

    /// Reprocess sprites that already look processed
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Input image
    pub input: PathBuf,

    /// Output PNG [default: overwrite input]
    pub output: Option<PathBuf>,

    /// Logical size label from the display size table (e.g. 16x24)
    #[arg(
        short,
        long,
        conflicts_with_all = ["width", "height"],
        required_unless_present_all = ["width", "height"]
    )]
    pub size: Option<String>,

    /// Target canvas width in pixels
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Target canvas height in pixels
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// Treat the image as a background (stretch to fill, no chroma keying)
    #[arg(short, long)]
    pub background: bool,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Where to write the config file
    #[arg(default_value = "kiln.json")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Settings shared by the processing commands. Unset values come from the
/// config file, then the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct TuningArgs {
    /// Load settings from a kiln config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Chroma key tolerance around pure green [default: 80]
    #[arg(long)]
    pub tolerance: Option<u8>,

    /// Defringe erosion passes [default: 1]
    #[arg(long)]
    pub defringe_passes: Option<u32>,

    /// Transparent margin kept after cropping to content [default: 2]
    #[arg(long)]
    pub crop_padding: Option<u32>,

    /// Resize filter algorithm [default: lanczos3]
    #[arg(long, value_enum)]
    pub resize_filter: Option<ResizeFilter>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resize filter algorithm
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash)]
pub enum ResizeFilter {
    /// Nearest neighbor (blocky, keeps hard pixel edges)
    #[value(name = "nearest")]
    Nearest,
    /// Bilinear interpolation
    #[value(name = "triangle")]
    Triangle,
    /// Cubic interpolation (bicubic)
    #[value(name = "catmull-rom", alias = "bicubic")]
    CatmullRom,
    /// Gaussian filter
    #[value(name = "gaussian")]
    Gaussian,
    /// Lanczos with window 3 (highest quality)
    #[default]
    #[value(name = "lanczos3")]
    Lanczos3,
}

impl ResizeFilter {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResizeFilter::Nearest => image::imageops::FilterType::Nearest,
            ResizeFilter::Triangle => image::imageops::FilterType::Triangle,
            ResizeFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ResizeFilter::Gaussian => image::imageops::FilterType::Gaussian,
            ResizeFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }

    /// Parse a filter name as written in a config file
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nearest" => Some(ResizeFilter::Nearest),
            "triangle" => Some(ResizeFilter::Triangle),
            "catmull-rom" | "bicubic" => Some(ResizeFilter::CatmullRom),
            "gaussian" => Some(ResizeFilter::Gaussian),
            "lanczos3" => Some(ResizeFilter::Lanczos3),
            _ => None,
        }
    }
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}
