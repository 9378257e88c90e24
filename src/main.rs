use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use kiln::cli::{
    CliArgs, Command, CompressionLevel, InitArgs, NormalizeArgs, ProcessArgs, ResizeFilter,
    TuningArgs,
};
use kiln::config::{CompressConfig, KilnConfig, LoadedConfig, save_config};
use kiln::manifest::Manifest;
use kiln::process::{BatchOptions, SpriteStatus, normalize_file, process_sprites};
use kiln::{KilnError, Normalizer, TargetSize};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    match cli.command {
        Command::Process(args) => run_process(args),
        Command::Normalize(args) => run_normalize(args),
        Command::Init(args) => run_init(args),
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_process(args: ProcessArgs) -> Result<()> {
    let loaded = LoadedConfig::load_or_default(args.tuning.config.as_deref())?;
    let settings = merge_config_with_args(&args.tuning, &loaded.config)?;
    init_logging(args.tuning.verbose);

    info!("Kiln sprite processor v{}", env!("CARGO_PKG_VERSION"));

    let manifest_path = args.manifest.unwrap_or_else(|| loaded.resolve_manifest());
    let sprites_dir = args
        .sprites_dir
        .unwrap_or_else(|| loaded.resolve_sprites_dir());

    let manifest = Manifest::load(&manifest_path)?;
    let entries = match &args.id {
        Some(id) => manifest.select(id)?,
        None => manifest.sprites,
    };

    info!("Processing {} sprites...", entries.len());

    let options = BatchOptions {
        sprites_dir,
        normalizer: settings.normalizer,
        force: args.force,
        compress: settings.compress,
    };
    let reports = process_sprites(&entries, &loaded.config, &options);

    for report in &reports {
        match &report.status {
            SpriteStatus::Processed {
                source_size,
                target_size,
                is_background,
                has_visible_content,
            } => {
                info!(
                    "{}: {}x{} -> {}{}",
                    report.filename,
                    source_size.0,
                    source_size.1,
                    target_size,
                    if *is_background { " (background)" } else { "" }
                );
                if !has_visible_content {
                    warn!("{}: no visible content left after keying", report.filename);
                }
            }
            SpriteStatus::AlreadyProcessed => info!("{} already processed", report.filename),
            SpriteStatus::Failed(e) => warn!("{}: {:#}", report.filename, e),
        }
    }

    let ok = reports.iter().filter(|r| r.succeeded()).count();
    info!("Processed {}/{} sprites", ok, reports.len());

    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let loaded = LoadedConfig::load_or_default(args.tuning.config.as_deref())?;
    let settings = merge_config_with_args(&args.tuning, &loaded.config)?;
    init_logging(args.tuning.verbose);

    let target = match (&args.size, args.width, args.height) {
        (Some(label), _, _) => loaded.config.target_size(label).ok_or_else(|| {
            KilnError::UnknownSize {
                label: label.clone(),
                filename: args.input.display().to_string(),
            }
        })?,
        (None, Some(width), Some(height)) if width > 0 && height > 0 => {
            TargetSize::new(width, height)
        }
        (None, width, height) => {
            return Err(KilnError::InvalidTargetSize {
                label: "--width/--height".to_string(),
                width: width.unwrap_or(0),
                height: height.unwrap_or(0),
            }
            .into());
        }
    };

    let output = args.output.as_ref().unwrap_or(&args.input);
    let report = normalize_file(
        &args.input,
        output,
        target,
        args.background,
        &settings.normalizer,
        settings.compress,
    )?;

    info!(
        "{}: {}x{} -> {} saved to {}",
        args.input.display(),
        report.source_size.0,
        report.source_size.1,
        target,
        output.display()
    );
    if !report.has_visible_content {
        warn!("no visible content left after keying");
    }

    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    init_logging(false);

    if args.path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        );
    }

    save_config(&KilnConfig::default(), &args.path)
        .with_context(|| format!("failed to initialize {}", args.path.display()))?;
    info!("Wrote default config to {}", args.path.display());

    Ok(())
}

/// Pipeline settings merged from CLI args and the config file.
struct MergedSettings {
    normalizer: Normalizer,
    compress: Option<CompressionLevel>,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &TuningArgs, config: &KilnConfig) -> Result<MergedSettings> {
    let filter = match args.resize_filter {
        Some(f) => f,
        None => ResizeFilter::from_name(&config.resize_filter).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown resize_filter '{}' in config file. Valid values: nearest, triangle, \
                 catmull-rom, gaussian, lanczos3",
                config.resize_filter
            )
        })?,
    };

    let normalizer = Normalizer::default()
        .tolerance(args.tolerance.unwrap_or(config.tolerance))
        .defringe_passes(args.defringe_passes.unwrap_or(config.defringe_passes))
        .crop_padding(args.crop_padding.unwrap_or(config.crop_padding))
        .filter(filter.to_image_filter());

    // Compress: CLI option overrides config
    let compress = if args.compress.is_some() {
        args.compress
    } else {
        match &config.compress {
            Some(CompressConfig::Level(n)) if *n <= 6 => Some(CompressionLevel::Level(*n)),
            Some(CompressConfig::Level(n)) => {
                anyhow::bail!("compress level {} in config file must be 0-6 or 'max'", n)
            }
            Some(CompressConfig::Max(s)) if s.eq_ignore_ascii_case("max") => {
                Some(CompressionLevel::Max)
            }
            Some(CompressConfig::Max(s)) => {
                anyhow::bail!("unknown compress value '{}' in config file", s)
            }
            None => None,
        }
    };

    Ok(MergedSettings {
        normalizer,
        compress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let config = KilnConfig {
            tolerance: 50,
            crop_padding: 4,
            resize_filter: "nearest".to_string(),
            compress: Some(CompressConfig::Level(3)),
            ..KilnConfig::default()
        };
        let args = TuningArgs {
            tolerance: Some(90),
            compress: Some(CompressionLevel::Max),
            ..TuningArgs::default()
        };

        let merged = merge_config_with_args(&args, &config).unwrap();

        assert_eq!(merged.normalizer.tolerance, 90);
        assert_eq!(merged.normalizer.crop_padding, 4);
        assert_eq!(
            merged.normalizer.filter,
            image::imageops::FilterType::Nearest
        );
        assert_eq!(merged.compress, Some(CompressionLevel::Max));
    }

    #[test]
    fn test_bad_config_values_rejected() {
        let args = TuningArgs::default();

        let config = KilnConfig {
            resize_filter: "sinc".to_string(),
            ..KilnConfig::default()
        };
        assert!(merge_config_with_args(&args, &config).is_err());

        let config = KilnConfig {
            compress: Some(CompressConfig::Max("fastest".to_string())),
            ..KilnConfig::default()
        };
        assert!(merge_config_with_args(&args, &config).is_err());
    }
}
