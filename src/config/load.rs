use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::KilnConfig;

/// A configuration with the directory its relative paths resolve against.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: KilnConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: KilnConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config file: {}", path.display()))?;

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Built-in defaults, with paths relative to the working directory.
    pub fn builtin() -> Self {
        Self {
            config: KilnConfig::default(),
            config_dir: PathBuf::from("."),
        }
    }

    /// Load `path` if given, otherwise fall back to the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Resolve the manifest path relative to the config file directory.
    pub fn resolve_manifest(&self) -> PathBuf {
        self.config_dir.join(&self.config.manifest)
    }

    /// Resolve the sprites directory relative to the config file directory.
    pub fn resolve_sprites_dir(&self) -> PathBuf {
        self.config_dir.join(&self.config.sprites_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_resolves_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiln.json");
        std::fs::write(
            &path,
            r#"{ "manifest": "prompts.json", "sprites_dir": "art/sprites" }"#,
        )
        .unwrap();

        let loaded = LoadedConfig::load(&path).unwrap();

        assert_eq!(loaded.resolve_manifest(), dir.path().join("prompts.json"));
        assert_eq!(loaded.resolve_sprites_dir(), dir.path().join("art/sprites"));
    }

    #[test]
    fn test_load_rejects_invalid_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiln.json");
        std::fs::write(&path, r#"{ "display_sizes": { "x": [16, 0] } }"#).unwrap();

        assert!(LoadedConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_or_default_without_path() {
        let loaded = LoadedConfig::load_or_default(None).unwrap();

        assert_eq!(loaded.config_dir, PathBuf::from("."));
        assert_eq!(loaded.config.tolerance, crate::sprite::DEFAULT_TOLERANCE);
    }
}
