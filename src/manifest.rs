//! Sprite manifest: the list of sprites the generator produced, with their
//! prompts and logical sizes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::KilnConfig;
use crate::error::KilnError;
use crate::sprite::{Category, SpriteSpec};

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub sprites: Vec<ManifestEntry>,
}

/// One sprite as listed in the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub filename: String,
    /// Logical size label, looked up in the display size table
    pub size: String,
    /// Generation prompt; not used for post-processing
    #[serde(default)]
    pub prompt: Option<String>,
    /// Explicit category; inferred from the ID prefix when absent
    #[serde(default)]
    pub category: Option<Category>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Keep only the sprite with the given ID
    pub fn select(self, id: &str) -> Result<Vec<ManifestEntry>, KilnError> {
        let selected: Vec<_> = self.sprites.into_iter().filter(|s| s.id == id).collect();

        if selected.is_empty() {
            return Err(KilnError::UnknownSpriteId(id.to_string()));
        }

        Ok(selected)
    }
}

impl ManifestEntry {
    /// Resolve the size label and category against the config
    pub fn resolve(&self, config: &KilnConfig) -> Result<SpriteSpec, KilnError> {
        let target_size = config
            .target_size(&self.size)
            .ok_or_else(|| KilnError::UnknownSize {
                label: self.size.clone(),
                filename: self.filename.clone(),
            })?;

        let category = if config.is_background_id(&self.id) {
            Category::Background
        } else {
            self.category.unwrap_or_else(|| Category::from_id(&self.id))
        };

        Ok(SpriteSpec {
            id: self.id.clone(),
            filename: self.filename.clone(),
            category,
            target_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::TargetSize;

    const MANIFEST: &str = r#"{
        "sprites": [
            { "id": "player_gabriel", "filename": "player_gabriel.png", "size": "16x24",
              "prompt": "A runner in a hoodie" },
            { "id": "bg_menu", "filename": "bg_menu.png", "size": "180x320" },
            { "id": "moon", "filename": "moon.png", "size": "16x16", "category": "collectible" },
            { "id": "mystery", "filename": "mystery.png", "size": "3x3" }
        ]
    }"#;

    fn manifest() -> Manifest {
        serde_json::from_str(MANIFEST).unwrap()
    }

    #[test]
    fn test_resolve_player() {
        let config = KilnConfig::default();
        let spec = manifest().sprites[0].resolve(&config).unwrap();

        assert_eq!(spec.category, Category::Player);
        assert_eq!(spec.target_size, TargetSize::new(128, 192));
        assert!(!spec.is_background());
    }

    #[test]
    fn test_resolve_background_from_id_set() {
        let config = KilnConfig::default();
        let spec = manifest().sprites[1].resolve(&config).unwrap();

        assert!(spec.is_background());
        assert_eq!(spec.target_size, TargetSize::new(360, 640));
    }

    #[test]
    fn test_explicit_category_wins_over_prefix() {
        let config = KilnConfig::default();
        let spec = manifest().sprites[2].resolve(&config).unwrap();

        assert_eq!(spec.category, Category::Collectible);
    }

    #[test]
    fn test_background_id_overrides_explicit_category() {
        let mut config = KilnConfig::default();
        config.background_ids.insert("moon".to_string());

        let spec = manifest().sprites[2].resolve(&config).unwrap();

        assert!(spec.is_background());
    }

    #[test]
    fn test_unknown_size_label() {
        let config = KilnConfig::default();
        let err = manifest().sprites[3].resolve(&config).unwrap_err();

        assert!(matches!(err, KilnError::UnknownSize { ref label, .. } if label == "3x3"));
    }

    #[test]
    fn test_select_by_id() {
        let selected = manifest().select("bg_menu").unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].filename, "bg_menu.png");

        assert!(matches!(
            manifest().select("nope"),
            Err(KilnError::UnknownSpriteId(_))
        ));
    }
}
