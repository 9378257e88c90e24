use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::KilnError;
use crate::sprite::{DEFAULT_PADDING, DEFAULT_PASSES, DEFAULT_TOLERANCE, TargetSize};

/// Logical sprite size label to display size in pixels (4x-8x the logical size)
const DEFAULT_DISPLAY_SIZES: &[(&str, [u32; 2])] = &[
    ("16x24", [128, 192]),
    ("20x12", [160, 96]),
    ("20x24", [160, 192]),
    ("24x24", [192, 192]),
    ("28x20", [224, 160]),
    ("64x80", [256, 320]),
    ("16x16", [128, 128]),
    // Backgrounds at 2x
    ("180x320", [360, 640]),
];

const DEFAULT_BACKGROUND_IDS: &[&str] = &[
    "bg_menu",
    "bg_character_select",
    "bg_level_select",
    "bg_las_americas",
    "bg_hill_reps",
    "bg_fondo_vh",
    "bg_game_over",
];

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Kiln configuration file structure.
///
/// Paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KilnConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Sprite manifest (prompt list) JSON file
    pub manifest: String,
    /// Directory holding the sprite images named in the manifest
    pub sprites_dir: String,
    /// Size label ("16x24") to display size in pixels. Replaces the built-in table.
    pub display_sizes: BTreeMap<String, [u32; 2]>,
    /// Sprite IDs that are always treated as backgrounds
    pub background_ids: BTreeSet<String>,
    /// Chroma key tolerance around pure #00FF00
    pub tolerance: u8,
    /// Number of defringe erosion passes
    pub defringe_passes: u32,
    /// Transparent margin kept around cropped content
    pub crop_padding: u32,
    /// Resize filter algorithm (nearest, triangle, catmull-rom, gaussian, lanczos3)
    pub resize_filter: String,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for KilnConfig {
    fn default() -> Self {
        Self {
            version: 1,
            manifest: "sprites/prompts.json".to_string(),
            sprites_dir: "public/assets/sprites".to_string(),
            display_sizes: DEFAULT_DISPLAY_SIZES
                .iter()
                .map(|(label, size)| ((*label).to_string(), *size))
                .collect(),
            background_ids: DEFAULT_BACKGROUND_IDS
                .iter()
                .map(|id| (*id).to_string())
                .collect(),
            tolerance: DEFAULT_TOLERANCE,
            defringe_passes: DEFAULT_PASSES,
            crop_padding: DEFAULT_PADDING,
            resize_filter: "lanczos3".to_string(),
            compress: None,
        }
    }
}

impl KilnConfig {
    /// Look up the display size for a logical size label
    pub fn target_size(&self, label: &str) -> Option<TargetSize> {
        self.display_sizes
            .get(label)
            .map(|[width, height]| TargetSize::new(*width, *height))
    }

    pub fn is_background_id(&self, id: &str) -> bool {
        self.background_ids.contains(id)
    }

    /// Reject display sizes with a zero side
    pub fn validate(&self) -> Result<(), KilnError> {
        for (label, [width, height]) in &self.display_sizes {
            if *width == 0 || *height == 0 {
                return Err(KilnError::InvalidTargetSize {
                    label: label.clone(),
                    width: *width,
                    height: *height,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_display_sizes() {
        let config = KilnConfig::default();

        assert_eq!(config.target_size("16x24"), Some(TargetSize::new(128, 192)));
        assert_eq!(config.target_size("180x320"), Some(TargetSize::new(360, 640)));
        assert_eq!(config.target_size("99x99"), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_background_ids() {
        let config = KilnConfig::default();

        assert!(config.is_background_id("bg_menu"));
        assert!(config.is_background_id("bg_game_over"));
        assert!(!config.is_background_id("player_gabriel"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: KilnConfig =
            serde_json::from_str(r#"{ "tolerance": 60, "compress": "max" }"#).unwrap();

        assert_eq!(config.tolerance, 60);
        assert_eq!(config.crop_padding, DEFAULT_PADDING);
        assert!(matches!(config.compress, Some(CompressConfig::Max(_))));
        assert_eq!(config.target_size("16x16"), Some(TargetSize::new(128, 128)));
    }

    #[test]
    fn test_display_sizes_replace_defaults() {
        let config: KilnConfig =
            serde_json::from_str(r#"{ "display_sizes": { "8x8": [64, 64] } }"#).unwrap();

        assert_eq!(config.target_size("8x8"), Some(TargetSize::new(64, 64)));
        assert_eq!(config.target_size("16x24"), None);
    }

    #[test]
    fn test_validate_rejects_zero_side() {
        let config: KilnConfig =
            serde_json::from_str(r#"{ "display_sizes": { "bad": [0, 64] } }"#).unwrap();

        assert!(matches!(
            config.validate(),
            Err(KilnError::InvalidTargetSize { width: 0, .. })
        ));
    }
}
