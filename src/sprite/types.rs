use serde::Deserialize;

/// Concrete pixel dimensions of a processed sprite's canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width divided by height
    pub fn ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl std::fmt::Display for TargetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// What a sprite depicts in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Player,
    Obstacle,
    Collectible,
    Background,
    #[default]
    Other,
}

impl Category {
    /// Infer a category from the conventional sprite ID prefix
    pub fn from_id(id: &str) -> Self {
        if id.starts_with("player_") {
            Category::Player
        } else if id.starts_with("obstacle_") {
            Category::Obstacle
        } else if id.starts_with("collectible_") {
            Category::Collectible
        } else if id.starts_with("bg_") {
            Category::Background
        } else {
            Category::Other
        }
    }
}

/// A fully resolved sprite: where it lives, what it is and how big it ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSpec {
    pub id: String,
    pub filename: String,
    pub category: Category,
    pub target_size: TargetSize,
}

impl SpriteSpec {
    /// Backgrounds are stretched to fill and never chroma-keyed
    pub fn is_background(&self) -> bool {
        self.category == Category::Background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_id() {
        assert_eq!(Category::from_id("player_gabriel"), Category::Player);
        assert_eq!(Category::from_id("obstacle_cone"), Category::Obstacle);
        assert_eq!(Category::from_id("collectible_moon"), Category::Collectible);
        assert_eq!(Category::from_id("bg_menu"), Category::Background);
        assert_eq!(Category::from_id("title_logo"), Category::Other);
    }

    #[test]
    fn test_category_deserialize() {
        let category: Category = serde_json::from_str("\"collectible\"").unwrap();
        assert_eq!(category, Category::Collectible);
    }

    #[test]
    fn test_target_size_display() {
        assert_eq!(TargetSize::new(128, 192).to_string(), "128x192");
    }
}
