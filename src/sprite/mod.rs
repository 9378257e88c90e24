mod chroma;
mod crop;
mod defringe;
mod normalizer;
mod resizer;
mod types;

pub use chroma::{DEFAULT_TOLERANCE, remove_chroma_key};
pub use crop::{Bounds, DEFAULT_PADDING, content_bounds, crop_to_content};
pub use defringe::{DEFAULT_PASSES, defringe};
pub use normalizer::{Normalized, Normalizer, Outcome, is_already_processed};
pub use resizer::{fit_dimensions, resize_to_canvas};
pub use types::{Category, SpriteSpec, TargetSize};
