pub mod media;
pub mod openrouter;
pub mod prompt;

pub use openrouter::{analyze_reference_image, generate_design_image};
