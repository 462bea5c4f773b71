pub mod engine;
pub mod patterns;

pub use engine::{extract, ExtractionResult, MAX_QUESTION_NUMBER};
