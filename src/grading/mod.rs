pub mod config;
pub mod engine;
pub mod similarity;
pub mod validation;

pub use config::GradingConfig;
pub use engine::{grade_answer, GradeVerdict, REVIEW_FEEDBACK};
pub use similarity::{levenshtein_distance, normalized_similarity, word_overlap_ratio};
pub use validation::validate_grading;
