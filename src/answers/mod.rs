pub mod normalize;
pub mod types;

pub use normalize::normalize;
pub use types::{AnswerSource, ExtractedAnswer, KeyEntry, QuestionType};
