use serde::{Deserialize, Serialize};

/// Question categories the grader knows how to score.
///
/// `Unknown` is a real member, not an error state: keys imported from
/// AI-suggested drafts sometimes arrive untyped, and those questions still
/// need to flow through grading (they just always land in the review queue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    FillIn,
    ShortAnswer,
    TrueFalse,
    Math,
    #[default]
    Unknown,
}

/// One row of an answer key: the correct answer and point value for a
/// question, authored by a teacher or accepted from an AI suggestion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeyEntry {
    /// Question number, unique within the assignment
    pub number: u32,

    /// Primary correct answer
    pub answer: String,

    /// Alternate acceptable answers besides the primary one
    #[serde(default)]
    pub variants: Vec<String>,

    #[serde(rename = "type", default)]
    pub question_type: QuestionType,

    /// Points possible (default: 1)
    #[serde(default = "default_points")]
    pub points: f64,
}

fn default_points() -> f64 {
    1.0
}

/// Where an extracted answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// A regex pattern matched the question number and answer together
    PatternMatched,
    /// Positional assignment of standalone letters (lowest confidence)
    SequentialFallback,
    /// Entered by a human, bypassing extraction
    Manual,
}

/// A single answer pulled out of OCR text, before normalization.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractedAnswer {
    pub number: u32,
    /// Raw answer text as it appeared in the scan (may be empty for
    /// unreadable marks)
    pub text: String,
    pub confidence: f64,
    pub source: AnswerSource,
}
