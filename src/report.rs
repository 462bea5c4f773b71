use serde::Serialize;
use std::collections::BTreeMap;

use crate::answers::KeyEntry;
use crate::grading::{grade_answer, GradeVerdict, GradingConfig};

/// Note attached to questions the extractor produced no answer for
pub const NO_ANSWER_FEEDBACK: &str = "No answer extracted from the scan";

/// One graded question, shaped for downstream persistence and UI.
#[derive(Debug, Clone, Serialize)]
pub struct GradedQuestion {
    pub number: u32,
    /// Raw extracted answer; `None` when nothing was extracted
    pub student_answer: Option<String>,
    pub correct_answer: String,
    pub points_possible: f64,
    pub points_earned: f64,
    pub is_correct: bool,
    pub confidence: f64,
    pub needs_review: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Whole-sheet grading result: per-question rows plus accumulated totals.
#[derive(Debug, Clone, Serialize)]
pub struct SheetReport {
    pub questions: Vec<GradedQuestion>,
    pub points_earned: f64,
    pub points_possible: f64,
    pub needs_review_count: usize,
    pub unanswered_count: usize,
}

impl SheetReport {
    /// Score as a percentage, or 0 for an empty key
    pub fn percent(&self) -> f64 {
        if self.points_possible == 0.0 {
            0.0
        } else {
            self.points_earned / self.points_possible * 100.0
        }
    }
}

/// Grade a whole answer sheet: one pass over the answer key, grading each
/// extracted answer and accumulating totals. Questions with no extracted
/// answer score zero and land in the review queue, so the caller can
/// always render one even when extraction totally failed.
pub fn grade_sheet(
    key: &[KeyEntry],
    answers: &BTreeMap<u32, String>,
    config: &GradingConfig,
) -> SheetReport {
    let mut questions: Vec<GradedQuestion> = key
        .iter()
        .map(|entry| match answers.get(&entry.number) {
            Some(raw) => graded(entry, raw, grade_answer(raw, entry, config)),
            None => unanswered(entry),
        })
        .collect();
    questions.sort_by_key(|q| q.number);

    let points_earned = questions.iter().map(|q| q.points_earned).sum();
    let points_possible = questions.iter().map(|q| q.points_possible).sum();
    let needs_review_count = questions.iter().filter(|q| q.needs_review).count();
    let unanswered_count = questions
        .iter()
        .filter(|q| q.student_answer.is_none())
        .count();

    SheetReport {
        questions,
        points_earned,
        points_possible,
        needs_review_count,
        unanswered_count,
    }
}

fn graded(entry: &KeyEntry, raw: &str, verdict: GradeVerdict) -> GradedQuestion {
    GradedQuestion {
        number: entry.number,
        student_answer: Some(raw.to_string()),
        correct_answer: entry.answer.clone(),
        points_possible: entry.points,
        points_earned: verdict.points_earned,
        is_correct: verdict.is_correct,
        confidence: verdict.confidence,
        needs_review: verdict.needs_review,
        feedback: verdict.feedback,
    }
}

fn unanswered(entry: &KeyEntry) -> GradedQuestion {
    GradedQuestion {
        number: entry.number,
        student_answer: None,
        correct_answer: entry.answer.clone(),
        points_possible: entry.points,
        points_earned: 0.0,
        is_correct: false,
        confidence: 0.0,
        needs_review: true,
        feedback: Some(NO_ANSWER_FEEDBACK.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::QuestionType;

    fn key_entry(number: u32, answer: &str, qtype: QuestionType, points: f64) -> KeyEntry {
        KeyEntry {
            number,
            answer: answer.to_string(),
            variants: vec![],
            question_type: qtype,
            points,
        }
    }

    #[test]
    fn test_clean_sheet_full_marks() {
        let key = vec![
            key_entry(1, "A", QuestionType::MultipleChoice, 1.0),
            key_entry(2, "42", QuestionType::Math, 2.0),
        ];
        let answers = BTreeMap::from([(1, "a.".to_string()), (2, "42.0".to_string())]);

        let report = grade_sheet(&key, &answers, &GradingConfig::default());

        assert!(report.questions.iter().all(|q| q.is_correct));
        assert_eq!(report.points_earned, 3.0);
        assert_eq!(report.points_possible, 3.0);
        assert_eq!(report.needs_review_count, 0);
        assert_eq!(report.unanswered_count, 0);
        assert_eq!(report.percent(), 100.0);
    }

    #[test]
    fn test_missing_answer_scores_zero_and_flags_review() {
        let key = vec![
            key_entry(1, "B", QuestionType::MultipleChoice, 1.0),
            key_entry(2, "paris", QuestionType::FillIn, 1.0),
        ];
        let answers = BTreeMap::from([(1, "b".to_string())]);

        let report = grade_sheet(&key, &answers, &GradingConfig::default());

        assert_eq!(report.points_earned, 1.0);
        assert_eq!(report.unanswered_count, 1);
        assert_eq!(report.needs_review_count, 1);

        let missing = &report.questions[1];
        assert_eq!(missing.number, 2);
        assert!(missing.student_answer.is_none());
        assert!(!missing.is_correct);
        assert!(missing.needs_review);
        assert_eq!(missing.feedback.as_deref(), Some(NO_ANSWER_FEEDBACK));
    }

    #[test]
    fn test_rows_sorted_by_question_number() {
        let key = vec![
            key_entry(3, "C", QuestionType::MultipleChoice, 1.0),
            key_entry(1, "A", QuestionType::MultipleChoice, 1.0),
        ];
        let answers = BTreeMap::from([(1, "a".to_string()), (3, "c".to_string())]);

        let report = grade_sheet(&key, &answers, &GradingConfig::default());
        let numbers: Vec<u32> = report.questions.iter().map(|q| q.number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn test_empty_key_empty_report() {
        let report = grade_sheet(&[], &BTreeMap::new(), &GradingConfig::default());
        assert!(report.questions.is_empty());
        assert_eq!(report.percent(), 0.0);
    }

    #[test]
    fn test_review_rows_counted() {
        // Containment accept: correct but still review-flagged
        let key = vec![key_entry(1, "the water cycle", QuestionType::ShortAnswer, 1.0)];
        let answers = BTreeMap::from([(1, "water cycle".to_string())]);

        let report = grade_sheet(&key, &answers, &GradingConfig::default());
        assert_eq!(report.points_earned, 1.0);
        assert_eq!(report.needs_review_count, 1);
    }
}
