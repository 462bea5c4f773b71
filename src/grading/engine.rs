use serde::Serialize;

use super::config::GradingConfig;
use super::similarity::{normalized_similarity, word_overlap_ratio};
use crate::answers::{normalize, KeyEntry, QuestionType};

/// Fixed note attached to every verdict that needs human review
pub const REVIEW_FEEDBACK: &str = "Low-confidence match: manual review recommended";

/// Per-question grading outcome.
///
/// `points_earned` is always 0 or the full point value; there is no
/// partial credit. `needs_review` is set whenever the engine could not
/// commit to a confident match, independent of the correctness verdict -
/// confidence is a UI signal layered on top, not a correctness gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeVerdict {
    pub is_correct: bool,
    pub confidence: f64,
    pub points_earned: f64,
    pub needs_review: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// What a per-type grader decides before points and feedback are attached.
struct TypeOutcome {
    correct: bool,
    confidence: f64,
    review: bool,
}

fn outcome(correct: bool, confidence: f64, review: bool) -> TypeOutcome {
    TypeOutcome {
        correct,
        confidence,
        review,
    }
}

/// Grade one student answer against one answer-key entry. Never fails:
/// unparseable or empty input degrades to an incorrect or review verdict.
pub fn grade_answer(student_raw: &str, key: &KeyEntry, config: &GradingConfig) -> GradeVerdict {
    let qtype = key.question_type;
    let student = normalize(student_raw, qtype);
    let correct = normalize(&key.answer, qtype);

    // Candidate-correct set: the primary answer plus accepted variants
    let candidates: Vec<String> = std::iter::once(correct.clone())
        .chain(key.variants.iter().map(|v| normalize(v, qtype)))
        .collect();

    let result = match qtype {
        QuestionType::MultipleChoice => grade_multiple_choice(&student, &candidates),
        QuestionType::TrueFalse => grade_true_false(&student, &correct),
        QuestionType::FillIn => grade_fill_in(&student, &candidates, config),
        QuestionType::Math => grade_math(&student, &correct, config),
        QuestionType::ShortAnswer => grade_short_answer(&student, &candidates, config),
        QuestionType::Unknown => grade_unknown(&student, &correct),
    };

    GradeVerdict {
        is_correct: result.correct,
        confidence: result.confidence,
        points_earned: if result.correct { key.points } else { 0.0 },
        needs_review: result.review,
        feedback: result.review.then(|| REVIEW_FEEDBACK.to_string()),
    }
}

/// Set membership on the canonical letter. A multi-character answer means
/// the letter could not be cleanly isolated, which lowers confidence.
fn grade_multiple_choice(student: &str, candidates: &[String]) -> TypeOutcome {
    let correct = candidates.iter().any(|c| c == student);
    let confidence = if student.chars().count() == 1 { 0.95 } else { 0.85 };
    outcome(correct, confidence, false)
}

/// Both sides are already canonicalized to "true"/"false" where
/// recognizable, so plain equality is the whole test.
fn grade_true_false(student: &str, correct: &str) -> TypeOutcome {
    outcome(student == correct, 0.95, false)
}

fn grade_fill_in(student: &str, candidates: &[String], config: &GradingConfig) -> TypeOutcome {
    if candidates.iter().any(|c| c == student) {
        return outcome(true, 0.95, false);
    }

    let best = candidates
        .iter()
        .map(|c| normalized_similarity(student, c))
        .fold(0.0_f64, f64::max);

    if best >= config.fill_in_accept() {
        outcome(true, 0.85, false)
    } else if best >= config.fill_in_review() {
        // Ambiguous: a human must decide
        outcome(false, 0.6, true)
    } else {
        outcome(false, 0.8, false)
    }
}

fn grade_math(student: &str, correct: &str, config: &GradingConfig) -> TypeOutcome {
    match (parse_numeric(student), parse_numeric(correct)) {
        (Some(s), Some(c)) => {
            let within = (s - c).abs() <= c.abs() * config.math_tolerance();
            outcome(within, 0.9, false)
        }
        // Not numerically evaluable: exact-string fallback, then punt
        _ if student == correct => outcome(true, 0.85, false),
        _ => outcome(false, 0.5, true),
    }
}

fn grade_short_answer(student: &str, candidates: &[String], config: &GradingConfig) -> TypeOutcome {
    if candidates.iter().any(|c| c == student) {
        return outcome(true, 0.95, false);
    }

    // Containment either direction is a weak accept
    if !student.is_empty()
        && candidates
            .iter()
            .any(|c| !c.is_empty() && (student.contains(c.as_str()) || c.contains(student)))
    {
        return outcome(true, 0.75, true);
    }

    let best = candidates
        .iter()
        .map(|c| word_overlap_ratio(student, c))
        .fold(0.0_f64, f64::max);

    if best >= config.overlap_accept() {
        outcome(true, 0.7, true)
    } else if best >= config.overlap_review() {
        outcome(false, 0.5, true)
    } else {
        outcome(false, 0.7, false)
    }
}

/// Untyped questions can only be graded by exact equality, and always go
/// to the review queue.
fn grade_unknown(student: &str, correct: &str) -> TypeOutcome {
    outcome(student == correct, 0.5, true)
}

/// Parse a math-normalized string as a number: plain decimals, `a/b`
/// fractions, and `n%` percentages (divided by 100).
fn parse_numeric(s: &str) -> Option<f64> {
    if let Some(percent) = s.strip_suffix('%') {
        return percent.parse::<f64>().ok().map(|n| n / 100.0);
    }
    if let Some((numerator, denominator)) = s.split_once('/') {
        let n = numerator.parse::<f64>().ok()?;
        let d = denominator.parse::<f64>().ok()?;
        if d == 0.0 {
            return None;
        }
        return Some(n / d);
    }
    s.parse::<f64>().ok()
}
