// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

use super::types::QuestionType;

/// Quote characters stripped during normalization (straight and curly)
const QUOTE_CHARS: &[char] = &['"', '\'', '`', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Punctuation stripped from the end of an answer
const TRAILING_PUNCT: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Leading choice letter, optionally followed by `.` `)` `:` and more text.
/// Input is already lowercased and whitespace-collapsed when this runs.
static CHOICE_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-e])[.):]?(?:\s.*)?$").expect("static regex: choice letter")
});

/// Canonicalize a raw answer string for comparison.
///
/// Deterministic, total, and idempotent: normalizing an already-normalized
/// string is a no-op. "A", "a.", and "A)" all collapse to "a" for multiple
/// choice; "Yes" collapses to "true" for true/false; "1, 000 × 2" collapses
/// to "1000*2" for math. Other types only get the generic cleanup (trim,
/// lowercase, quote stripping, whitespace collapse, trailing punctuation).
pub fn normalize(answer: &str, question_type: QuestionType) -> String {
    let lowered = answer.trim().to_lowercase();
    let unquoted: String = lowered.chars().filter(|c| !QUOTE_CHARS.contains(c)).collect();
    let collapsed = unquoted.split_whitespace().collect::<Vec<_>>().join(" ");
    let base = collapsed.trim_end_matches(TRAILING_PUNCT).trim_end();

    match question_type {
        QuestionType::MultipleChoice => canonical_choice(base),
        QuestionType::TrueFalse => canonical_bool(base),
        QuestionType::Math => canonical_math(base),
        QuestionType::FillIn | QuestionType::ShortAnswer | QuestionType::Unknown => {
            base.to_string()
        }
    }
}

/// Collapse "b", "b)", "b: because..." down to the bare letter. Anything
/// that doesn't lead with a single A-E letter passes through unchanged;
/// the grader decides correctness later.
fn canonical_choice(base: &str) -> String {
    match CHOICE_LETTER.captures(base) {
        Some(caps) => caps[1].to_string(),
        None => base.to_string(),
    }
}

fn canonical_bool(base: &str) -> String {
    match base {
        "true" | "t" | "yes" | "y" | "1" | "correct" => "true".to_string(),
        "false" | "f" | "no" | "n" | "0" | "incorrect" => "false".to_string(),
        other => other.to_string(),
    }
}

/// Numeric-string canonicalization: no whitespace, ASCII operators,
/// no thousands separators.
fn canonical_math(base: &str) -> String {
    base.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c {
            '\u{00D7}' => '*', // multiplication sign
            '\u{00F7}' => '/', // division sign
            '\u{2212}' => '-', // minus sign
            other => other,
        })
        .collect()
}
