use std::collections::BTreeMap;

use super::patterns::{self, INLINE_PAIR, STANDALONE_LETTER};
use crate::answers::{AnswerSource, ExtractedAnswer};

/// Question numbers above this are treated as OCR noise, not answers
pub const MAX_QUESTION_NUMBER: u32 = 200;

/// Lines longer than this are prose, not answer lines
const MAX_ANSWER_LINE_LEN: usize = 100;

/// Per-tier confidence assigned to extracted answers
const LINE_TIER_CONFIDENCE: f64 = 0.9;
const INLINE_TIER_CONFIDENCE: f64 = 0.75;
const SEQUENTIAL_TIER_CONFIDENCE: f64 = 0.5;

/// Answers below this confidence count toward the low-confidence warning
const LOW_CONFIDENCE_CUTOFF: f64 = 0.8;

/// Result of running the extraction cascade over one scan.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Sparse mapping, sorted by question number
    pub answers: BTreeMap<u32, ExtractedAnswer>,
    /// How many questions the caller expected to find
    pub expected_count: usize,
}

impl ExtractionResult {
    /// The sparse `question number -> raw answer text` mapping the grader
    /// consumes.
    pub fn answer_texts(&self) -> BTreeMap<u32, String> {
        self.answers
            .iter()
            .map(|(number, answer)| (*number, answer.text.clone()))
            .collect()
    }

    /// Expected questions with no extracted answer (for UI warnings)
    pub fn unmatched_count(&self) -> usize {
        self.expected_count.saturating_sub(self.answers.len())
    }

    /// Extracted answers below the confidence cutoff (for UI warnings)
    pub fn low_confidence_count(&self) -> usize {
        self.answers
            .values()
            .filter(|a| a.confidence < LOW_CONFIDENCE_CUTOFF)
            .count()
    }
}

/// Parse free-form OCR text into per-question answers.
///
/// Three tiers, each strictly less precise than the last, and each only
/// running when the previous tiers under-produced. OCR quality varies
/// drastically between scans; a single strict parser would silently fail
/// on noisy input, so recall is bought with lower-confidence tiers only
/// once it is clearly insufficient. A question number seen twice keeps its
/// first answer. Never fails; unparseable input yields an empty mapping.
pub fn extract(ocr_text: &str, expected_count: usize) -> ExtractionResult {
    let mut answers: BTreeMap<u32, ExtractedAnswer> = BTreeMap::new();

    extract_line_patterns(ocr_text, &mut answers);

    // Under half of the expected answers: rescan the flattened text for
    // inline number/letter pairs
    if answers.len() * 2 < expected_count {
        extract_inline_pairs(ocr_text, expected_count, &mut answers);
    }

    // Under a third: fall back to positional assignment of bare letters
    if answers.len() * 3 < expected_count {
        extract_sequential_letters(ocr_text, expected_count, &mut answers);
    }

    ExtractionResult {
        answers,
        expected_count,
    }
}

/// Tier 1: match each trimmed line against the ordered pattern cascade.
fn extract_line_patterns(ocr_text: &str, answers: &mut BTreeMap<u32, ExtractedAnswer>) {
    for line in ocr_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.chars().count() > MAX_ANSWER_LINE_LEN {
            continue;
        }
        let Some((number, text)) = patterns::match_line(line) else {
            continue;
        };
        if !(1..=MAX_QUESTION_NUMBER).contains(&number) {
            continue;
        }
        answers.entry(number).or_insert(ExtractedAnswer {
            number,
            text,
            confidence: LINE_TIER_CONFIDENCE,
            source: AnswerSource::PatternMatched,
        });
    }
}

/// Tier 2: flatten the text to one line and scan globally for
/// number/letter pairs. Numbers are bounded by the expected count here,
/// not the fixed ceiling.
fn extract_inline_pairs(
    ocr_text: &str,
    expected_count: usize,
    answers: &mut BTreeMap<u32, ExtractedAnswer>,
) {
    let flat = ocr_text.replace(['\n', '\r'], " ");
    for caps in INLINE_PAIR.captures_iter(&flat) {
        let Ok(number) = caps[1].parse::<u32>() else {
            continue;
        };
        if number < 1 || number as usize > expected_count {
            continue;
        }
        answers.entry(number).or_insert(ExtractedAnswer {
            number,
            text: caps[2].to_string(),
            confidence: INLINE_TIER_CONFIDENCE,
            source: AnswerSource::PatternMatched,
        });
    }
}

/// Tier 3: if enough standalone A-E tokens exist (at least half the
/// expected count), assign them in order to unpopulated question numbers.
fn extract_sequential_letters(
    ocr_text: &str,
    expected_count: usize,
    answers: &mut BTreeMap<u32, ExtractedAnswer>,
) {
    let letters: Vec<&str> = STANDALONE_LETTER
        .find_iter(ocr_text)
        .map(|m| m.as_str())
        .collect();
    if letters.len() * 2 < expected_count {
        return;
    }

    let mut remaining = letters.into_iter();
    for number in 1..=expected_count as u32 {
        if answers.contains_key(&number) {
            continue;
        }
        let Some(letter) = remaining.next() else {
            break;
        };
        answers.insert(
            number,
            ExtractedAnswer {
                number,
                text: letter.to_string(),
                confidence: SEQUENTIAL_TIER_CONFIDENCE,
                source: AnswerSource::SequentialFallback,
            },
        );
    }
}
