//! String similarity primitives used by the fuzzy grading branches.

use std::collections::HashSet;

/// Words this short carry no signal for overlap comparison ("a", "of", "is")
const MIN_OVERLAP_WORD_LEN: usize = 3;

/// Classic edit distance: insert, delete, and substitute each cost 1.
/// Operates on chars, not bytes, so accented answers compare sanely.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two-row rolling DP over the edit matrix
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let substitution = prev[j] + usize::from(a_char != b_char);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Edit-distance similarity normalized to [0, 1]:
/// `1 - distance / max(len)`. Two empty strings compare equal.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Ratio of shared significant words to the larger word count.
///
/// Both sides are filtered to words longer than two characters before
/// comparison, so articles and prepositions neither help nor hurt.
/// Returns 0 when either side has no significant words.
pub fn word_overlap_ratio(a: &str, b: &str) -> f64 {
    let a_words: HashSet<&str> = significant_words(a).collect();
    let b_words: HashSet<&str> = significant_words(b).collect();

    let denominator = a_words.len().max(b_words.len());
    if denominator == 0 {
        return 0.0;
    }

    let shared = a_words.intersection(&b_words).count();
    shared as f64 / denominator as f64
}

fn significant_words(s: &str) -> impl Iterator<Item = &str> {
    s.split_whitespace()
        .filter(|w| w.chars().count() >= MIN_OVERLAP_WORD_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein_distance("kitten", "kitten"), 0);
    }

    #[test]
    fn test_levenshtein_classic_case() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_levenshtein_empty_sides() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn test_levenshtein_unicode_chars() {
        // One substitution, not a byte-length mismatch
        assert_eq!(levenshtein_distance("caf\u{e9}", "cafe"), 1);
    }

    #[test]
    fn test_similarity_identical_and_empty() {
        assert_eq!(normalized_similarity("paris", "paris"), 1.0);
        assert_eq!(normalized_similarity("", ""), 1.0);
    }

    #[test]
    fn test_similarity_one_typo() {
        // "pariss" vs "paris": distance 1 over max length 6
        let sim = normalized_similarity("pariss", "paris");
        assert!((sim - (1.0 - 1.0 / 6.0)).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_disjoint() {
        assert_eq!(normalized_similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_word_overlap_full_match() {
        // "in" and "a" fall under the length filter
        let ratio = word_overlap_ratio("in a water cycle", "water cycle");
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn test_word_overlap_partial() {
        let ratio = word_overlap_ratio("water evaporates quickly", "water freezes quickly");
        assert!((ratio - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_word_overlap_no_significant_words() {
        assert_eq!(word_overlap_ratio("a an of", "it is"), 0.0);
        assert_eq!(word_overlap_ratio("", "water"), 0.0);
    }
}
