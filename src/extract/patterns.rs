//! Answer-line pattern table.
//!
//! Ordered from most to least specific; the first pattern that matches a
//! line wins. Every pattern captures group 1 = question number and
//! group 2 = raw answer text.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

/// A line-matching pattern with a human-readable description.
#[derive(Debug)]
pub struct LinePattern {
    pub pattern: Regex,
    /// What kind of line this recognizes (for debugging and tests)
    #[allow(dead_code)]
    pub description: &'static str,
}

/// The ordered cascade of line patterns for tier-1 extraction.
pub static LINE_PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![
        LinePattern {
            pattern: Regex::new(r"^(\d{1,3})\s*[.):]\s*([a-eA-E])$")
                .expect("static regex: numbered letter"),
            description: "numbered letter: '12. B', '12) B', '12: B'",
        },
        LinePattern {
            pattern: Regex::new(r"^(\d{1,3})\s+([a-eA-E])$")
                .expect("static regex: spaced letter"),
            description: "number and letter: '12 B'",
        },
        LinePattern {
            pattern: Regex::new(r"(?i)^(\d{1,3})\s*[.):]?\s*(true|false|t|f)$")
                .expect("static regex: numbered true/false"),
            description: "numbered true/false: '12. True', '12 F'",
        },
        LinePattern {
            pattern: Regex::new(r"(?i)^[q#]\s*(\d{1,3})\s*[.:)]?\s*(.+)$")
                .expect("static regex: prefixed number"),
            description: "prefixed number: 'Q12: B', '#12 B'",
        },
        LinePattern {
            pattern: Regex::new(r"^(\d{1,3})\s*[=\-]\s*(.+)$")
                .expect("static regex: equals or dash"),
            description: "equals/dash separator: '12 = B', '12 - B'",
        },
        LinePattern {
            pattern: Regex::new(r"^\(?(\d{1,3})\)?\s*[.:]?\s*\(?([a-eA-E])\)?$")
                .expect("static regex: parenthesized letter"),
            description: "parenthesized forms: '(12) B', '12 (B)'",
        },
        LinePattern {
            pattern: Regex::new(r"^(\d{1,3})\s*[.):]\s*(.+)$")
                .expect("static regex: numbered free text"),
            description: "catch-all numbered free text: '12. the water cycle'",
        },
    ]
});

/// Inline `<number><optional separator><letter>` pairs for the tier-2
/// whole-text scan.
pub static INLINE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,3})\s*[.):=\-]?\s*([a-e])\b").expect("static regex: inline pair")
});

/// Standalone A-E letter tokens for the tier-3 sequential fallback.
pub static STANDALONE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-eA-E])\b").expect("static regex: standalone letter"));

/// Run a trimmed line through the pattern cascade. Returns the question
/// number and raw answer text from the first matching pattern.
pub fn match_line(line: &str) -> Option<(u32, String)> {
    for entry in LINE_PATTERNS.iter() {
        if let Some(caps) = entry.pattern.captures(line) {
            let number = caps[1].parse::<u32>().ok()?;
            return Some((number, caps[2].trim().to_string()));
        }
    }
    None
}
