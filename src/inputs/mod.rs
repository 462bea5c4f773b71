//! YAML input files the CLI feeds into the core: the answer key, the
//! weekly availability rules, and the existing bookings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::answers::KeyEntry;
use crate::schedule::{AvailabilityRule, Booking};

#[derive(Debug, Deserialize, Serialize)]
struct AnswerKeyFile {
    questions: Vec<KeyEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RulesFile {
    rules: Vec<AvailabilityRule>,
}

#[derive(Debug, Deserialize, Serialize)]
struct BookingsFile {
    #[serde(default)]
    bookings: Vec<Booking>,
}

/// Load an answer key from a YAML file.
///
/// # Errors
///
/// Returns an error if the file is missing or unparseable, or if the key
/// repeats a question number.
pub fn load_answer_key(path: &Path) -> Result<Vec<KeyEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read answer key at {}", path.display()))?;

    let file: AnswerKeyFile = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse answer key: invalid YAML in {}", path.display()))?;

    let mut seen = HashSet::new();
    for entry in &file.questions {
        if !seen.insert(entry.number) {
            anyhow::bail!(
                "Invalid answer key {}: duplicate question number {}",
                path.display(),
                entry.number
            );
        }
    }

    Ok(file.questions)
}

/// Load weekly availability rules from a YAML file.
pub fn load_rules(path: &Path) -> Result<Vec<AvailabilityRule>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read availability rules at {}", path.display()))?;

    let file: RulesFile = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse rules: invalid YAML in {}", path.display()))?;

    for rule in &file.rules {
        if rule.day_of_week > 6 {
            anyhow::bail!(
                "Invalid rule '{}' in {}: day_of_week must be 0 (Sunday) to 6 (Saturday)",
                rule.id,
                path.display()
            );
        }
    }

    Ok(file.rules)
}

/// Load existing calendar bookings from a YAML file.
pub fn load_bookings(path: &Path) -> Result<Vec<Booking>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read bookings at {}", path.display()))?;

    let file: BookingsFile = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse bookings: invalid YAML in {}", path.display()))?;

    Ok(file.bookings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::QuestionType;
    use std::env;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_answer_key() {
        let path = write_temp(
            "redpen_test_key.yaml",
            r#"
questions:
  - number: 1
    answer: "A"
    type: multiple_choice
  - number: 2
    answer: "42"
    type: math
    points: 2
    variants: ["42.0"]
"#,
        );
        let key = load_answer_key(&path).unwrap();
        assert_eq!(key.len(), 2);
        assert_eq!(key[0].question_type, QuestionType::MultipleChoice);
        assert_eq!(key[0].points, 1.0);
        assert_eq!(key[1].points, 2.0);
        assert_eq!(key[1].variants, vec!["42.0".to_string()]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_duplicate_question_number_rejected() {
        let path = write_temp(
            "redpen_test_key_dup.yaml",
            "questions:\n  - number: 5\n    answer: A\n  - number: 5\n    answer: B\n",
        );
        let err = load_answer_key(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate question number 5"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_errors() {
        let path = env::temp_dir().join("redpen_test_does_not_exist.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_answer_key(&path).is_err());
    }

    #[test]
    fn test_load_rules_and_day_bounds() {
        let path = write_temp(
            "redpen_test_rules.yaml",
            r#"
rules:
  - id: tue-afternoon
    subject: Math
    day_of_week: 2
    start: "15:00"
    end: "17:00"
"#,
        );
        let rules = load_rules(&path).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules[0].active, "active defaults to true");

        let bad = write_temp(
            "redpen_test_rules_bad.yaml",
            "rules:\n  - id: r1\n    subject: Math\n    day_of_week: 9\n    start: \"15:00\"\n    end: \"17:00\"\n",
        );
        assert!(load_rules(&bad).is_err());

        let _ = fs::remove_file(&path);
        let _ = fs::remove_file(&bad);
    }

    #[test]
    fn test_load_bookings() {
        let path = write_temp(
            "redpen_test_bookings.yaml",
            r#"
bookings:
  - start: "2024-01-02T15:00:00"
    end: "2024-01-02T16:00:00"
"#,
        );
        let bookings = load_bookings(&path).unwrap();
        assert_eq!(bookings.len(), 1);

        let empty = write_temp("redpen_test_bookings_empty.yaml", "{}");
        assert!(load_bookings(&empty).unwrap().is_empty());

        let _ = fs::remove_file(&path);
        let _ = fs::remove_file(&empty);
    }
}
