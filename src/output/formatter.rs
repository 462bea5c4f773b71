use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::extract::ExtractionResult;
use crate::report::{GradedQuestion, SheetReport};
use crate::schedule::Slot;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate an answer to fit available width, accounting for Unicode
fn truncate_answer(answer: &str, max_width: usize) -> String {
    let chars: Vec<char> = answer.chars().collect();
    if chars.len() <= max_width {
        answer.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a graded sheet as a table with one row per question:
/// number, verdict mark, points, student answer, review flag.
pub fn format_report_table(report: &SheetReport, use_colors: bool) -> String {
    if report.questions.is_empty() {
        return "Empty answer key; nothing graded.".to_string();
    }

    let term_width = get_terminal_width();
    // Number (3) + mark (2) + points (8) + review column (9) + padding
    let answer_width = term_width.map(|w| w.saturating_sub(26).max(8));

    let mut lines: Vec<String> = report
        .questions
        .iter()
        .map(|q| format_question_row(q, answer_width, use_colors))
        .collect();
    lines.push(format_summary(report, use_colors));
    lines.join("\n")
}

fn format_question_row(
    q: &GradedQuestion,
    answer_width: Option<usize>,
    use_colors: bool,
) -> String {
    let answer = q.student_answer.as_deref().unwrap_or("-");
    let answer = match answer_width {
        Some(w) => truncate_answer(answer, w),
        None => answer.to_string(),
    };
    let points = format!("{}/{}", q.points_earned, q.points_possible);
    let review = if q.needs_review { "review" } else { "" };

    if use_colors {
        let mark = if q.is_correct {
            "+".green().to_string()
        } else {
            "x".red().to_string()
        };
        format!(
            "{:>3}. {} {:>7}  {}  {}",
            q.number,
            mark,
            points,
            answer,
            review.yellow()
        )
    } else {
        let mark = if q.is_correct { "+" } else { "x" };
        format!("{:>3}. {} {:>7}  {}  {}", q.number, mark, points, answer, review)
    }
}

/// One-line totals: earned/possible, percentage, review and unanswered counts
pub fn format_summary(report: &SheetReport, use_colors: bool) -> String {
    let score = format!(
        "Score: {}/{} ({:.0}%)",
        report.points_earned,
        report.points_possible,
        report.percent()
    );
    let warnings = format!(
        "{} to review, {} unanswered",
        report.needs_review_count, report.unanswered_count
    );

    if use_colors {
        if report.needs_review_count > 0 || report.unanswered_count > 0 {
            format!("{} - {}", score.bold(), warnings.yellow())
        } else {
            format!("{} - {}", score.bold(), warnings)
        }
    } else {
        format!("{} - {}", score, warnings)
    }
}

/// Format a single graded question with detailed multi-line output
/// (for verbose mode)
pub fn format_question_detail(q: &GradedQuestion, use_colors: bool) -> String {
    let verdict = if q.is_correct { "correct" } else { "incorrect" };
    let student = q.student_answer.as_deref().unwrap_or("(no answer)");
    let feedback = q.feedback.as_deref().unwrap_or("");

    if use_colors {
        format!(
            "Question {}\n  Student: {}\n  Expected: {}\n  Verdict: {} ({:.0}% confidence)\n  Points: {}/{}\n  {}",
            q.number.bold(),
            student,
            q.correct_answer.cyan(),
            verdict,
            q.confidence * 100.0,
            q.points_earned,
            q.points_possible,
            feedback.yellow()
        )
    } else {
        format!(
            "Question {}\n  Student: {}\n  Expected: {}\n  Verdict: {} ({:.0}% confidence)\n  Points: {}/{}\n  {}",
            q.number,
            student,
            q.correct_answer,
            verdict,
            q.confidence * 100.0,
            q.points_earned,
            q.points_possible,
            feedback
        )
    }
}

/// Format an extraction result as `number: text` lines plus a warning
/// line when answers are missing or low-confidence.
pub fn format_extraction(result: &ExtractionResult, use_colors: bool) -> String {
    if result.answers.is_empty() {
        return format!(
            "No answers extracted ({} expected).",
            result.expected_count
        );
    }

    let mut lines: Vec<String> = result
        .answers
        .values()
        .map(|a| format!("{:>3}: {}  ({:?}, {:.2})", a.number, a.text, a.source, a.confidence))
        .collect();

    let unmatched = result.unmatched_count();
    let low = result.low_confidence_count();
    if unmatched > 0 || low > 0 {
        let warning = format!("{} unmatched, {} low-confidence", unmatched, low);
        if use_colors {
            lines.push(warning.yellow().to_string());
        } else {
            lines.push(warning);
        }
    }
    lines.join("\n")
}

/// Format a found slot, or the expected "no slot" message
pub fn format_slot(slot: Option<&Slot>, use_colors: bool) -> String {
    match slot {
        Some(slot) => {
            let when = format!(
                "{} - {}",
                slot.start.format("%A %Y-%m-%d %H:%M"),
                slot.end.format("%H:%M")
            );
            if use_colors {
                format!("Next open slot: {} (rule: {})", when.green(), slot.rule_id)
            } else {
                format!("Next open slot: {} (rule: {})", when, slot.rule_id)
            }
        }
        None => "No open slot in the search window; schedule manually.".to_string(),
    }
}
