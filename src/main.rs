use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Grade a scanned answer sheet against an answer key
    Grade {
        /// Path to the answer key YAML file
        key: PathBuf,
        /// Path to the OCR text of the scanned sheet
        scan: PathBuf,
        /// Emit the full report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Extract answers from an OCR scan without grading them
    Extract {
        /// Path to the OCR text of the scanned sheet
        scan: PathBuf,
        /// How many questions the sheet should contain
        #[arg(short, long)]
        expected: usize,
    },
    /// Find the next open lesson slot in the availability rules
    Schedule {
        /// Path to the weekly availability rules YAML file
        rules: PathBuf,
        /// Path to the existing bookings YAML file
        #[arg(short, long)]
        bookings: Option<PathBuf>,
        /// Only consider rules for this subject
        #[arg(short, long)]
        subject: Option<String>,
        /// Lesson duration (e.g. "45m", "1h 30m")
        #[arg(short, long, default_value = "60m", value_parser = humantime::parse_duration)]
        duration: std::time::Duration,
        /// Search window in days (overrides config)
        #[arg(long)]
        window_days: Option<u32>,
        /// Search from this time instead of now (e.g. "2024-01-01T09:00:00")
        #[arg(long)]
        now: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "redpen")]
#[command(about = "Answer-sheet grading and lesson scheduling CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/redpen/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match redpen::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate grading config at startup
    let effective_grading = config.grading.clone().unwrap_or_default();
    if let Err(errors) = redpen::grading::validate_grading(&effective_grading) {
        eprintln!("Grading config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    match cli.command {
        Commands::Grade { key, scan, json } => {
            run_grade(&key, &scan, json, &effective_grading, cli.verbose);
        }
        Commands::Extract { scan, expected } => {
            run_extract(&scan, expected, cli.verbose);
        }
        Commands::Schedule {
            rules,
            bookings,
            subject,
            duration,
            window_days,
            now,
        } => {
            let config_window = config
                .schedule
                .as_ref()
                .and_then(|s| s.search_window_days);
            run_schedule(
                &rules,
                bookings.as_deref(),
                subject.as_deref(),
                duration,
                window_days.or(config_window),
                now.as_deref(),
            );
        }
    }

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run_grade(
    key_path: &std::path::Path,
    scan_path: &std::path::Path,
    json: bool,
    grading: &redpen::grading::GradingConfig,
    verbose: bool,
) {
    let key = match redpen::inputs::load_answer_key(key_path) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Answer key error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    let scan_text = match std::fs::read_to_string(scan_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to read scan {}: {}", scan_path.display(), e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if verbose {
        eprintln!("Loaded {} key entries", key.len());
    }

    let extraction = redpen::extract::extract(&scan_text, key.len());
    if verbose {
        eprintln!(
            "Extracted {} answers ({} unmatched, {} low-confidence)",
            extraction.answers.len(),
            extraction.unmatched_count(),
            extraction.low_confidence_count()
        );
    }

    let answers = extraction.answer_texts();
    let report = redpen::report::grade_sheet(&key, &answers, grading);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
        return;
    }

    let use_colors = redpen::output::should_use_colors();
    if verbose {
        for question in &report.questions {
            println!(
                "{}",
                redpen::output::format_question_detail(question, use_colors)
            );
            println!();
        }
        println!("{}", redpen::output::format_summary(&report, use_colors));
    } else {
        println!(
            "{}",
            redpen::output::format_report_table(&report, use_colors)
        );
    }
}

fn run_extract(scan_path: &std::path::Path, expected: usize, verbose: bool) {
    let scan_text = match std::fs::read_to_string(scan_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to read scan {}: {}", scan_path.display(), e);
            std::process::exit(EXIT_INPUT);
        }
    };

    let extraction = redpen::extract::extract(&scan_text, expected);
    if verbose {
        eprintln!(
            "Extracted {} of {} expected answers",
            extraction.answers.len(),
            expected
        );
    }

    let use_colors = redpen::output::should_use_colors();
    println!(
        "{}",
        redpen::output::format_extraction(&extraction, use_colors)
    );
}

fn run_schedule(
    rules_path: &std::path::Path,
    bookings_path: Option<&std::path::Path>,
    subject: Option<&str>,
    duration: std::time::Duration,
    window_days: Option<u32>,
    now: Option<&str>,
) {
    let rules = match redpen::inputs::load_rules(rules_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Rules error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    let bookings = match bookings_path {
        Some(path) => match redpen::inputs::load_bookings(path) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Bookings error: {}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        None => Vec::new(),
    };

    let rules: Vec<_> = match subject {
        Some(subject) => rules
            .into_iter()
            .filter(|r| redpen::schedule::subject_matches(&r.subject, subject))
            .collect(),
        None => rules,
    };

    let now = match now {
        Some(raw) => match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Invalid --now value '{}': {}", raw, e);
                std::process::exit(EXIT_INPUT);
            }
        },
        None => Local::now().naive_local(),
    };

    let duration_minutes = (duration.as_secs() / 60) as u32;
    if duration_minutes == 0 {
        eprintln!("Duration must be at least one minute");
        std::process::exit(EXIT_INPUT);
    }

    let window = window_days.unwrap_or(redpen::schedule::DEFAULT_SEARCH_WINDOW_DAYS);
    let slot = redpen::schedule::find_next_slot(&rules, &bookings, duration_minutes, now, window);

    let use_colors = redpen::output::should_use_colors();
    println!(
        "{}",
        redpen::output::format_slot(slot.as_ref(), use_colors)
    );
}
