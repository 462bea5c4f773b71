mod formatter;

pub use formatter::{
    format_extraction, format_question_detail, format_report_table, format_slot, format_summary,
    should_use_colors,
};
