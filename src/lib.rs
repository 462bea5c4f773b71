pub mod answers;
pub mod config;
pub mod extract;
pub mod grading;
pub mod inputs;
pub mod output;
pub mod report;
pub mod schedule;
