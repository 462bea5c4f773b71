use serde::{Deserialize, Serialize};

use crate::grading::GradingConfig;

/// Top-level application configuration (~/.config/redpen/config.yaml).
/// Every section is optional; a missing file means all defaults.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub grading: Option<GradingConfig>,

    #[serde(default)]
    pub schedule: Option<ScheduleConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// How many calendar days ahead the slot finder searches (default: 14)
    #[serde(default)]
    pub search_window_days: Option<u32>,
}
