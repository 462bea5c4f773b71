use serde::{Deserialize, Serialize};

/// Default relative tolerance for numeric math comparison (1%)
pub const DEFAULT_MATH_TOLERANCE: f64 = 0.01;
/// Edit-distance similarity at or above this accepts a fill-in answer
pub const DEFAULT_FILL_IN_ACCEPT: f64 = 0.9;
/// Edit-distance similarity at or above this flags a fill-in for review
pub const DEFAULT_FILL_IN_REVIEW: f64 = 0.75;
/// Word-overlap ratio at or above this accepts a short answer
pub const DEFAULT_OVERLAP_ACCEPT: f64 = 0.8;
/// Word-overlap ratio at or above this flags a short answer for review
pub const DEFAULT_OVERLAP_REVIEW: f64 = 0.5;

/// Grading threshold configuration.
///
/// The fuzzy-match cutoffs are empirically chosen and plausibly need
/// tuning per deployment, so they are config fields rather than engine
/// constants. Each field is optional; the documented default applies when
/// absent. Confidence values are fixed policy and not configurable.
///
/// Example YAML:
/// ```yaml
/// grading:
///   math_tolerance: 0.01
///   fill_in_accept: 0.9
///   fill_in_review: 0.75
///   overlap_accept: 0.8
///   overlap_review: 0.5
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GradingConfig {
    /// Relative tolerance for numeric comparison (default: 0.01 = 1%)
    #[serde(default)]
    pub math_tolerance: Option<f64>,

    /// Fill-in similarity threshold for accepting a near-match (default: 0.9)
    #[serde(default)]
    pub fill_in_accept: Option<f64>,

    /// Fill-in similarity threshold for flagging review (default: 0.75)
    #[serde(default)]
    pub fill_in_review: Option<f64>,

    /// Short-answer word-overlap threshold for accepting (default: 0.8)
    #[serde(default)]
    pub overlap_accept: Option<f64>,

    /// Short-answer word-overlap threshold for flagging review (default: 0.5)
    #[serde(default)]
    pub overlap_review: Option<f64>,
}

impl GradingConfig {
    pub fn math_tolerance(&self) -> f64 {
        self.math_tolerance.unwrap_or(DEFAULT_MATH_TOLERANCE)
    }

    pub fn fill_in_accept(&self) -> f64 {
        self.fill_in_accept.unwrap_or(DEFAULT_FILL_IN_ACCEPT)
    }

    pub fn fill_in_review(&self) -> f64 {
        self.fill_in_review.unwrap_or(DEFAULT_FILL_IN_REVIEW)
    }

    pub fn overlap_accept(&self) -> f64 {
        self.overlap_accept.unwrap_or(DEFAULT_OVERLAP_ACCEPT)
    }

    pub fn overlap_review(&self) -> f64 {
        self.overlap_review.unwrap_or(DEFAULT_OVERLAP_REVIEW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: GradingConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config.math_tolerance(), 0.01);
        assert_eq!(config.fill_in_accept(), 0.9);
        assert_eq!(config.fill_in_review(), 0.75);
        assert_eq!(config.overlap_accept(), 0.8);
        assert_eq!(config.overlap_review(), 0.5);
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = "math_tolerance: 0.05\noverlap_accept: 0.9\n";
        let config: GradingConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.math_tolerance(), 0.05);
        assert_eq!(config.overlap_accept(), 0.9);
        // Untouched fields keep their defaults
        assert_eq!(config.fill_in_accept(), 0.9);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "partial_credit: true\n";
        assert!(serde_saphyr::from_str::<GradingConfig>(yaml).is_err());
    }
}
