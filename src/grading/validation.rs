use super::config::GradingConfig;

/// Validate grading thresholds at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_grading(config: &GradingConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(tolerance) = config.math_tolerance {
        if tolerance < 0.0 {
            errors.push("grading.math_tolerance: must be non-negative".to_string());
        }
    }

    let unit_fields = [
        ("grading.fill_in_accept", config.fill_in_accept),
        ("grading.fill_in_review", config.fill_in_review),
        ("grading.overlap_accept", config.overlap_accept),
        ("grading.overlap_review", config.overlap_review),
    ];
    for (name, value) in unit_fields {
        if let Some(v) = value {
            if !(0.0..=1.0).contains(&v) {
                errors.push(format!("{}: must be between 0 and 1 (got {})", name, v));
            }
        }
    }

    // The review threshold must sit below the accept threshold, or the
    // ambiguous band disappears
    if config.fill_in_review() > config.fill_in_accept() {
        errors.push(format!(
            "grading.fill_in_review ({}) must not exceed grading.fill_in_accept ({})",
            config.fill_in_review(),
            config.fill_in_accept()
        ));
    }
    if config.overlap_review() > config.overlap_accept() {
        errors.push(format!(
            "grading.overlap_review ({}) must not exceed grading.overlap_accept ({})",
            config.overlap_review(),
            config.overlap_accept()
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(validate_grading(&GradingConfig::default()).is_ok());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let config = GradingConfig {
            math_tolerance: Some(-0.01),
            ..GradingConfig::default()
        };
        let errors = validate_grading(&config).unwrap_err();
        assert!(errors[0].contains("math_tolerance"));
    }

    #[test]
    fn test_threshold_out_of_unit_range() {
        let config = GradingConfig {
            overlap_accept: Some(1.5),
            ..GradingConfig::default()
        };
        let errors = validate_grading(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("overlap_accept")));
    }

    #[test]
    fn test_inverted_band_rejected() {
        let config = GradingConfig {
            fill_in_review: Some(0.95),
            ..GradingConfig::default()
        };
        let errors = validate_grading(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("fill_in_review")));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = GradingConfig {
            math_tolerance: Some(-1.0),
            overlap_accept: Some(2.0),
            ..GradingConfig::default()
        };
        let errors = validate_grading(&config).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
