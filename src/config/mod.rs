mod schema;

pub use schema::{Config, ScheduleConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/redpen/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("redpen")
}

/// Get the default config file path (~/.config/redpen/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path
///   (~/.config/redpen/config.yaml)
///
/// # Errors
///
/// Returns an error if an explicitly given config file does not exist, if
/// the file cannot be read, or if the YAML cannot be parsed. A missing
/// file at the default path is not an error; all settings have defaults.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_explicit_missing_path_errors() {
        let path = env::temp_dir().join("redpen_test_no_such_config.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_full_config_parse() {
        let path = env::temp_dir().join("redpen_test_config.yaml");
        fs::write(
            &path,
            "grading:\n  math_tolerance: 0.02\nschedule:\n  search_window_days: 7\n",
        )
        .unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.grading.unwrap().math_tolerance(), 0.02);
        assert_eq!(config.schedule.unwrap().search_window_days, Some(7));

        let _ = fs::remove_file(&path);
    }
}
