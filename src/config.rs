//! Runtime settings.
//!
//! Read from `PULMOCHECK_*` environment variables (optionally seeded from a
//! `.env` file by the binary). Unset variables take their defaults; set but
//! invalid ones are rejected.

use std::path::PathBuf;

use crate::domain::ModelSelector;
use crate::PulmocheckError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_HISTORY_LIMIT: usize = 10;
pub const DEFAULT_LOG_FILE: &str = "pulmocheck.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise
    Auto,
    File,
    Stdout,
}

impl std::str::FromStr for LogMode {
    type Err = PulmocheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            other => Err(PulmocheckError::Config(format!(
                "PULMOCHECK_LOG_MODE must be auto, file or stdout (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root URL of the prediction service
    pub api_url: String,
    /// Rows fetched by the history view
    pub history_limit: usize,
    /// Model preselected on the intake form
    pub default_model: ModelSelector,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            default_model: ModelSelector::default(),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    /// Returns `PulmocheckError::Config` for values that do not parse.
    pub fn from_env() -> Result<Self, PulmocheckError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `PulmocheckError::Config` for values that do not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PulmocheckError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup("PULMOCHECK_API_URL").filter(|v| !v.trim().is_empty()) {
            settings.api_url = url.trim().to_string();
        }
        if let Some(limit) = lookup("PULMOCHECK_HISTORY_LIMIT") {
            settings.history_limit = limit
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    PulmocheckError::Config(format!(
                        "PULMOCHECK_HISTORY_LIMIT must be a positive integer (got '{limit}')"
                    ))
                })?;
        }
        if let Some(model) = lookup("PULMOCHECK_DEFAULT_MODEL") {
            settings.default_model = model
                .trim()
                .parse()
                .map_err(|e: String| PulmocheckError::Config(format!("PULMOCHECK_DEFAULT_MODEL: {e}")))?;
        }
        if let Some(mode) = lookup("PULMOCHECK_LOG_MODE") {
            settings.log_mode = mode.trim().parse()?;
        }
        if let Some(file) = lookup("PULMOCHECK_LOG_FILE").filter(|v| !v.trim().is_empty()) {
            settings.log_file = PathBuf::from(file);
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).expect("Should load");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api_url, "http://localhost:5000");
        assert_eq!(settings.history_limit, 10);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("PULMOCHECK_API_URL", "https://predict.example.org"),
            ("PULMOCHECK_HISTORY_LIMIT", "25"),
            ("PULMOCHECK_DEFAULT_MODEL", "svm"),
            ("PULMOCHECK_LOG_MODE", "STDOUT"),
        ]))
        .expect("Should load");

        assert_eq!(settings.api_url, "https://predict.example.org");
        assert_eq!(settings.history_limit, 25);
        assert_eq!(settings.default_model, ModelSelector::Svm);
        assert_eq!(settings.log_mode, LogMode::Stdout);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Settings::from_lookup(lookup(&[("PULMOCHECK_HISTORY_LIMIT", "0")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("PULMOCHECK_DEFAULT_MODEL", "xgboost")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("PULMOCHECK_LOG_MODE", "syslog")])).is_err());
    }
}
