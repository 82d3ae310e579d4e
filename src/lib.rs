//! # Pulmocheck
//!
//! Terminal dashboard for a remote lung-cancer risk prediction service.
//!
//! This crate provides:
//! - A symptom intake pipeline: validation, feature encoding, one remote
//!   prediction call, and normalization of the service's response
//! - Prediction history browsing with search and risk filters
//! - A lung-health self-check questionnaire
//! - Terminal UI built on ratatui
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (SymptomProfile, FeatureVector, PredictionResult)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (reqwest, log sanitization)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-driven settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{ModelSelector, PredictionResult, RiskLevel, SymptomProfile};

/// Result type for Pulmocheck operations
pub type Result<T> = std::result::Result<T, PulmocheckError>;

/// Main error type for Pulmocheck
#[derive(Debug, thiserror::Error)]
pub enum PulmocheckError {
    #[error("Invalid input: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{}", transport_message(.status, .message))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed response from prediction service: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn transport_message(status: &Option<u16>, message: &str) -> String {
    match (*status, message.is_empty()) {
        (Some(code), false) => format!("Prediction service error: HTTP {code}: {message}"),
        (Some(code), true) => format!("Prediction service error: HTTP {code}"),
        (None, _) => format!("Prediction service unreachable: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PulmocheckError::Transport {
            status: Some(500),
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Prediction service error: HTTP 500: boom");

        let err = PulmocheckError::Validation(vec!["Age is required".into(), "Gender is required".into()]);
        assert_eq!(err.to_string(), "Invalid input: Age is required, Gender is required");
    }
}
