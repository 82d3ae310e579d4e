//! Prediction API port: Trait for the remote prediction service.
//!
//! This trait abstracts the HTTP transport from the application logic so
//! the pipeline can be driven by an in-process fake in tests.

use crate::domain::{PredictionRequest, RawHistory, RawPrediction};
use crate::PulmocheckError;

/// Models advertised by the service.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ModelCatalog {
    pub available_models: Vec<String>,
    pub default_model: Option<String>,
}

/// Remote prediction service operations.
///
/// Implementations perform exactly one request per call and never retry.
pub trait PredictionApi: Send + Sync {
    /// Submit one prediction request.
    ///
    /// # Errors
    /// Returns `PulmocheckError::Transport` for network failures and non-2xx
    /// statuses, `PulmocheckError::MalformedResponse` for an undecodable body.
    fn predict(&self, request: &PredictionRequest) -> Result<RawPrediction, PulmocheckError>;

    /// Fetch the most recent logged predictions.
    ///
    /// # Errors
    /// Same failure modes as [`PredictionApi::predict`].
    fn history(&self, limit: usize) -> Result<RawHistory, PulmocheckError>;

    /// List the models the service can run.
    ///
    /// # Errors
    /// Same failure modes as [`PredictionApi::predict`].
    fn models(&self) -> Result<ModelCatalog, PulmocheckError>;

    /// Whether the service answers its health endpoint.
    fn health(&self) -> bool;
}
