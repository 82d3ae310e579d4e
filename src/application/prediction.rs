//! Prediction service: Orchestrates the submission pipeline.
//!
//! This service coordinates:
//! - Profile validation and feature encoding
//! - The single remote prediction call
//! - Response normalization
//! - The "current result" slot shown by the dashboard

use std::sync::{Arc, Mutex};

use crate::domain::{normalize, ModelSelector, PredictionRequest, PredictionResult, SymptomProfile};
use crate::ports::PredictionApi;
use crate::PulmocheckError;

/// The current-result slot. `generation` moves on with every submission and
/// every clear; a run may only store its result under its own generation.
#[derive(Debug, Default)]
struct ResultSlot {
    generation: u64,
    result: Option<PredictionResult>,
}

/// Service for running predictions against the remote service.
///
/// Holds at most one result: each submission clears it up front and only a
/// successful run writes a new one. A run that was superseded by a later
/// submission or by [`clear`](Self::clear) finishes without touching the slot,
/// so the last submission wins, not the last response.
pub struct PredictionService<A>
where
    A: PredictionApi,
{
    api: Arc<A>,
    current: Mutex<ResultSlot>,
}

impl<A> PredictionService<A>
where
    A: PredictionApi,
{
    /// Create a new prediction service.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            current: Mutex::new(ResultSlot::default()),
        }
    }

    /// Run the full pipeline and store the result.
    ///
    /// Performs:
    /// 1. Validate and encode the profile (no request on failure)
    /// 2. Send exactly one prediction request
    /// 3. Normalize the response
    ///
    /// The previous result is cleared before anything else, so a failed
    /// submission leaves no stale result behind.
    ///
    /// # Errors
    /// Returns `Validation`, `Transport` or `MalformedResponse`; none is retried.
    pub fn submit(
        &self,
        profile: &SymptomProfile,
        model: ModelSelector,
    ) -> Result<PredictionResult, PulmocheckError> {
        let generation = self.begin();

        tracing::info!(model = %model, generation, "Starting prediction pipeline...");
        let outcome = self.run(profile, model);

        match &outcome {
            Ok(result) => {
                tracing::info!(
                    "Prediction complete: label={}, risk={:.2}, confidence={:.2}%, level={}",
                    result.prediction_label.as_deref().unwrap_or("-"),
                    result.risk,
                    result.confidence * 100.0,
                    result.risk_level()
                );
                if !self.store(generation, result.clone()) {
                    tracing::debug!(generation, "Superseded; result not stored");
                }
            }
            Err(PulmocheckError::Validation(errors)) => {
                tracing::debug!("Submission rejected: {} invalid field(s)", errors.len());
            }
            Err(e) => tracing::error!("Prediction failed: {}", e),
        }

        outcome
    }

    fn run(
        &self,
        profile: &SymptomProfile,
        model: ModelSelector,
    ) -> Result<PredictionResult, PulmocheckError> {
        tracing::debug!("Step 1: Encoding symptom profile...");
        let request = PredictionRequest::new(profile, model)?;

        tracing::debug!("Step 2: Calling prediction service...");
        let raw = self.api.predict(&request)?;

        tracing::debug!("Step 3: Normalizing response...");
        normalize(raw, model)
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, ResultSlot> {
        // A panic elsewhere must not leave a stale result visible.
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Empty the slot and open a new generation.
    fn begin(&self) -> u64 {
        let mut slot = self.slot();
        slot.generation = slot.generation.wrapping_add(1);
        slot.result = None;
        slot.generation
    }

    /// Store `result` if no submission or clear happened since `generation`.
    fn store(&self, generation: u64, result: PredictionResult) -> bool {
        let mut slot = self.slot();
        if slot.generation != generation {
            return false;
        }
        slot.result = Some(result);
        true
    }

    /// The latest successful result, if the last submission succeeded.
    #[must_use]
    pub fn current_result(&self) -> Option<PredictionResult> {
        self.slot().result.clone()
    }

    /// Drop the current result. Runs still in flight will not store theirs.
    pub fn clear(&self) {
        self.begin();
    }

    /// Models the service reports, falling back to the built-in list when
    /// the service cannot be reached.
    #[must_use]
    pub fn available_models(&self) -> Vec<ModelSelector> {
        match self.api.models() {
            Ok(catalog) => {
                let models: Vec<ModelSelector> = catalog
                    .available_models
                    .iter()
                    .filter_map(|m| m.parse().ok())
                    .collect();
                if models.is_empty() {
                    ModelSelector::ALL.to_vec()
                } else {
                    models
                }
            }
            Err(e) => {
                tracing::warn!("Could not list models: {}", e);
                ModelSelector::ALL.to_vec()
            }
        }
    }

    /// Whether the prediction service is reachable.
    #[must_use]
    pub fn service_healthy(&self) -> bool {
        self.api.health()
    }
}
