//! Domain layer: Core business types and logic.
//!
//! Pure types with no I/O: the symptom profile, its wire encoding, response
//! normalization and the self-check questionnaire.

mod features;
mod model;
mod normalize;
mod prediction;
mod profile;
pub mod self_check;
mod session;

pub use features::{FeatureVector, PredictionRequest, FEATURE_NAMES};
pub use model::ModelSelector;
pub use normalize::{
    details_text, normalize, RawHistory, RawHistoryEntry, RawLabel, RawPrediction,
    RawProbabilities,
};
pub use prediction::{HistoryRecord, PredictionResult, Probabilities, RiskLevel};
pub use profile::{Answer, Gender, Symptom, SymptomProfile, SymptomSummary, MAX_AGE, MIN_AGE};
pub use session::{Session, MIN_PASSWORD_LEN};
