//! Response normalization.
//!
//! The prediction service has used two naming conventions over time
//! (`model_used`/`model`, `confidence_score`/`confidence`,
//! `prediction`/`prediction_text`). Every variant is captured as an optional
//! field on [`RawPrediction`] and resolved here in a fixed preference order:
//! the service-native name first, then the alternate.

use serde::{Deserialize, Serialize};

use crate::domain::{HistoryRecord, ModelSelector, PredictionResult, Probabilities};
use crate::PulmocheckError;

const POSITIVE_SENTENCE: &str = "The model indicates potential cancer risk based on provided symptoms";
const NEGATIVE_SENTENCE: &str = "The model indicates low cancer risk based on provided symptoms";

/// Class label as sent by the service: normally "YES"/"NO", older builds
/// sent the raw 1/0 class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Text(String),
    Class(i64),
}

impl RawLabel {
    fn into_label(self) -> String {
        match self {
            Self::Text(s) => s.trim().to_uppercase(),
            Self::Class(1) => "YES".to_string(),
            Self::Class(_) => "NO".to_string(),
        }
    }
}

/// Nested probability breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProbabilities {
    pub cancer_risk_yes: Option<f64>,
    pub cancer_risk_no: Option<f64>,
}

/// Decoded `/api/predict` response, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub model_used: Option<String>,
    pub model: Option<String>,
    pub confidence_score: Option<f64>,
    pub confidence: Option<f64>,
    pub prediction: Option<RawLabel>,
    pub prediction_text: Option<RawLabel>,
    pub probabilities: Option<RawProbabilities>,
    /// Flat risk value (used when no probability breakdown is present)
    pub risk: Option<f64>,
    #[serde(alias = "logId")]
    pub log_id: Option<i64>,
}

/// Build the analysis sentence shown under the result.
#[must_use]
pub fn details_text(label: &str, model: &str) -> String {
    let sentence = if label == "YES" {
        POSITIVE_SENTENCE
    } else {
        NEGATIVE_SENTENCE
    };
    format!("Prediction: {label}. {sentence}. Analysis completed using {model} model.")
}

fn check_unit(name: &str, value: f64) -> Result<f64, PulmocheckError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(PulmocheckError::MalformedResponse(format!(
            "{name} {value} outside [0, 1]"
        )))
    }
}

/// Resolve a raw response into the canonical result.
///
/// `requested` is used as the model name when the response omits it.
///
/// # Errors
/// Returns `PulmocheckError::MalformedResponse` when the response carries
/// neither a risk nor a confidence value, or when a value lies outside
/// [0, 1].
pub fn normalize(raw: RawPrediction, requested: ModelSelector) -> Result<PredictionResult, PulmocheckError> {
    let probs = raw.probabilities.unwrap_or_default();

    let reported_risk = match probs.cancer_risk_yes.or(raw.risk) {
        Some(r) => Some(check_unit("risk", r)?),
        None => None,
    };
    let reported_confidence = match raw.confidence_score.or(raw.confidence) {
        Some(c) => Some(check_unit("confidence", c)?),
        None => None,
    };

    if reported_risk.is_none() && reported_confidence.is_none() {
        return Err(PulmocheckError::MalformedResponse(
            "response carries no risk or confidence value".to_string(),
        ));
    }

    let risk = reported_risk.unwrap_or(0.0);
    let confidence = reported_confidence.unwrap_or_else(|| risk.max(1.0 - risk));

    let probabilities = match (probs.cancer_risk_yes, probs.cancer_risk_no) {
        (Some(yes), Some(no)) => Some(Probabilities {
            yes,
            no: check_unit("cancer_risk_no", no)?,
        }),
        _ => None,
    };

    let model = raw
        .model_used
        .or(raw.model)
        .unwrap_or_else(|| requested.as_str().to_string());

    let prediction_label = raw
        .prediction
        .or(raw.prediction_text)
        .map(RawLabel::into_label)
        .or_else(|| reported_risk.map(|r| if r >= 0.5 { "YES" } else { "NO" }.to_string()));

    let details = details_text(prediction_label.as_deref().unwrap_or("UNKNOWN"), &model);

    Ok(PredictionResult {
        timestamp: chrono::Utc::now(),
        model,
        risk,
        risk_reported: reported_risk.is_some(),
        confidence,
        details,
        probabilities,
        log_id: raw.log_id,
        prediction_label,
    })
}

/// One row of `GET /api/predictions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHistoryEntry {
    pub id: i64,
    pub timestamp: String,
    pub model_name: String,
    pub prediction_result: Option<String>,
    pub confidence_score: Option<f64>,
    pub probability_yes: Option<f64>,
    pub probability_no: Option<f64>,
}

/// Envelope of `GET /api/predictions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHistory {
    #[serde(default)]
    pub predictions: Vec<RawHistoryEntry>,
    #[serde(default)]
    pub total_count: usize,
}

impl RawHistoryEntry {
    /// Convert a logged prediction into a history record, reusing the same
    /// resolution rules as live predictions.
    ///
    /// # Errors
    /// Returns `PulmocheckError::MalformedResponse` for an unparseable
    /// timestamp or out-of-range values.
    pub fn into_record(self) -> Result<HistoryRecord, PulmocheckError> {
        let timestamp = parse_timestamp(&self.timestamp)?;
        let id = self.id.to_string();
        let requested = self.model_name.parse().unwrap_or_default();

        let raw = RawPrediction {
            model_used: Some(self.model_name),
            confidence_score: self.confidence_score,
            prediction: self.prediction_result.map(RawLabel::Text),
            probabilities: Some(RawProbabilities {
                cancer_risk_yes: self.probability_yes,
                cancer_risk_no: self.probability_no,
            }),
            log_id: Some(self.id),
            ..RawPrediction::default()
        };

        let mut result = normalize(raw, requested)?;
        result.timestamp = timestamp;
        Ok(HistoryRecord { id, result })
    }
}

/// The service logs naive UTC timestamps (no offset); accept both forms.
fn parse_timestamp(s: &str) -> Result<chrono::DateTime<chrono::Utc>, PulmocheckError> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&chrono::Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| PulmocheckError::MalformedResponse(format!("bad timestamp '{s}': {e}")))
}
