//! Prediction result types.
//!
//! Canonical, display-ready output of one prediction request.

use serde::{Deserialize, Serialize};

/// Risk bucket for a predicted cancer probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Below 0.3
    Low,
    /// From 0.3 up to (not including) 0.7
    Moderate,
    /// 0.7 and above
    High,
}

impl RiskLevel {
    /// Bucket a risk value using half-open intervals at 0.3 and 0.7.
    #[must_use]
    pub fn from_risk(risk: f64) -> Self {
        if risk < 0.3 {
            Self::Low
        } else if risk < 0.7 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// Label shown next to the percentage.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "No significant indicators",
            Self::Moderate => "Follow-up recommended",
            Self::High => "Medical consultation advised",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Class probabilities reported by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    /// Probability of the "cancer" class
    pub yes: f64,
    /// Probability of the "no cancer" class
    pub no: f64,
}

/// Canonical prediction outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// When the result was produced (locally, or by the service for history)
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Model identifier as reported by the service
    pub model: String,

    /// Probability of cancer, 0.0 to 1.0
    pub risk: f64,

    /// False when the response carried no risk value and `risk` is the
    /// 0.0 placeholder.
    pub risk_reported: bool,

    /// Classifier confidence, 0.0 to 1.0
    pub confidence: f64,

    /// Human-readable explanation
    pub details: String,

    pub probabilities: Option<Probabilities>,

    /// Server-side log entry id
    pub log_id: Option<i64>,

    /// "YES" or "NO"
    pub prediction_label: Option<String>,
}

impl PredictionResult {
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_risk(self.risk)
    }

    /// Risk as a rounded percentage.
    #[must_use]
    pub fn risk_percent(&self) -> u32 {
        (self.risk * 100.0).round() as u32
    }

    #[must_use]
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

/// A stored prediction as returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub result: PredictionResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_risk(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_risk(0.29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_risk(0.30), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_risk(0.69), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_risk(0.70), RiskLevel::High);
        assert_eq!(RiskLevel::from_risk(1.0), RiskLevel::High);
    }

    #[test]
    fn test_labels() {
        assert_eq!(RiskLevel::from_risk(0.29).label(), "Low Risk");
        assert_eq!(RiskLevel::from_risk(0.30).to_string(), "Moderate Risk");
        assert_eq!(RiskLevel::High.label(), "High Risk");
    }

    #[test]
    fn test_percentages() {
        let result = PredictionResult {
            timestamp: chrono::Utc::now(),
            model: "svm".to_string(),
            risk: 0.734,
            risk_reported: true,
            confidence: 0.916,
            details: String::new(),
            probabilities: None,
            log_id: None,
            prediction_label: None,
        };
        assert_eq!(result.risk_percent(), 73);
        assert_eq!(result.confidence_percent(), 92);
        assert_eq!(result.risk_level(), RiskLevel::High);
    }
}
