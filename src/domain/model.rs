//! Prediction model identifiers offered by the remote service.

use serde::{Deserialize, Serialize};

/// One of the classifiers the prediction service can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelSelector {
    #[default]
    RandomForest,
    LogisticRegression,
    NeuralNetwork,
    Svm,
}

impl ModelSelector {
    pub const ALL: [ModelSelector; 4] = [
        ModelSelector::RandomForest,
        ModelSelector::LogisticRegression,
        ModelSelector::NeuralNetwork,
        ModelSelector::Svm,
    ];

    /// Identifier sent on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RandomForest => "random_forest",
            Self::LogisticRegression => "logistic_regression",
            Self::NeuralNetwork => "neural_network",
            Self::Svm => "svm",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::RandomForest => "Random Forest",
            Self::LogisticRegression => "Logistic Regression",
            Self::NeuralNetwork => "Neural Network",
            Self::Svm => "Support Vector Machine",
        }
    }

    /// Cycle to the next model (wraps around).
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModelSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Unknown model '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for model in ModelSelector::ALL {
            let parsed: ModelSelector = model.to_string().parse().expect("Should parse");
            assert_eq!(parsed, model);
        }
        assert!("gradient_boosting".parse::<ModelSelector>().is_err());
    }

    #[test]
    fn test_cycling() {
        assert_eq!(ModelSelector::Svm.next(), ModelSelector::RandomForest);
        assert_eq!(ModelSelector::RandomForest.prev(), ModelSelector::Svm);
        assert_eq!(ModelSelector::default(), ModelSelector::RandomForest);
    }

    #[test]
    fn test_serde_name() {
        let json = serde_json::to_string(&ModelSelector::LogisticRegression).expect("serialize");
        assert_eq!(json, "\"logistic_regression\"");
    }
}
