//! Wire encoding of a symptom profile.
//!
//! The remote classifier expects a flat record of 0/1 flags plus the age,
//! keyed by the dataset's upper-case column names.

use serde::{Deserialize, Serialize};

use crate::domain::{ModelSelector, Symptom, SymptomProfile};
use crate::PulmocheckError;

/// Column names in the order the model was trained on.
pub const FEATURE_NAMES: [&str; 14] = [
    "GENDER",
    "AGE",
    "SMOKING",
    "YELLOW_FINGERS",
    "ANXIETY",
    "PEER_PRESSURE",
    "CHRONIC_DISEASE",
    "FATIGUE",
    "ALLERGY",
    "WHEEZING",
    "ALCOHOL_CONSUMING",
    "COUGHING",
    "SHORTNESS_OF_BREATH",
    "SWALLOWING_DIFFICULTY",
];

/// Numeric feature record sent to the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FeatureVector {
    pub gender: u8,
    pub age: u32,
    pub smoking: u8,
    pub yellow_fingers: u8,
    pub anxiety: u8,
    pub peer_pressure: u8,
    pub chronic_disease: u8,
    pub fatigue: u8,
    pub allergy: u8,
    pub wheezing: u8,
    pub alcohol_consuming: u8,
    pub coughing: u8,
    pub shortness_of_breath: u8,
    pub swallowing_difficulty: u8,
}

impl FeatureVector {
    /// Encode a complete profile.
    ///
    /// # Errors
    /// Returns `PulmocheckError::Validation` listing every missing or
    /// out-of-range field. Missing answers are never defaulted.
    pub fn from_profile(profile: &SymptomProfile) -> Result<Self, PulmocheckError> {
        profile.validate().map_err(PulmocheckError::Validation)?;

        let age = profile
            .age
            .ok_or_else(|| PulmocheckError::Validation(vec!["Age is required".to_string()]))?;
        let gender = profile
            .gender
            .ok_or_else(|| PulmocheckError::Validation(vec!["Gender is required".to_string()]))?;

        Ok(Self {
            gender: gender.code(),
            age,
            smoking: flag(profile, Symptom::Smoking)?,
            yellow_fingers: flag(profile, Symptom::YellowFingers)?,
            anxiety: flag(profile, Symptom::Anxiety)?,
            peer_pressure: flag(profile, Symptom::PeerPressure)?,
            chronic_disease: flag(profile, Symptom::ChronicDisease)?,
            fatigue: flag(profile, Symptom::Fatigue)?,
            allergy: flag(profile, Symptom::Allergy)?,
            wheezing: flag(profile, Symptom::Wheezing)?,
            alcohol_consuming: flag(profile, Symptom::AlcoholConsuming)?,
            coughing: flag(profile, Symptom::Coughing)?,
            shortness_of_breath: flag(profile, Symptom::ShortnessOfBreath)?,
            swallowing_difficulty: flag(profile, Symptom::SwallowingDifficulty)?,
        })
    }

    /// Values in `FEATURE_NAMES` order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u32> {
        vec![
            u32::from(self.gender),
            self.age,
            u32::from(self.smoking),
            u32::from(self.yellow_fingers),
            u32::from(self.anxiety),
            u32::from(self.peer_pressure),
            u32::from(self.chronic_disease),
            u32::from(self.fatigue),
            u32::from(self.allergy),
            u32::from(self.wheezing),
            u32::from(self.alcohol_consuming),
            u32::from(self.coughing),
            u32::from(self.shortness_of_breath),
            u32::from(self.swallowing_difficulty),
        ]
    }
}

fn flag(profile: &SymptomProfile, symptom: Symptom) -> Result<u8, PulmocheckError> {
    profile
        .symptom(symptom)
        .map(|a| a.code())
        .ok_or_else(|| PulmocheckError::Validation(vec![format!("{} is required", symptom.label())]))
}

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub features: FeatureVector,
    pub model: ModelSelector,
}

impl PredictionRequest {
    /// Transform a profile and model choice into a request body.
    ///
    /// # Errors
    /// Propagates validation failures from [`FeatureVector::from_profile`].
    pub fn new(profile: &SymptomProfile, model: ModelSelector) -> Result<Self, PulmocheckError> {
        Ok(Self {
            features: FeatureVector::from_profile(profile)?,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Answer, Gender};
    use serde_json::json;

    fn smoker_45() -> SymptomProfile {
        let mut profile = SymptomProfile::with_defaults();
        profile.set_symptom(Symptom::Smoking, Answer::Yes);
        profile
    }

    #[test]
    fn test_scenario_body() {
        let request =
            PredictionRequest::new(&smoker_45(), ModelSelector::RandomForest).expect("Should encode");
        let body = serde_json::to_value(&request).expect("serialize");

        assert_eq!(
            body,
            json!({
                "features": {
                    "GENDER": 1, "AGE": 45, "SMOKING": 1, "YELLOW_FINGERS": 0,
                    "ANXIETY": 0, "PEER_PRESSURE": 0, "CHRONIC_DISEASE": 0,
                    "FATIGUE": 0, "ALLERGY": 0, "WHEEZING": 0,
                    "ALCOHOL_CONSUMING": 0, "COUGHING": 0,
                    "SHORTNESS_OF_BREATH": 0, "SWALLOWING_DIFFICULTY": 0
                },
                "model": "random_forest"
            })
        );
    }

    #[test]
    fn test_flag_mapping() {
        for symptom in Symptom::ALL {
            let mut profile = SymptomProfile::with_defaults();
            profile.gender = Some(Gender::Female);
            profile.set_symptom(symptom, Answer::Yes);

            let vector = FeatureVector::from_profile(&profile).expect("Should encode");
            assert_eq!(vector.gender, 0);
            let values = vector.to_vec();
            // Exactly one flag set, and it is the one we answered "yes".
            let ones: u32 = values[2..].iter().sum();
            assert_eq!(ones, 1, "{symptom:?}");
            let idx = Symptom::ALL.iter().position(|s| *s == symptom).unwrap_or(0) + 2;
            assert_eq!(values[idx], 1, "{}", FEATURE_NAMES[idx]);
        }
    }

    #[test]
    fn test_transformation_is_idempotent() {
        let profile = smoker_45();
        let a = FeatureVector::from_profile(&profile).expect("first");
        let b = FeatureVector::from_profile(&profile).expect("second");
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_flag_is_not_defaulted() {
        let mut profile = smoker_45();
        profile.clear_symptom(Symptom::Fatigue);

        match FeatureVector::from_profile(&profile) {
            Err(PulmocheckError::Validation(errors)) => {
                assert_eq!(errors, vec!["Fatigue is required".to_string()]);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_age_rejected() {
        let mut profile = smoker_45();
        profile.age = Some(150);
        assert!(matches!(
            PredictionRequest::new(&profile, ModelSelector::Svm),
            Err(PulmocheckError::Validation(_))
        ));
    }
}
