//! Patient symptom profile for lung-cancer risk prediction.
//!
//! Mirrors the intake questionnaire: age, gender and twelve yes/no symptom
//! flags. Every field stays optional while the form is being filled in, so
//! an incomplete profile is representable and can be rejected explicitly.

use serde::{Deserialize, Serialize};

/// Lowest accepted age in years.
pub const MIN_AGE: u32 = 0;

/// Highest accepted age in years.
pub const MAX_AGE: u32 = 120;

/// Biological gender as asked on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Wire encoding: male = 1, female = 0.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Male => 1,
            Self::Female => 0,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

/// A yes/no answer to a symptom question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Wire encoding: yes = 1, no = 0.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Yes => 1,
            Self::No => 0,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Yes => Self::No,
            Self::No => Self::Yes,
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

/// The twelve binary symptom questions, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symptom {
    Smoking,
    YellowFingers,
    Anxiety,
    PeerPressure,
    ChronicDisease,
    Fatigue,
    Allergy,
    Wheezing,
    AlcoholConsuming,
    Coughing,
    ShortnessOfBreath,
    SwallowingDifficulty,
}

impl Symptom {
    pub const ALL: [Symptom; 12] = [
        Symptom::Smoking,
        Symptom::YellowFingers,
        Symptom::Anxiety,
        Symptom::PeerPressure,
        Symptom::ChronicDisease,
        Symptom::Fatigue,
        Symptom::Allergy,
        Symptom::Wheezing,
        Symptom::AlcoholConsuming,
        Symptom::Coughing,
        Symptom::ShortnessOfBreath,
        Symptom::SwallowingDifficulty,
    ];

    /// Human-facing label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Smoking => "Smoking",
            Self::YellowFingers => "Yellow Fingers",
            Self::Anxiety => "Anxiety",
            Self::PeerPressure => "Peer Pressure",
            Self::ChronicDisease => "Chronic Disease",
            Self::Fatigue => "Fatigue",
            Self::Allergy => "Allergy",
            Self::Wheezing => "Wheezing",
            Self::AlcoholConsuming => "Alcohol Consuming",
            Self::Coughing => "Coughing",
            Self::ShortnessOfBreath => "Shortness of Breath",
            Self::SwallowingDifficulty => "Swallowing Difficulty",
        }
    }

    /// One-line explanation shown under the field.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Smoking => "Current or past smoking history",
            Self::YellowFingers => "Yellow discoloration of fingers",
            Self::Anxiety => "Frequent anxiety or nervousness",
            Self::PeerPressure => "Experiencing peer pressure related to smoking",
            Self::ChronicDisease => "History of chronic diseases",
            Self::Fatigue => "Persistent tiredness or fatigue",
            Self::Allergy => "Known allergies or allergic reactions",
            Self::Wheezing => "Whistling sound when breathing",
            Self::AlcoholConsuming => "Regular alcohol consumption",
            Self::Coughing => "Persistent or frequent coughing",
            Self::ShortnessOfBreath => "Difficulty breathing or breathlessness",
            Self::SwallowingDifficulty => "Difficulty swallowing food or liquids",
        }
    }
}

/// Demographic and symptom answers for one patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SymptomProfile {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub smoking: Option<Answer>,
    pub yellow_fingers: Option<Answer>,
    pub anxiety: Option<Answer>,
    pub peer_pressure: Option<Answer>,
    pub chronic_disease: Option<Answer>,
    pub fatigue: Option<Answer>,
    pub allergy: Option<Answer>,
    pub wheezing: Option<Answer>,
    pub alcohol_consuming: Option<Answer>,
    pub coughing: Option<Answer>,
    pub shortness_of_breath: Option<Answer>,
    pub swallowing_difficulty: Option<Answer>,
}

/// Aggregate view of the answered symptoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomSummary {
    pub symptoms_present: usize,
    pub total_symptoms: usize,
    /// Rounded share of "yes" answers, 0-100.
    pub symptom_percentage: u32,
    pub risk_factors: Vec<&'static str>,
}

impl SymptomProfile {
    /// Profile pre-filled with the intake form defaults: 45 year old male,
    /// every symptom answered "no".
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut profile = Self {
            age: Some(45),
            gender: Some(Gender::Male),
            ..Self::default()
        };
        for symptom in Symptom::ALL {
            profile.set_symptom(symptom, Answer::No);
        }
        profile
    }

    /// Answer for a symptom, if given.
    #[must_use]
    pub fn symptom(&self, symptom: Symptom) -> Option<Answer> {
        match symptom {
            Symptom::Smoking => self.smoking,
            Symptom::YellowFingers => self.yellow_fingers,
            Symptom::Anxiety => self.anxiety,
            Symptom::PeerPressure => self.peer_pressure,
            Symptom::ChronicDisease => self.chronic_disease,
            Symptom::Fatigue => self.fatigue,
            Symptom::Allergy => self.allergy,
            Symptom::Wheezing => self.wheezing,
            Symptom::AlcoholConsuming => self.alcohol_consuming,
            Symptom::Coughing => self.coughing,
            Symptom::ShortnessOfBreath => self.shortness_of_breath,
            Symptom::SwallowingDifficulty => self.swallowing_difficulty,
        }
    }

    pub fn set_symptom(&mut self, symptom: Symptom, answer: Answer) {
        *self.symptom_slot(symptom) = Some(answer);
    }

    pub fn clear_symptom(&mut self, symptom: Symptom) {
        *self.symptom_slot(symptom) = None;
    }

    fn symptom_slot(&mut self, symptom: Symptom) -> &mut Option<Answer> {
        match symptom {
            Symptom::Smoking => &mut self.smoking,
            Symptom::YellowFingers => &mut self.yellow_fingers,
            Symptom::Anxiety => &mut self.anxiety,
            Symptom::PeerPressure => &mut self.peer_pressure,
            Symptom::ChronicDisease => &mut self.chronic_disease,
            Symptom::Fatigue => &mut self.fatigue,
            Symptom::Allergy => &mut self.allergy,
            Symptom::Wheezing => &mut self.wheezing,
            Symptom::AlcoholConsuming => &mut self.alcohol_consuming,
            Symptom::Coughing => &mut self.coughing,
            Symptom::ShortnessOfBreath => &mut self.shortness_of_breath,
            Symptom::SwallowingDifficulty => &mut self.swallowing_difficulty,
        }
    }

    /// Check that every field is present and age is within range.
    ///
    /// # Errors
    /// Returns one message per missing or invalid field, in form order.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match self.age {
            None => errors.push("Age is required".to_string()),
            Some(age) if !(MIN_AGE..=MAX_AGE).contains(&age) => {
                errors.push(format!("Age must be between {MIN_AGE} and {MAX_AGE}"));
            }
            Some(_) => {}
        }
        if self.gender.is_none() {
            errors.push("Gender is required".to_string());
        }
        for symptom in Symptom::ALL {
            if self.symptom(symptom).is_none() {
                errors.push(format!("{} is required", symptom.label()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Count and list the symptoms answered "yes".
    #[must_use]
    pub fn summary(&self) -> SymptomSummary {
        let risk_factors: Vec<&'static str> = Symptom::ALL
            .iter()
            .filter(|s| self.symptom(**s) == Some(Answer::Yes))
            .map(|s| s.label())
            .collect();
        let total = Symptom::ALL.len();
        let present = risk_factors.len();
        let percentage = ((present as f64 / total as f64) * 100.0).round() as u32;

        SymptomSummary {
            symptoms_present: present,
            total_symptoms: total,
            symptom_percentage: percentage,
            risk_factors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_complete() {
        let profile = SymptomProfile::with_defaults();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.age, Some(45));
        assert_eq!(profile.gender, Some(Gender::Male));
        assert_eq!(profile.summary().symptoms_present, 0);
    }

    #[test]
    fn test_validation_reports_every_missing_field() {
        let errors = SymptomProfile::default().validate().unwrap_err();
        // age + gender + 12 symptoms
        assert_eq!(errors.len(), 14);
        assert_eq!(errors[0], "Age is required");
        assert!(errors.contains(&"Swallowing Difficulty is required".to_string()));
    }

    #[test]
    fn test_age_bounds() {
        let mut profile = SymptomProfile::with_defaults();
        profile.age = Some(0);
        assert!(profile.validate().is_ok());
        profile.age = Some(120);
        assert!(profile.validate().is_ok());
        profile.age = Some(121);
        let errors = profile.validate().unwrap_err();
        assert_eq!(errors, vec!["Age must be between 0 and 120".to_string()]);
    }

    #[test]
    fn test_summary() {
        let mut profile = SymptomProfile::with_defaults();
        profile.set_symptom(Symptom::Smoking, Answer::Yes);
        profile.set_symptom(Symptom::Coughing, Answer::Yes);
        profile.set_symptom(Symptom::Wheezing, Answer::Yes);

        let summary = profile.summary();
        assert_eq!(summary.symptoms_present, 3);
        assert_eq!(summary.total_symptoms, 12);
        assert_eq!(summary.symptom_percentage, 25);
        assert_eq!(summary.risk_factors, vec!["Smoking", "Wheezing", "Coughing"]);
    }

    #[test]
    fn test_camel_case_serialization() {
        let json = serde_json::to_value(SymptomProfile::with_defaults()).expect("serialize");
        assert_eq!(json["yellowFingers"], "no");
        assert_eq!(json["gender"], "male");
    }
}
