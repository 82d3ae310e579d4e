//! Lung-health self-check questionnaire.
//!
//! Eight fixed multiple-choice questions. Each option carries a point
//! weight; the total is capped at [`MAX_SCORE`] and reported as a
//! percentage with one of three concern levels. Educational only.

use serde::{Deserialize, Serialize};

/// Score that maps to 100%.
pub const MAX_SCORE: u32 = 16;

/// One answer option with its point weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionOption {
    pub text: &'static str,
    pub points: u32,
}

/// A questionnaire entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub text: &'static str,
    pub options: &'static [QuestionOption],
}

const fn opt(text: &'static str, points: u32) -> QuestionOption {
    QuestionOption { text, points }
}

pub const QUESTIONS: [Question; 8] = [
    Question {
        id: 1,
        text: "Do you currently smoke or have you smoked regularly in the past?",
        options: &[
            opt("Yes, I currently smoke", 4),
            opt("I used to smoke but quit", 2),
            opt("No, I have never smoked regularly", 0),
        ],
    },
    Question {
        id: 2,
        text: "Have you experienced a persistent cough for more than 3 weeks?",
        options: &[
            opt("Yes, frequently", 2),
            opt("Occasionally", 1),
            opt("No, rarely or never", 0),
        ],
    },
    Question {
        id: 3,
        text: "Do you often feel short of breath during normal activities?",
        options: &[
            opt("Yes, frequently", 2),
            opt("Sometimes", 1),
            opt("No, rarely or never", 0),
        ],
    },
    Question {
        id: 4,
        text: "Have you noticed any blood in your sputum (phlegm) when coughing?",
        options: &[opt("Yes", 3), opt("Not sure", 1), opt("No", 0)],
    },
    Question {
        id: 5,
        text: "Do you experience chest pain or discomfort, especially when breathing deeply?",
        options: &[
            opt("Yes, frequently", 2),
            opt("Occasionally", 1),
            opt("No, rarely or never", 0),
        ],
    },
    Question {
        id: 6,
        text: "Have you lost weight unexpectedly in the past few months?",
        options: &[
            opt("Yes, significantly", 2),
            opt("Yes, but only slightly", 1),
            opt("No weight loss", 0),
        ],
    },
    Question {
        id: 7,
        text: "Do you have a history of exposure to any of these substances?",
        options: &[
            opt("Asbestos", 2),
            opt("Radon", 2),
            opt("Industrial chemicals", 2),
            opt("None of these", 0),
        ],
    },
    Question {
        id: 8,
        text: "Is there a history of lung cancer in your immediate family?",
        options: &[
            opt("Yes, immediate family", 2),
            opt("Yes, extended family", 1),
            opt("No family history", 0),
        ],
    },
];

/// Concern level derived from the percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcernLevel {
    Low,
    Moderate,
    Higher,
}

impl ConcernLevel {
    /// Thresholds: below 25 Low, below 50 Moderate, otherwise Higher.
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage < 25 {
            Self::Low
        } else if percentage < 50 {
            Self::Moderate
        } else {
            Self::Higher
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Higher => "Higher",
        }
    }

    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Low => "Your responses suggest a lower risk for lung health concerns. Continue maintaining good lung health practices.",
            Self::Moderate => "Some risk factors are present. Consider discussing these with your healthcare provider during your next visit.",
            Self::Higher => "Several risk factors are present. We recommend consulting with a healthcare professional for proper evaluation.",
        }
    }
}

/// Final questionnaire outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfCheckOutcome {
    /// Capped point total
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub level: ConcernLevel,
    pub factors: Vec<&'static str>,
}

/// Score a full set of answers (option index per question).
///
/// Unanswered questions (`None`) and unknown indices score zero.
#[must_use]
pub fn score(answers: &[Option<usize>; 8]) -> SelfCheckOutcome {
    let raw: u32 = QUESTIONS
        .iter()
        .zip(answers.iter())
        .filter_map(|(q, a)| a.and_then(|idx| q.options.get(idx)))
        .map(|o| o.points)
        .sum();
    let score = raw.min(MAX_SCORE);
    let percentage = ((f64::from(score) / f64::from(MAX_SCORE)) * 100.0).round() as u32;

    SelfCheckOutcome {
        score,
        max_score: MAX_SCORE,
        percentage,
        level: ConcernLevel::from_percentage(percentage),
        factors: factors(answers),
    }
}

fn chosen(answers: &[Option<usize>; 8], question: usize) -> Option<&'static str> {
    answers[question].and_then(|idx| QUESTIONS[question].options.get(idx).map(|o| o.text))
}

/// Follow-up notes triggered by specific answers.
fn factors(answers: &[Option<usize>; 8]) -> Vec<&'static str> {
    let mut out = Vec::new();
    if chosen(answers, 0) == Some("Yes, I currently smoke") {
        out.push("Smoking: Current smoking significantly increases lung cancer risk. Consider a smoking cessation program.");
    }
    if chosen(answers, 1) == Some("Yes, frequently") || chosen(answers, 2) == Some("Yes, frequently") {
        out.push("Respiratory Symptoms: Persistent cough or shortness of breath should be evaluated by a healthcare provider.");
    }
    if chosen(answers, 3) == Some("Yes") {
        out.push("Blood in Sputum: This symptom requires prompt medical attention.");
    }
    if matches!(chosen(answers, 6), Some(s) if s != "None of these") {
        out.push("Environmental Exposure: Your exposure history may increase your risk. Mention it to your doctor.");
    }
    if chosen(answers, 7) == Some("Yes, immediate family") {
        out.push("Family History: Having close relatives with lung cancer may increase your risk.");
    }
    out
}

/// Step-by-step questionnaire state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfCheck {
    step: usize,
    answers: [Option<usize>; 8],
    finished: bool,
}

impl SelfCheck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Question currently shown (the last one once finished).
    #[must_use]
    pub fn current(&self) -> &'static Question {
        &QUESTIONS[self.step]
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn answer_for(&self, step: usize) -> Option<usize> {
        self.answers.get(step).copied().flatten()
    }

    /// Record an option for the current question and advance.
    ///
    /// Ignores indices outside the current question's options.
    pub fn answer(&mut self, option: usize) {
        if self.finished || option >= self.current().options.len() {
            return;
        }
        self.answers[self.step] = Some(option);
        if self.step + 1 < QUESTIONS.len() {
            self.step += 1;
        } else {
            self.finished = true;
        }
    }

    /// Go back one question. Earlier answers are kept.
    pub fn back(&mut self) {
        if self.finished {
            self.finished = false;
        } else if self.step > 0 {
            self.step -= 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Outcome, available once every question is answered.
    #[must_use]
    pub fn outcome(&self) -> Option<SelfCheckOutcome> {
        self.finished.then(|| score(&self.answers))
    }
}
