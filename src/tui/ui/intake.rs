//! Symptom intake form.

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{Answer, Gender, ModelSelector, Symptom, SymptomProfile};
use crate::tui::styles::MedicalTheme;

const AGE_MAX_DIGITS: usize = 3;

/// A row of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeField {
    Age,
    Gender,
    Symptom(Symptom),
    Model,
}

impl IntakeField {
    /// Age, gender, twelve symptoms, model.
    pub const COUNT: usize = 2 + Symptom::ALL.len() + 1;

    fn at(index: usize) -> Self {
        match index {
            0 => Self::Age,
            1 => Self::Gender,
            i @ 2..=13 => Self::Symptom(Symptom::ALL[i - 2]),
            _ => Self::Model,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Symptom(s) => s.label(),
            Self::Model => "Model",
        }
    }
}

/// Intake form state: the profile being edited plus the chosen model.
#[derive(Debug, Clone)]
pub struct IntakeFormState {
    pub profile: SymptomProfile,
    pub model: ModelSelector,
    pub selected_field: usize,
    pub errors: Vec<String>,
    age_input: String,
    models: Vec<ModelSelector>,
}

impl Default for IntakeFormState {
    fn default() -> Self {
        Self::new(ModelSelector::default())
    }
}

impl IntakeFormState {
    /// Fresh form with the standard defaults and `model` selected.
    #[must_use]
    pub fn new(model: ModelSelector) -> Self {
        let profile = SymptomProfile::with_defaults();
        let age_input = profile.age.map(|a| a.to_string()).unwrap_or_default();
        Self {
            profile,
            model,
            selected_field: 0,
            errors: Vec::new(),
            age_input,
            models: ModelSelector::ALL.to_vec(),
        }
    }

    #[must_use]
    pub fn field(&self) -> IntakeField {
        IntakeField::at(self.selected_field)
    }

    #[must_use]
    pub fn age_input(&self) -> &str {
        &self.age_input
    }

    #[must_use]
    pub fn models(&self) -> &[ModelSelector] {
        &self.models
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % IntakeField::COUNT;
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = IntakeField::COUNT - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Type into the age field. Other fields ignore characters.
    pub fn input_char(&mut self, c: char) {
        if self.field() == IntakeField::Age
            && c.is_ascii_digit()
            && self.age_input.len() < AGE_MAX_DIGITS
        {
            self.age_input.push(c);
            self.sync_age();
        }
    }

    pub fn delete_char(&mut self) {
        if self.field() == IntakeField::Age {
            self.age_input.pop();
            self.sync_age();
        }
    }

    /// Flip the current choice: gender, yes/no, or the next model.
    pub fn toggle(&mut self) {
        match self.field() {
            IntakeField::Age => {}
            IntakeField::Gender => {
                self.profile.gender = Some(self.profile.gender.map_or(Gender::Male, Gender::toggled));
            }
            IntakeField::Symptom(s) => {
                let answer = self.profile.symptom(s).map_or(Answer::Yes, Answer::toggled);
                self.profile.set_symptom(s, answer);
            }
            IntakeField::Model => self.step_model(1),
        }
        self.errors.clear();
    }

    /// Like [`toggle`](Self::toggle), but walks the model list backwards.
    pub fn toggle_back(&mut self) {
        if self.field() == IntakeField::Model {
            self.step_model(self.models.len().saturating_sub(1));
            self.errors.clear();
        } else {
            self.toggle();
        }
    }

    /// Unset the current field so it must be answered again.
    pub fn clear_field(&mut self) {
        match self.field() {
            IntakeField::Age => {
                self.age_input.clear();
                self.sync_age();
            }
            IntakeField::Gender => self.profile.gender = None,
            IntakeField::Symptom(s) => self.profile.clear_symptom(s),
            IntakeField::Model => {}
        }
    }

    /// Restore defaults, keeping the model list and the chosen model.
    pub fn reset(&mut self) {
        let models = std::mem::take(&mut self.models);
        *self = Self {
            models,
            ..Self::new(self.model)
        };
    }

    /// Replace the selectable models. An empty list is ignored.
    pub fn set_models(&mut self, models: Vec<ModelSelector>) {
        if models.is_empty() {
            return;
        }
        if !models.contains(&self.model) {
            self.model = models[0];
        }
        self.models = models;
    }

    /// Check the profile, keeping the messages for display.
    pub fn validate(&mut self) -> bool {
        match self.profile.validate() {
            Ok(()) => {
                self.errors.clear();
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    fn sync_age(&mut self) {
        self.profile.age = self.age_input.parse().ok();
        self.errors.clear();
    }

    fn step_model(&mut self, by: usize) {
        if self.models.is_empty() {
            return;
        }
        let current = self
            .models
            .iter()
            .position(|m| *m == self.model)
            .unwrap_or(0);
        self.model = self.models[(current + by) % self.models.len()];
    }

    fn value_span(&self, field: IntakeField) -> Span<'_> {
        let unset = || Span::styled("(required)", MedicalTheme::warning());
        match field {
            IntakeField::Age if self.age_input().is_empty() => unset(),
            IntakeField::Age => Span::styled(self.age_input(), MedicalTheme::text()),
            IntakeField::Gender => match self.profile.gender {
                Some(g) => Span::styled(g.to_string(), MedicalTheme::text()),
                None => unset(),
            },
            IntakeField::Symptom(s) => match self.profile.symptom(s) {
                Some(Answer::Yes) => Span::styled("Yes", MedicalTheme::warning()),
                Some(Answer::No) => Span::styled("No", MedicalTheme::text_secondary()),
                None => unset(),
            },
            IntakeField::Model => Span::styled(
                format!("{} ({} available)", self.model.label(), self.models().len()),
                MedicalTheme::info(),
            ),
        }
    }
}

/// Render the intake form as one row per field.
pub fn render_intake_form(f: &mut Frame, area: Rect, state: &IntakeFormState, locked: bool) {
    let lines: Vec<Line> = (0..IntakeField::COUNT)
        .map(|i| {
            let field = IntakeField::at(i);
            let is_selected = i == state.selected_field;
            let label_style = if is_selected {
                MedicalTheme::focused()
            } else {
                MedicalTheme::text_secondary()
            };
            let mut value = state.value_span(field);
            if is_selected {
                value = value.patch_style(ratatui::style::Style::default().add_modifier(Modifier::BOLD));
            }

            Line::from(vec![
                Span::styled(if is_selected { " ▸ " } else { "   " }, MedicalTheme::focused()),
                Span::styled(format!("{:<22}", field.label()), label_style),
                value,
            ])
        })
        .collect();

    let title = if locked {
        " Symptom Profile (submitting…) "
    } else {
        " Symptom Profile "
    };
    let block = Block::default()
        .title(Span::styled(title, MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(if locked {
            MedicalTheme::border()
        } else {
            MedicalTheme::border_focused()
        });

    f.render_widget(Paragraph::new(lines).block(block), area);
}
