//! Prediction result panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{PredictionResult, RiskLevel, SymptomSummary};
use crate::tui::styles::MedicalTheme;

/// What the result panel currently shows.
#[derive(Debug, Clone, Default)]
pub enum ResultPanel {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Waiting for the prediction service
    Submitting,
    /// Latest successful prediction
    Complete(PredictionResult),
    /// Last submission failed; no result is shown
    Failed(String),
}

impl ResultPanel {
    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Complete(result) => Some(result),
            _ => None,
        }
    }
}

/// Render the result panel next to the intake form.
pub fn render_result_panel(
    f: &mut Frame,
    area: Rect,
    panel: &ResultPanel,
    summary: &SymptomSummary,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(12),   // Result
            Constraint::Length(6), // Symptom summary
        ])
        .split(area);

    match panel {
        ResultPanel::Idle => render_message(
            f,
            chunks[0],
            "Ready",
            "Fill in the profile and press Enter to run a prediction",
            MedicalTheme::text_secondary(),
        ),
        ResultPanel::Submitting => render_message(
            f,
            chunks[0],
            "Analyzing…",
            "Waiting for the prediction service",
            MedicalTheme::info(),
        ),
        ResultPanel::Complete(result) => render_result(f, chunks[0], result),
        ResultPanel::Failed(message) => render_message(
            f,
            chunks[0],
            "! Prediction failed",
            message,
            MedicalTheme::danger(),
        ),
    }

    render_summary(f, chunks[1], summary);
}

fn render_message(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    style: ratatui::style::Style,
) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(title.to_string(), style)),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), MedicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Assessment Result ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_result(f: &mut Frame, area: Rect, result: &PredictionResult) {
    let block = Block::default()
        .title(Span::styled(" Assessment Result ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Risk level
            Constraint::Length(3), // Risk gauge
            Constraint::Length(2), // Confidence / model
            Constraint::Min(0),    // Details
        ])
        .margin(1)
        .split(inner);

    // An absent risk reads as 0.0, which must not be shown as a low risk.
    let (headline, description, risk_style) = if result.risk_reported {
        let level = result.risk_level();
        let icon = match level {
            RiskLevel::Low => "OK",
            RiskLevel::Moderate | RiskLevel::High => "!",
        };
        (
            format!("{} {}", icon, level.label()),
            level.description(),
            MedicalTheme::risk_level(level),
        )
    } else {
        (
            "? Risk not reported".to_string(),
            "The service did not return a risk probability",
            MedicalTheme::text_muted(),
        )
    };

    let risk_display = Paragraph::new(vec![
        Line::from(Span::styled(headline, risk_style.add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(description, MedicalTheme::text_secondary())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(risk_display, chunks[0]);

    let (risk_label, percent) = if result.risk_reported {
        (format!("{}%", result.risk_percent()), result.risk_percent().min(100) as u16)
    } else {
        ("not reported".to_string(), 0)
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Risk Score ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(risk_style)
        .percent(percent)
        .label(risk_label);
    f.render_widget(gauge, chunks[1]);

    let meta = Paragraph::new(Line::from(vec![
        Span::styled("Confidence: ", MedicalTheme::text_secondary()),
        Span::styled(format!("{}%", result.confidence_percent()), MedicalTheme::text()),
        Span::styled("  │  Model: ", MedicalTheme::text_secondary()),
        Span::styled(result.model.as_str(), MedicalTheme::text()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(meta, chunks[2]);

    let mut details: Vec<Line> = result
        .details
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), MedicalTheme::text())))
        .collect();
    if let Some(id) = result.log_id {
        details.push(Line::from(Span::styled(
            format!("Log #{id}"),
            MedicalTheme::text_muted(),
        )));
    }
    details.push(Line::from(Span::styled(
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        MedicalTheme::text_muted(),
    )));
    f.render_widget(Paragraph::new(details).wrap(Wrap { trim: true }), chunks[3]);
}

fn render_summary(f: &mut Frame, area: Rect, summary: &SymptomSummary) {
    let factors = if summary.risk_factors.is_empty() {
        "None reported".to_string()
    } else {
        summary.risk_factors.join(", ")
    };

    let content = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Symptoms present: ", MedicalTheme::text_secondary()),
            Span::styled(
                format!(
                    "{}/{} ({}%)",
                    summary.symptoms_present, summary.total_symptoms, summary.symptom_percentage
                ),
                MedicalTheme::text(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Risk factors: ", MedicalTheme::text_secondary()),
            Span::styled(factors, MedicalTheme::text()),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Symptom Summary ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{normalize, ModelSelector, RawPrediction, SymptomProfile};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn rendered(panel: &ResultPanel) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).expect("Should create terminal");
        let summary = SymptomProfile::with_defaults().summary();
        terminal
            .draw(|f| render_result_panel(f, f.area(), panel, &summary))
            .expect("Should draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn result_from(raw: serde_json::Value) -> PredictionResult {
        let raw: RawPrediction = serde_json::from_value(raw).expect("Should decode");
        normalize(raw, ModelSelector::RandomForest).expect("Should normalize")
    }

    #[test]
    fn test_unreported_risk_is_not_shown_as_low() {
        let result = result_from(json!({ "prediction": "YES", "confidence_score": 0.9 }));
        assert!(!result.risk_reported);

        let screen = rendered(&ResultPanel::Complete(result));
        assert!(!screen.contains("Low Risk"));
        assert!(!screen.contains("No significant indicators"));
        assert!(screen.contains("Risk not reported"));
        assert!(screen.contains("not reported"));
    }

    #[test]
    fn test_reported_risk_shows_level_and_percent() {
        let result = result_from(json!({
            "prediction": "YES",
            "confidence_score": 0.82,
            "probabilities": { "cancer_risk_yes": 0.82, "cancer_risk_no": 0.18 },
            "model_used": "random_forest"
        }));

        let screen = rendered(&ResultPanel::Complete(result));
        assert!(screen.contains("High Risk"));
        assert!(screen.contains("82%"));
        assert!(!screen.contains("not reported"));
    }
}
