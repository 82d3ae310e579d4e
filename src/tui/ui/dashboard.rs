//! Dashboard view: intake form beside the latest result.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::Session;
use crate::tui::styles::MedicalTheme;

use super::intake::{render_intake_form, IntakeFormState};
use super::result::{render_result_panel, ResultPanel};

/// Render the dashboard.
pub fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    session: &Session,
    service_online: Option<bool>,
    form: &IntakeFormState,
    panel: &ResultPanel,
    busy: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form + result
            Constraint::Length(3), // Footer/errors
        ])
        .split(area);

    render_header(f, chunks[0], session, service_online);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_intake_form(f, body[0], form, busy);
    render_result_panel(f, body[1], panel, &form.profile.summary());
    render_footer(f, chunks[2], form, busy, panel.result().is_some());
}

fn render_header(f: &mut Frame, area: Rect, session: &Session, service_online: Option<bool>) {
    let status = match service_online {
        Some(true) => Span::styled("● service online", MedicalTheme::success()),
        Some(false) => Span::styled("● service unreachable", MedicalTheme::danger()),
        None => Span::styled("● service unknown", MedicalTheme::text_muted()),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Pulmocheck", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("Lung Cancer Risk Assessment", MedicalTheme::text_secondary()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled(session.email(), MedicalTheme::text()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        status,
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_footer(
    f: &mut Frame,
    area: Rect,
    form: &IntakeFormState,
    busy: bool,
    has_result: bool,
) {
    let content = if !form.errors.is_empty() {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(form.errors.join(", "), MedicalTheme::danger()),
        ])
    } else if busy {
        Line::from(Span::styled("Submitting…", MedicalTheme::text_muted()))
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[Space/←→] ", MedicalTheme::key_hint()),
            Span::styled("Change ", MedicalTheme::key_desc()),
            Span::styled("[Del] ", MedicalTheme::key_hint()),
            Span::styled("Clear ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled(
                if has_result { "Re-analyze " } else { "Analyze " },
                MedicalTheme::key_desc(),
            ),
            Span::styled("[R] ", MedicalTheme::key_hint()),
            Span::styled("Reset ", MedicalTheme::key_desc()),
            Span::styled("[F2] ", MedicalTheme::key_hint()),
            Span::styled("History ", MedicalTheme::key_desc()),
            Span::styled("[F3] ", MedicalTheme::key_hint()),
            Span::styled("Self-Check ", MedicalTheme::key_desc()),
            Span::styled("[F10] ", MedicalTheme::key_hint()),
            Span::styled("Logout", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
