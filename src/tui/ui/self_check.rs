//! Self-check questionnaire view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::self_check::{SelfCheck, SelfCheckOutcome, QUESTIONS};
use crate::tui::styles::MedicalTheme;

/// Render the questionnaire or, once finished, its outcome.
pub fn render_self_check(f: &mut Frame, area: Rect, quiz: &SelfCheck) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_self_check_header(f, chunks[0]);
    match quiz.outcome() {
        Some(outcome) => render_outcome(f, chunks[1], &outcome),
        None => render_question(f, chunks[1], quiz),
    }
    render_self_check_footer(f, chunks[2], quiz.is_finished());
}

fn render_self_check_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Lung Health Self-Check", MedicalTheme::title()),
        Span::styled(" │ Quick risk factor questionnaire", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_question(f: &mut Frame, area: Rect, quiz: &SelfCheck) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .margin(1)
        .split(area);

    let step = quiz.step();
    let progress = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(MedicalTheme::info())
        .ratio(step as f64 / QUESTIONS.len() as f64)
        .label(format!("Question {} of {}", step + 1, QUESTIONS.len()));
    f.render_widget(progress, chunks[0]);

    let question = quiz.current();
    let previous = quiz.answer_for(step);

    let mut lines = vec![
        Line::from(Span::styled(question.text, MedicalTheme::subtitle())),
        Line::from(""),
    ];
    for (i, option) in question.options.iter().enumerate() {
        let chosen = previous == Some(i);
        lines.push(Line::from(vec![
            Span::styled(format!(" [{}] ", i + 1), MedicalTheme::key_hint()),
            Span::styled(
                option.text,
                if chosen {
                    MedicalTheme::focused()
                } else {
                    MedicalTheme::text()
                },
            ),
        ]));
    }

    let content = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border_focused()),
    );
    f.render_widget(content, chunks[1]);
}

fn render_outcome(f: &mut Frame, area: Rect, outcome: &SelfCheckOutcome) {
    let block = Block::default()
        .title(Span::styled(" Your Results ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Level
            Constraint::Length(3), // Score gauge
            Constraint::Length(4), // Advice
            Constraint::Min(0),    // Factors
        ])
        .margin(1)
        .split(inner);

    let style = MedicalTheme::concern(outcome.level);

    let level = Paragraph::new(Line::from(Span::styled(
        format!("{} Risk", outcome.level.label()),
        style.add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(level, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Score ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(style)
        .percent(outcome.percentage.min(100) as u16)
        .label(format!(
            "{}/{} ({}%)",
            outcome.score, outcome.max_score, outcome.percentage
        ));
    f.render_widget(gauge, chunks[1]);

    let advice = Paragraph::new(Span::styled(outcome.level.advice(), MedicalTheme::text()))
        .wrap(Wrap { trim: true });
    f.render_widget(advice, chunks[2]);

    let mut factors = vec![Line::from(Span::styled(
        "Factors to consider:",
        MedicalTheme::text_secondary(),
    ))];
    if outcome.factors.is_empty() {
        factors.push(Line::from(Span::styled(
            "  No specific factors identified",
            MedicalTheme::text_muted(),
        )));
    }
    factors.extend(outcome.factors.iter().map(|factor| {
        Line::from(vec![
            Span::styled("  • ", style),
            Span::styled(*factor, MedicalTheme::text()),
        ])
    }));
    f.render_widget(Paragraph::new(factors).wrap(Wrap { trim: true }), chunks[3]);
}

fn render_self_check_footer(f: &mut Frame, area: Rect, finished: bool) {
    let content = if finished {
        Line::from(vec![
            Span::styled("[R] ", MedicalTheme::key_hint()),
            Span::styled("Retake ", MedicalTheme::key_desc()),
            Span::styled("[Backspace] ", MedicalTheme::key_hint()),
            Span::styled("Review answers ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Back", MedicalTheme::key_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[1-4] ", MedicalTheme::key_hint()),
            Span::styled("Answer ", MedicalTheme::key_desc()),
            Span::styled("[Backspace] ", MedicalTheme::key_hint()),
            Span::styled("Previous ", MedicalTheme::key_desc()),
            Span::styled("[R] ", MedicalTheme::key_hint()),
            Span::styled("Restart ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Back", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
