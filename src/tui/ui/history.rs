//! History view: past predictions with search and filters.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::application::{HistoryFilter, HistoryPage};
use crate::domain::HistoryRecord;
use crate::tui::styles::MedicalTheme;

/// History view state
#[derive(Debug, Default)]
pub struct HistoryState {
    pub page: Option<HistoryPage>,
    pub filter: HistoryFilter,
    pub error: Option<String>,
    /// Typing goes to the search box
    pub editing_search: bool,
    pub selected: usize,
}

impl HistoryState {
    /// Records passing the current filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&HistoryRecord> {
        self.page
            .as_ref()
            .map(|p| self.filter.apply(&p.records))
            .unwrap_or_default()
    }

    pub fn input_char(&mut self, c: char) {
        self.filter.search.push(c);
        self.selected = 0;
    }

    pub fn delete_char(&mut self) {
        self.filter.search.pop();
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn cycle_model(&mut self) {
        self.filter.cycle_model();
        self.selected = 0;
    }

    pub fn cycle_risk(&mut self) {
        self.filter.cycle_risk();
        self.selected = 0;
    }

    pub fn clear_filters(&mut self) {
        self.filter = HistoryFilter::default();
        self.selected = 0;
    }
}

/// Render the history view
pub fn render_history(f: &mut Frame, area: Rect, state: &HistoryState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Filters
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_history_header(f, chunks[0]);
    render_filters(f, chunks[1], state);

    if let Some(err) = &state.error {
        render_history_error(f, chunks[2], err);
    } else {
        render_table(f, chunks[2], state);
    }

    render_history_footer(f, chunks[3], state);
}

fn render_history_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Prediction History", MedicalTheme::title()),
        Span::styled(" │ Recent assessments", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_filters(f: &mut Frame, area: Rect, state: &HistoryState) {
    let search_style = if state.editing_search {
        MedicalTheme::focused()
    } else {
        MedicalTheme::text()
    };
    let search = if state.filter.search.is_empty() && !state.editing_search {
        Span::styled("(none)", MedicalTheme::text_muted())
    } else {
        Span::styled(state.filter.search.as_str(), search_style)
    };

    let line = Line::from(vec![
        Span::styled(" Search: ", MedicalTheme::text_secondary()),
        search,
        if state.editing_search {
            Span::styled("▌", MedicalTheme::focused())
        } else {
            Span::raw("")
        },
        Span::styled("   Model: ", MedicalTheme::text_secondary()),
        Span::styled(
            state.filter.model.map_or("All", |m| m.label()),
            MedicalTheme::text(),
        ),
        Span::styled("   Risk: ", MedicalTheme::text_secondary()),
        Span::styled(
            state.filter.risk.map_or("All", |r| r.label()),
            state
                .filter
                .risk
                .map_or(MedicalTheme::text(), MedicalTheme::risk_level),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if state.editing_search {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        });
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_table(f: &mut Frame, area: Rect, state: &HistoryState) {
    let records = state.visible();

    let block = Block::default()
        .title(Span::styled(" Predictions ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    if records.is_empty() {
        let message = if state.page.is_none() {
            "Loading…"
        } else {
            "No predictions match the current filters"
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            message,
            MedicalTheme::text_muted(),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(["ID", "Date", "Model", "Risk", "Score", "Confidence", "Result"])
        .style(MedicalTheme::text_secondary());

    let rows: Vec<Row> = records
        .iter()
        .map(|record| {
            let result = &record.result;
            let level = result.risk_level();
            let outcome = result.prediction_label.as_deref().unwrap_or("-");
            Row::new(vec![
                Cell::from(record.id.clone()),
                Cell::from(result.timestamp.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(result.model.clone()),
                Cell::from(Span::styled(level.label(), MedicalTheme::risk_level(level))),
                Cell::from(format!("{}%", result.risk_percent())),
                Cell::from(format!("{}%", result.confidence_percent())),
                Cell::from(outcome.to_string()),
            ])
            .style(MedicalTheme::text())
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(17),
        Constraint::Length(20),
        Constraint::Length(14),
        Constraint::Length(7),
        Constraint::Length(11),
        Constraint::Min(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(MedicalTheme::selected());

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn render_history_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Could not load history", MedicalTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, MedicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_history_footer(f: &mut Frame, area: Rect, state: &HistoryState) {
    let mut spans = Vec::new();
    if let Some(page) = &state.page {
        spans.push(Span::styled(
            format!(
                "Showing {} of {} loaded ({} on server) ",
                state.visible().len(),
                page.records.len(),
                page.total_count
            ),
            MedicalTheme::text_muted(),
        ));
        if page.skipped > 0 {
            spans.push(Span::styled(
                format!("{} unreadable skipped ", page.skipped),
                MedicalTheme::warning(),
            ));
        }
    }

    if state.editing_search {
        spans.extend([
            Span::styled("[Enter/Esc] ", MedicalTheme::key_hint()),
            Span::styled("Done", MedicalTheme::key_desc()),
        ]);
    } else {
        spans.extend([
            Span::styled("[/] ", MedicalTheme::key_hint()),
            Span::styled("Search ", MedicalTheme::key_desc()),
            Span::styled("[M] ", MedicalTheme::key_hint()),
            Span::styled("Model ", MedicalTheme::key_desc()),
            Span::styled("[K] ", MedicalTheme::key_hint()),
            Span::styled("Risk ", MedicalTheme::key_desc()),
            Span::styled("[C] ", MedicalTheme::key_hint()),
            Span::styled("Clear ", MedicalTheme::key_desc()),
            Span::styled("[R] ", MedicalTheme::key_hint()),
            Span::styled("Refresh ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Back", MedicalTheme::key_desc()),
        ]);
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionResult;

    fn record(id: &str, risk: f64) -> HistoryRecord {
        HistoryRecord {
            id: id.to_string(),
            result: PredictionResult {
                timestamp: chrono::Utc::now(),
                model: "svm".to_string(),
                risk,
                risk_reported: true,
                confidence: risk.max(1.0 - risk),
                details: String::new(),
                probabilities: None,
                log_id: None,
                prediction_label: None,
            },
        }
    }

    #[test]
    fn test_selection_follows_filter() {
        let mut state = HistoryState {
            page: Some(HistoryPage {
                records: vec![record("11", 0.1), record("12", 0.9), record("21", 0.5)],
                total_count: 3,
                skipped: 0,
            }),
            ..HistoryState::default()
        };

        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 2);

        state.input_char('1');
        assert_eq!(state.selected, 0);
        assert_eq!(state.visible().len(), 3);
        state.input_char('2');
        assert_eq!(state.visible().len(), 1);

        state.clear_filters();
        state.cycle_risk();
        assert_eq!(state.visible().len(), 1);
        assert_eq!(state.visible()[0].id, "11");
    }
}
