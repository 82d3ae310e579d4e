//! Login screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use zeroize::Zeroize;

use crate::tui::styles::MedicalTheme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Login form state. The password buffer is wiped on submit and on drop.
#[derive(Default)]
pub struct LoginState {
    pub email: String,
    password: String,
    pub focus: LoginField,
    pub error: Option<String>,
}

impl LoginState {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.focus {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
        }
        self.error = None;
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            LoginField::Email => {
                self.email.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    #[must_use]
    pub fn password_len(&self) -> usize {
        self.password.chars().count()
    }

    /// Hand the password over, leaving an empty buffer behind.
    pub fn take_password(&mut self) -> String {
        std::mem::take(&mut self.password)
    }
}

impl Drop for LoginState {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Render the login screen.
pub fn render_login(f: &mut Frame, area: Rect, state: &LoginState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Length(14),
            Constraint::Min(0),
        ])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(outer[1]);

    let block = Block::default()
        .title(Span::styled(" Pulmocheck │ Sign in ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let inner = block.inner(columns[1]);
    f.render_widget(block, columns[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(2), // Error
            Constraint::Min(0),    // Hints
        ])
        .margin(1)
        .split(inner);

    let masked = "•".repeat(state.password_len());
    render_input(f, rows[0], "Email", &state.email, state.focus == LoginField::Email);
    render_input(f, rows[1], "Password", &masked, state.focus == LoginField::Password);

    if let Some(err) = &state.error {
        let error = Paragraph::new(Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.as_str(), MedicalTheme::danger()),
        ]))
        .wrap(Wrap { trim: true });
        f.render_widget(error, rows[2]);
    }

    let hints = Paragraph::new(Line::from(vec![
        Span::styled("[Tab] ", MedicalTheme::key_hint()),
        Span::styled("Switch field ", MedicalTheme::key_desc()),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Sign in ", MedicalTheme::key_desc()),
        Span::styled("[Ctrl+Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(hints, rows[3]);
}

fn render_input(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {label} "),
            if focused {
                MedicalTheme::focused()
            } else {
                MedicalTheme::text_secondary()
            },
        ))
        .borders(Borders::ALL)
        .border_style(if focused {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        });

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(value.to_string(), MedicalTheme::text()),
        if focused {
            Span::styled("▌", MedicalTheme::focused())
        } else {
            Span::raw("")
        },
    ]))
    .block(block);

    f.render_widget(content, area);
}
