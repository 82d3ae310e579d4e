//! Main TUI application state machine.
//!
//! Handles:
//! - Session (login/logout) and screen navigation
//! - Input event handling
//! - Service integration
//! - Background prediction via worker thread

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::HttpPredictionClient;
use crate::application::{HistoryPage, HistoryService, PredictionService};
use crate::config::Settings;
use crate::domain::self_check::SelfCheck;
use crate::domain::{ModelSelector, Session};
use crate::ports::PredictionApi;
use crate::PulmocheckError;

use super::ui::{
    dashboard::render_dashboard,
    history::{render_history, HistoryState},
    intake::IntakeFormState,
    login::{render_login, LoginState},
    render_disclaimer,
    result::ResultPanel,
    self_check::render_self_check,
};
use super::worker::{
    spawn_lookup, LookupHandle, PredictionProgress, PredictionWorker, PredictionWorkerHandle,
};

/// Health flag and model list fetched after login.
type ServiceStatus = (bool, Vec<ModelSelector>);

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    History,
    SelfCheck,
}

/// Main application state
pub struct App<A = HttpPredictionClient>
where
    A: PredictionApi + 'static,
{
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Signed-in user; `None` while on the login screen
    session: Option<Session>,

    prediction_service: Arc<PredictionService<A>>,
    history_service: Arc<HistoryService<A>>,

    /// Model preselected in a fresh intake form
    default_model: ModelSelector,

    login_state: LoginState,
    intake_state: IntakeFormState,
    result_panel: ResultPanel,
    history_state: HistoryState,
    self_check: SelfCheck,

    /// Result of the last health probe
    service_online: Option<bool>,

    /// Pending prediction worker (if running)
    pending_worker: Option<PredictionWorkerHandle>,

    /// Health and model lookup started at login
    pending_status: Option<LookupHandle<ServiceStatus>>,
    pending_history: Option<LookupHandle<Result<HistoryPage, PulmocheckError>>>,
}

impl App<HttpPredictionClient> {
    /// Create a new application talking to the configured service.
    ///
    /// # Errors
    /// Returns error if the service URL is invalid.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Arc::new(HttpPredictionClient::new(settings.api_url.as_str())?);
        let prediction_service = Arc::new(PredictionService::new(client.clone()));
        let history_service = HistoryService::new(client, settings.history_limit);

        Ok(Self::with_dependencies(
            prediction_service,
            history_service,
            settings.default_model,
        ))
    }
}

impl<A> App<A>
where
    A: PredictionApi + 'static,
{
    /// Create application with injected services.
    pub fn with_dependencies(
        prediction_service: Arc<PredictionService<A>>,
        history_service: HistoryService<A>,
        default_model: ModelSelector,
    ) -> Self {
        Self {
            screen: Screen::Login,
            should_quit: false,
            session: None,
            prediction_service,
            history_service: Arc::new(history_service),
            default_model,
            login_state: LoginState::default(),
            intake_state: IntakeFormState::new(default_model),
            result_panel: ResultPanel::Idle,
            history_state: HistoryState::default(),
            self_check: SelfCheck::new(),
            service_online: None,
            pending_worker: None,
            pending_status: None,
            pending_history: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Poll pending workers for progress updates
            self.poll_worker();
            self.poll_lookups();

            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match (self.screen, &self.session) {
                    (Screen::Dashboard, Some(session)) => render_dashboard(
                        f,
                        content_area,
                        session,
                        self.service_online,
                        &self.intake_state,
                        &self.result_panel,
                        self.pending_worker.is_some(),
                    ),
                    (Screen::History, Some(_)) => {
                        render_history(f, content_area, &self.history_state)
                    }
                    (Screen::SelfCheck, Some(_)) => {
                        render_self_check(f, content_area, &self.self_check)
                    }
                    _ => render_login(f, content_area, &self.login_state),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background worker for progress updates.
    fn poll_worker(&mut self) {
        loop {
            let progress = match self
                .pending_worker
                .as_ref()
                .and_then(PredictionWorkerHandle::try_recv)
            {
                Some(p) => p,
                None => break,
            };

            match progress {
                PredictionProgress::Submitting => {
                    self.result_panel = ResultPanel::Submitting;
                }
                PredictionProgress::Complete(result) => {
                    self.result_panel = ResultPanel::Complete(result);
                    self.pending_worker = None;
                }
                PredictionProgress::Failed(message) => {
                    self.result_panel = ResultPanel::Failed(message);
                    self.pending_worker = None;
                }
            }
        }
    }

    /// Apply finished health, model and history lookups.
    fn poll_lookups(&mut self) {
        if let Some((online, models)) = self.pending_status.as_ref().and_then(LookupHandle::try_recv)
        {
            self.service_online = Some(online);
            self.intake_state.set_models(models);
            self.pending_status = None;
        }

        if let Some(loaded) = self.pending_history.as_ref().and_then(LookupHandle::try_recv) {
            match loaded {
                Ok(page) => {
                    self.history_state.page = Some(page);
                    self.history_state.error = None;
                    self.history_state.selected = 0;
                }
                Err(e) => {
                    self.history_state.page = None;
                    self.history_state.error = Some(e.to_string());
                }
            }
            self.pending_history = None;
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.session.is_none() {
            self.handle_login_key(key);
            return;
        }

        match key {
            KeyCode::F(1) => {
                self.screen = Screen::Dashboard;
                return;
            }
            KeyCode::F(2) => {
                self.open_history();
                return;
            }
            KeyCode::F(3) => {
                self.screen = Screen::SelfCheck;
                return;
            }
            KeyCode::F(10) => {
                self.logout();
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::History => self.handle_history_key(key),
            Screen::SelfCheck => self.handle_self_check_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login_state.toggle_focus();
            }
            KeyCode::Char(c) => self.login_state.input_char(c),
            KeyCode::Backspace => self.login_state.delete_char(),
            KeyCode::Enter => self.login(),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::BackTab => self.intake_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.intake_state.next_field(),
            KeyCode::Char(' ') | KeyCode::Right => self.intake_state.toggle(),
            KeyCode::Left => self.intake_state.toggle_back(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.intake_state.reset(),
            KeyCode::Char(c) => self.intake_state.input_char(c),
            KeyCode::Backspace => self.intake_state.delete_char(),
            KeyCode::Delete => self.intake_state.clear_field(),
            KeyCode::Enter => self.submit_intake_form(),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        if self.history_state.editing_search {
            match key {
                KeyCode::Enter | KeyCode::Esc => self.history_state.editing_search = false,
                KeyCode::Char(c) => self.history_state.input_char(c),
                KeyCode::Backspace => self.history_state.delete_char(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Esc => self.screen = Screen::Dashboard,
            KeyCode::Char('/') => self.history_state.editing_search = true,
            KeyCode::Char('m') | KeyCode::Char('M') => self.history_state.cycle_model(),
            KeyCode::Char('k') | KeyCode::Char('K') => self.history_state.cycle_risk(),
            KeyCode::Char('c') | KeyCode::Char('C') => self.history_state.clear_filters(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.load_history(),
            KeyCode::Down => self.history_state.select_next(),
            KeyCode::Up => self.history_state.select_prev(),
            _ => {}
        }
    }

    fn handle_self_check_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Dashboard,
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    self.self_check.answer(digit as usize - 1);
                }
            }
            KeyCode::Backspace | KeyCode::Left => self.self_check.back(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.self_check.reset(),
            _ => {}
        }
    }

    fn login(&mut self) {
        let password = self.login_state.take_password();
        match Session::login(&self.login_state.email, password) {
            Ok(session) => {
                self.session = Some(session);
                self.login_state = LoginState::default();
                self.screen = Screen::Dashboard;
                self.refresh_service_status();
            }
            Err(PulmocheckError::Validation(errors)) => {
                self.login_state.error = Some(errors.join(", "));
            }
            Err(e) => {
                self.login_state.error = Some(e.to_string());
            }
        }
    }

    /// Tear down everything tied to the session.
    fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            session.logout();
        }
        // Running threads finish on their own; their updates are dropped
        // with the handles and the service ignores the stale result.
        self.pending_worker = None;
        self.pending_status = None;
        self.pending_history = None;
        self.prediction_service.clear();
        self.intake_state = IntakeFormState::new(self.default_model);
        self.result_panel = ResultPanel::Idle;
        self.history_state = HistoryState::default();
        self.self_check.reset();
        self.service_online = None;
        self.screen = Screen::Login;
    }

    fn refresh_service_status(&mut self) {
        let service = Arc::clone(&self.prediction_service);
        self.pending_status = Some(spawn_lookup(move || {
            (service.service_healthy(), service.available_models())
        }));
    }

    fn submit_intake_form(&mut self) {
        // One request at a time
        if self.pending_worker.is_some() {
            return;
        }

        if !self.intake_state.validate() {
            return;
        }

        self.result_panel = ResultPanel::Submitting;
        let worker = PredictionWorker::spawn(
            self.prediction_service.clone(),
            self.intake_state.profile.clone(),
            self.intake_state.model,
        );
        self.pending_worker = Some(worker);
    }

    fn open_history(&mut self) {
        self.screen = Screen::History;
        self.load_history();
    }

    fn load_history(&mut self) {
        if self.pending_history.is_some() {
            return;
        }
        let history = Arc::clone(&self.history_service);
        self.pending_history = Some(spawn_lookup(move || history.load()));
    }
}
