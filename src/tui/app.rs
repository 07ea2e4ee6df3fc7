//! Main TUI application state and logic

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::sync::Arc;
use tracing::{info, warn};

use super::screens::{DashboardScreen, HelpScreen, ResponsesScreen};
use super::ui::Styles;
use crate::api::FormsApi;
use crate::config::Config;
use crate::models::{CurrentUser, Form};
use crate::routes;

/// Application screens
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Dashboard,
    Responses,
    Help,
}

/// Startup progression: identity first, then the form listing, then the
/// interactive dashboard. There are no other states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadState {
    Idle,
    ResolvingIdentity,
    LoadingForms,
    Ready,
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Previous screen for navigation
    pub previous_screen: Option<Screen>,
    /// Application configuration
    pub config: Config,
    api: Arc<dyn FormsApi>,

    /// The signed-in user, once identity resolution succeeds
    pub user: Option<CurrentUser>,
    pub load_state: LoadState,

    // Screen states
    pub dashboard: DashboardScreen,
    pub responses: ResponsesScreen,
    pub help: HelpScreen,

    /// Guard flag: at most one form-creation request in flight
    pub is_creating: bool,

    // Global application state
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config, api: Arc<dyn FormsApi>) -> Self {
        Self {
            current_screen: Screen::Dashboard,
            previous_screen: None,
            config,
            api,

            user: None,
            load_state: LoadState::Idle,

            dashboard: DashboardScreen::new(),
            responses: ResponsesScreen::new(),
            help: HelpScreen::new(),

            is_creating: false,

            should_quit: false,
            status_message: None,
            error_message: None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        // Startup sequence: identity, then the form listing, drawing the
        // wait states in between.
        self.load_state = LoadState::ResolvingIdentity;
        terminal.draw(|f| self.draw(f))?;
        self.resolve_identity().await?;
        if self.should_quit {
            return Ok(());
        }

        self.load_state = LoadState::LoadingForms;
        terminal.draw(|f| self.draw(f))?;
        self.load_forms().await;
        self.load_state = LoadState::Ready;

        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Ok(event) = crossterm::event::read() {
                if let crossterm::event::Event::Key(key) = event {
                    self.handle_key_event(key).await?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Ask the backend who our session token belongs to. A signed-out
    /// answer ends the session; only transport-level failures are errors.
    pub async fn resolve_identity(&mut self) -> Result<()> {
        let result = self.api.current_user().await;
        match result {
            Ok(Some(user)) => {
                info!("Signed in as {}", user.id);
                self.user = Some(user);
                Ok(())
            }
            Ok(None) => {
                info!("No signed-in user; leaving the dashboard");
                self.should_quit = true;
                Ok(())
            }
            Err(e) => Err(e).context("failed to resolve the signed-in user"),
        }
    }

    /// Fetch the form listing. On failure the catalog stays empty and the
    /// user sees a transient error; the loading flag clears either way.
    pub async fn load_forms(&mut self) {
        self.dashboard.is_loading = true;

        let result = self.api.list_forms().await;
        match result {
            Ok(forms) => {
                info!("Loaded {} form(s)", forms.len());
                self.dashboard.set_forms(forms);
            }
            Err(e) => {
                warn!("Failed to load forms: {}", e);
                self.dashboard.set_forms(Vec::new());
                self.set_error("Failed to load forms. Please try again.".to_string());
            }
        }

        self.dashboard.is_loading = false;
    }

    /// POST a creation request for the chosen template. Guarded so only
    /// one request can be outstanding; the guard clears and the modal
    /// closes after the request settles, on success and failure alike.
    pub async fn handle_create_form(&mut self, template: &str) -> Result<()> {
        if self.is_creating {
            return Ok(());
        }
        self.is_creating = true;

        let result = self.api.create_form(template).await;
        match result {
            Ok(form) => {
                let path = routes::form_editor(&form.id);
                info!("Created form {} from template '{}'", form.id, template);
                self.set_status(format!(
                    "Form created - continue in the editor: {}",
                    routes::absolute(&self.config.api_base_url, &path)
                ));
            }
            Err(e) => {
                warn!("Form creation failed: {}", e);
                self.set_error("Failed to create form. Please try again.".to_string());
            }
        }

        self.is_creating = false;
        self.dashboard.picker.close();
        Ok(())
    }

    /// Fetch one form's responses and switch to the table screen. On
    /// failure the dashboard stays put with an error notification.
    pub async fn open_responses(&mut self, form: Form) -> Result<()> {
        self.set_status(format!("Loading responses for {}...", form.title));

        let result = self.api.list_responses(&form.id).await;
        match result {
            Ok(records) => {
                info!("Loaded {} response(s) for form {}", records.len(), form.id);
                let count = records.len();
                let title = form.title.clone();
                self.responses.set_data(form, records);
                self.navigate_to_screen(Screen::Responses);
                self.set_status(format!("{} response(s) for {}", count, title));
            }
            Err(e) => {
                warn!("Failed to load responses: {}", e);
                self.set_error("Failed to load responses. Please try again.".to_string());
            }
        }
        Ok(())
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // The template modal captures all input while open.
        if self.current_screen == Screen::Dashboard && self.dashboard.picker.is_open {
            return self.handle_picker_event(key).await;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('?') => {
                if self.current_screen == Screen::Help {
                    self.navigate_back();
                } else {
                    self.navigate_to_screen(Screen::Help);
                }
                return Ok(());
            }
            _ => {}
        }

        match self.current_screen {
            Screen::Dashboard => self.handle_dashboard_event(key).await,
            Screen::Responses => self.handle_responses_event(key).await,
            Screen::Help => self.handle_help_event(key).await,
        }
    }

    async fn handle_picker_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.is_creating {
            // A creation request is outstanding; the modal stays put
            // until it settles.
            return Ok(());
        }

        match key.code {
            KeyCode::Up => self.dashboard.picker.navigate_up(),
            KeyCode::Down => self.dashboard.picker.navigate_down(),
            KeyCode::Enter => {
                if let Some(template) = self.dashboard.picker.selected() {
                    let name = template.name;
                    self.handle_create_form(name).await?;
                }
            }
            KeyCode::Esc => self.dashboard.picker.close(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_dashboard_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => self.dashboard.navigate_up(),
            KeyCode::Down => self.dashboard.navigate_down(),
            KeyCode::Enter | KeyCode::Char('r') => {
                if let Some(form) = self.dashboard.selected_form().map(|e| e.form.clone()) {
                    self.open_responses(form).await?;
                } else {
                    self.set_error("No form selected".to_string());
                }
            }
            KeyCode::Char('n') => {
                self.dashboard.picker.open();
            }
            KeyCode::Char('R') => {
                self.load_forms().await;
            }
            KeyCode::Char('e') => {
                if let Some(form) = self.dashboard.selected_form().map(|e| e.form.clone()) {
                    let url = routes::absolute(
                        &self.config.api_base_url,
                        &routes::form_editor(&form.id),
                    );
                    self.set_status(format!("Edit in the browser: {}", url));
                }
            }
            KeyCode::Char('v') => {
                if let Some(form) = self.dashboard.selected_form().map(|e| e.form.clone()) {
                    let url = routes::absolute(
                        &self.config.api_base_url,
                        &routes::public_form(&form),
                    );
                    self.set_status(format!("Public page: {}", url));
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_responses_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => self.responses.navigate_up(),
            KeyCode::Down => self.responses.navigate_down(),
            KeyCode::Char('w') => {
                if let Some(form_id) = self.responses.table.as_ref().map(|t| t.form.id.clone()) {
                    let url = routes::absolute(
                        &self.config.api_base_url,
                        &routes::form_responses(&form_id),
                    );
                    self.set_status(format!("View in the browser: {}", url));
                }
            }
            KeyCode::Esc => {
                self.navigate_to_screen(Screen::Dashboard);
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_help_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => self.help.previous_section(),
            KeyCode::Down => self.help.next_section(),
            KeyCode::Esc => self.navigate_back(),
            _ => {}
        }
        Ok(())
    }

    /// Navigate to a specific screen
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        self.previous_screen = Some(self.current_screen.clone());
        self.current_screen = screen;
        self.clear_messages();
    }

    fn navigate_back(&mut self) {
        let target = self.previous_screen.take().unwrap_or(Screen::Dashboard);
        self.current_screen = target;
        self.clear_messages();
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.area();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        if self.load_state == LoadState::ResolvingIdentity {
            self.draw_wait_state(f, chunks[0], "Signing in...");
        } else {
            let user_name = self
                .user
                .as_ref()
                .and_then(|u| u.name.as_deref())
                .map(str::to_string);
            match self.current_screen {
                Screen::Dashboard => self.dashboard.draw(f, chunks[0], user_name.as_deref()),
                Screen::Responses => self.responses.draw(f, chunks[0]),
                Screen::Help => self.help.draw(f, chunks[0]),
            }
        }

        self.draw_status_bar(f, chunks[1]);

        if self.current_screen == Screen::Dashboard && self.dashboard.picker.is_open {
            let busy = self.is_creating;
            self.dashboard.picker.render(f, chunks[0], busy);
        }
    }

    fn draw_wait_state(&self, f: &mut Frame, area: Rect, message: &str) {
        let widget = Paragraph::new(message.to_string())
            .style(Styles::info())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(widget, area);
    }

    /// Draw status bar with current screen info and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(ref msg) = self.status_message {
            format!("Status: {}", msg)
        } else if let Some(ref err) = self.error_message {
            format!("Error: {}", err)
        } else {
            format!(
                "formdash - {} | ESC: Back | q: Quit | ?: Help",
                match self.current_screen {
                    Screen::Dashboard => "My Forms",
                    Screen::Responses => "Responses",
                    Screen::Help => "Help",
                }
            )
        };

        let style = if self.error_message.is_some() {
            Styles::error()
        } else if self.status_message.is_some() {
            Styles::success()
        } else {
            Style::default()
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockFormsApi};
    use crate::config::HttpConfig;
    use crate::models::{FormResponse, FormWithStats};
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn test_config() -> Config {
        Config {
            api_base_url: "https://forms.example.com".to_string(),
            api_token: Some("token".to_string()),
            http: HttpConfig::default(),
        }
    }

    fn test_app(mock: MockFormsApi) -> App {
        App::new(test_config(), Arc::new(mock))
    }

    fn test_form(id: &str) -> Form {
        Form {
            id: id.to_string(),
            title: format!("Form {}", id),
            created_at: None,
            custom_slug: None,
            elements: Vec::new(),
        }
    }

    fn listed(id: &str) -> FormWithStats {
        FormWithStats {
            form: test_form(id),
            count: None,
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_identity_ends_session() {
        let mut mock = MockFormsApi::new();
        mock.expect_current_user().times(1).returning(|| Ok(None));
        // No list_forms expectation: the listing must not be fetched.

        let mut app = test_app(mock);
        app.resolve_identity().await.unwrap();

        assert!(app.should_quit);
        assert!(!app.is_signed_in());
    }

    #[tokio::test]
    async fn test_identity_resolves_then_forms_load() {
        let mut mock = MockFormsApi::new();
        mock.expect_current_user().times(1).returning(|| {
            Ok(Some(CurrentUser {
                id: "u1".to_string(),
                name: Some("Ana".to_string()),
            }))
        });
        mock.expect_list_forms()
            .times(1)
            .returning(|| Ok(vec![listed("f1"), listed("f2")]));

        let mut app = test_app(mock);
        app.resolve_identity().await.unwrap();
        assert!(app.is_signed_in());
        assert!(!app.should_quit);

        app.load_forms().await;
        assert_eq!(app.dashboard.forms.len(), 2);
        assert!(!app.dashboard.is_loading);
        assert!(app.error_message.is_none());
    }

    #[tokio::test]
    async fn test_listing_failure_leaves_list_empty_with_error() {
        let mut mock = MockFormsApi::new();
        mock.expect_list_forms().times(1).returning(|| {
            Err(ApiError::Status {
                path: "/api/forms".to_string(),
                status: 500,
            })
        });

        let mut app = test_app(mock);
        app.load_forms().await;

        assert!(app.dashboard.forms.is_empty());
        assert!(app.error_message.is_some());
        assert!(!app.dashboard.is_loading);
    }

    #[tokio::test]
    async fn test_create_success_reports_editor_route_and_closes_modal() {
        let mut mock = MockFormsApi::new();
        mock.expect_create_form()
            .with(eq("Custom"))
            .times(1)
            .returning(|_| Ok(test_form("f9")));

        let mut app = test_app(mock);
        app.dashboard.picker.open();
        app.handle_create_form("Custom").await.unwrap();

        let status = app.status_message.expect("status after creation");
        assert!(status.contains("/dashboard/forms/f9"));
        assert!(!app.dashboard.picker.is_open);
        assert!(!app.is_creating);
    }

    #[tokio::test]
    async fn test_create_failure_closes_modal_and_reports_error() {
        let mut mock = MockFormsApi::new();
        mock.expect_create_form().times(1).returning(|_| {
            Err(ApiError::Status {
                path: "/api/forms".to_string(),
                status: 500,
            })
        });

        let mut app = test_app(mock);
        app.dashboard.picker.open();
        app.handle_create_form("Custom").await.unwrap();

        assert!(app.error_message.is_some());
        assert!(!app.dashboard.picker.is_open);
        assert!(!app.is_creating);
    }

    #[tokio::test]
    async fn test_create_is_ignored_while_request_in_flight() {
        let mut mock = MockFormsApi::new();
        mock.expect_create_form().times(0);

        let mut app = test_app(mock);
        app.dashboard.picker.open();
        app.is_creating = true;
        app.handle_create_form("Custom").await.unwrap();

        // The guard swallowed the second trigger: no POST was issued.
        assert!(app.is_creating);
        assert!(app.dashboard.picker.is_open);
    }

    #[tokio::test]
    async fn test_open_responses_navigates_with_snapshot() {
        let mut mock = MockFormsApi::new();
        mock.expect_list_responses()
            .with(eq("f1"))
            .times(1)
            .returning(|_| {
                Ok(vec![FormResponse {
                    id: "r1".to_string(),
                    submitted_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
                    answers: HashMap::new(),
                }])
            });

        let mut app = test_app(mock);
        app.open_responses(test_form("f1")).await.unwrap();

        assert_eq!(app.current_screen, Screen::Responses);
        let table = app.responses.table.as_ref().unwrap();
        assert_eq!(table.responses.len(), 1);
    }

    #[tokio::test]
    async fn test_open_responses_failure_stays_on_dashboard() {
        let mut mock = MockFormsApi::new();
        mock.expect_list_responses().times(1).returning(|_| {
            Err(ApiError::Status {
                path: "/api/forms/f1/responses".to_string(),
                status: 502,
            })
        });

        let mut app = test_app(mock);
        app.open_responses(test_form("f1")).await.unwrap();

        assert_eq!(app.current_screen, Screen::Dashboard);
        assert!(app.error_message.is_some());
    }

    #[tokio::test]
    async fn test_n_key_opens_template_picker() {
        let mut app = test_app(MockFormsApi::new());
        app.handle_key_event(KeyEvent::from(KeyCode::Char('n')))
            .await
            .unwrap();
        assert!(app.dashboard.picker.is_open);
    }

    #[tokio::test]
    async fn test_escape_leaves_responses_screen() {
        let mut app = test_app(MockFormsApi::new());
        app.navigate_to_screen(Screen::Responses);
        app.handle_key_event(KeyEvent::from(KeyCode::Esc))
            .await
            .unwrap();
        assert_eq!(app.current_screen, Screen::Dashboard);
    }
}
