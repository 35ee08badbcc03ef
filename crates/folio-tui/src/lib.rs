use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use folio_auth::{HostedIdentity, IdentityProvider, SessionResolver};
use folio_content::{ContentClient, ContentSource, FormRelay};
use folio_core::{
    FolioConfig, LanguageState, Navigator, PresentationController, PresentationDecision,
    RouteTable, ViewLoader, ViewSource,
};
use folio_schema::{SessionState, ViewId};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

pub mod form;
pub mod skeleton;
pub mod strings;
pub mod views;

use form::ContactForm;
use strings::{text, Key};
use views::ViewContext;

const RELAY_CHANNEL_CAPACITY: usize = 8;

struct App {
    controller: PresentationController,
    loader: ViewLoader,
    load_events: mpsc::Receiver<ViewId>,
    resolver: Arc<SessionResolver>,
    session_events: mpsc::Receiver<SessionState>,
    source: Arc<ContentSource>,
    relay: FormRelay,
    relay_tx: mpsc::Sender<Result<(), String>>,
    relay_events: mpsc::Receiver<Result<(), String>>,
    nav: Navigator,
    lang: LanguageState,
    session: SessionState,
    form: ContactForm,
    project_cursor: usize,
    should_quit: bool,
}

impl App {
    fn new(
        provider: Arc<dyn IdentityProvider>,
        source: Arc<ContentSource>,
        relay: FormRelay,
    ) -> Self {
        let controller = PresentationController::new(RouteTable::portfolio());
        let (loader, load_events) = ViewLoader::new(source.clone() as Arc<dyn ViewSource>);
        let resolver = Arc::new(SessionResolver::activate(provider));
        let session_events = resolver.subscribe();
        let (relay_tx, relay_events) = mpsc::channel(RELAY_CHANNEL_CAPACITY);
        let landing = controller.table().landing().path.to_string();

        Self {
            controller,
            loader,
            load_events,
            resolver,
            session_events,
            source,
            relay,
            relay_tx,
            relay_events,
            nav: Navigator::new(landing),
            lang: LanguageState::default(),
            session: SessionState::Unresolved,
            form: ContactForm::default(),
            project_cursor: 0,
            should_quit: false,
        }
    }

    /// Pull every pending notification into app state before drawing; this
    /// is the reactive recomposition edge.
    fn drain(&mut self) {
        while let Ok(state) = self.session_events.try_recv() {
            if let SessionState::Resolved(session) = &state {
                self.source
                    .set_user(session.identity.as_ref().map(|i| i.id));
            }
            self.session = state;
        }
        while let Ok(view) = self.load_events.try_recv() {
            if view == ViewId::Projects {
                self.project_cursor = 0;
            }
        }
        while let Ok(outcome) = self.relay_events.try_recv() {
            match outcome {
                Ok(()) => self.form.submit_succeeded(),
                Err(e) => {
                    tracing::warn!("contact form delivery failed: {e}");
                    self.form.submit_failed();
                }
            }
        }
    }

    fn decision(&self) -> PresentationDecision {
        self.controller
            .present(self.nav.current(), &self.session, &self.loader)
    }

    fn current_view(&self) -> ViewId {
        self.controller
            .table()
            .resolve_or_fallback(self.nav.current())
            .view
    }

    /// Navigation events advance the loader; this is also what retries a
    /// failed acquisition (re-navigation).
    fn touch_route(&self) {
        if self.session.is_resolved() {
            let route = *self
                .controller
                .table()
                .resolve_or_fallback(self.nav.current());
            self.loader.load(route);
        }
    }

    fn go(&mut self, path: &str) {
        self.nav.navigate(path);
        self.form.editing = false;
        self.touch_route();
    }

    fn projects_len(&self) -> usize {
        match self.loader.state(ViewId::Projects) {
            folio_schema::ViewLoadState::Ready(bundle) => match bundle.as_ref() {
                folio_schema::ViewBundle::Projects(projects) => projects.len(),
                _ => 0,
            },
            _ => 0,
        }
    }

    fn submit_form(&mut self) {
        let Some(message) = self.form.begin_submit() else {
            return;
        };
        let relay = self.relay.clone();
        let tx = self.relay_tx.clone();
        tokio::spawn(async move {
            let outcome = relay.submit(&message).await.map_err(|e| e.to_string());
            let _ = tx.try_send(outcome);
        });
    }

    fn sign_out(&self) {
        let resolver = self.resolver.clone();
        tokio::spawn(async move {
            // Failure is logged by the resolver; state stays as-is.
            let _ = resolver.sign_out().await;
        });
    }

    fn on_key(&mut self, key: KeyCode) {
        if self.current_view() == ViewId::Contact && self.form.editing {
            match key {
                KeyCode::Esc => self.form.editing = false,
                KeyCode::Tab | KeyCode::Down => self.form.focus = self.form.focus.next(),
                KeyCode::BackTab | KeyCode::Up => self.form.focus = self.form.focus.prev(),
                KeyCode::Backspace => self.form.backspace(),
                KeyCode::Enter => self.submit_form(),
                KeyCode::Char(c) => self.form.type_char(c),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.go("/"),
            KeyCode::Char('2') => self.go("/about"),
            KeyCode::Char('3') => self.go("/skills"),
            KeyCode::Char('4') => self.go("/projects"),
            KeyCode::Char('5') => self.go("/contact"),
            KeyCode::Left => {
                if self.nav.back().is_some() {
                    self.touch_route();
                }
            }
            KeyCode::Right => {
                if self.nav.forward().is_some() {
                    self.touch_route();
                }
            }
            KeyCode::Char('l') => {
                self.lang.toggle();
            }
            KeyCode::Char('o') => {
                if let SessionState::Resolved(session) = &self.session {
                    if !session.is_anonymous() {
                        self.sign_out();
                    }
                }
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if self.current_view() == ViewId::Contact {
                    self.form.editing = true;
                }
            }
            KeyCode::Up => {
                if self.current_view() == ViewId::Projects {
                    self.project_cursor = self.project_cursor.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if self.current_view() == ViewId::Projects {
                    let max = self.projects_len().saturating_sub(1);
                    self.project_cursor = (self.project_cursor + 1).min(max);
                }
            }
            _ => {}
        }
    }
}

pub async fn run_tui(config: FolioConfig) -> Result<()> {
    let provider: Arc<dyn IdentityProvider> = Arc::new(HostedIdentity::new(
        &config.content.base_url,
        &config.content.anon_key,
        config.content.access_token.clone(),
    ));
    let client = Arc::new(ContentClient::new(
        &config.content.base_url,
        &config.content.anon_key,
        config.content.access_token.clone(),
    ));
    let source = Arc::new(ContentSource::new(client, config.profile.clone()));
    let relay = FormRelay::new(&config.relay.endpoint);
    let app = App::new(provider, source, relay);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        app.drain();
        app.form.expire_status(Instant::now());

        terminal.draw(|frame| ui(frame, &app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key.code);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn ui(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, rows[0], app);
    render_body(frame, rows[1], app);
    render_status(frame, rows[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let lang = app.lang.current();
    let active = app.current_view();
    let tabs = [
        (ViewId::Home, "1", Key::NavHome),
        (ViewId::About, "2", Key::NavAbout),
        (ViewId::Skills, "3", Key::NavSkills),
        (ViewId::Projects, "4", Key::NavProjects),
        (ViewId::Contact, "5", Key::NavContact),
    ];

    let mut spans = Vec::new();
    for (view, digit, label) in tabs {
        let style = if view == active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {digit}:{} ", text(lang, label)), style));
    }

    spans.push(Span::styled(
        format!("| {} ", lang.as_str()),
        Style::default().fg(Color::Yellow),
    ));

    if let SessionState::Resolved(session) = &app.session {
        if let Some(identity) = &session.identity {
            let email = identity.email.as_deref().unwrap_or("signed in");
            spans.push(Span::styled(
                format!("| {} {email} ", text(lang, Key::WelcomeUser)),
                Style::default().fg(Color::Green),
            ));
            spans.push(Span::styled(
                format!("[o] {}", text(lang, Key::Logout)),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    match app.decision() {
        PresentationDecision::ShowPlaceholder(placeholder) => {
            skeleton::render(frame, area, placeholder, app.lang.current());
        }
        PresentationDecision::ShowFailure { error, .. } => {
            let lang = app.lang.current();
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    text(lang, Key::LoadFailed),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(error, Style::default().fg(Color::Gray))),
                Line::from(""),
                Line::from(text(lang, Key::RetryHint)),
            ];
            frame.render_widget(
                Paragraph::new(lines).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                ),
                area,
            );
        }
        PresentationDecision::ShowView {
            bundle,
            session,
            shows_profile_panel,
            ..
        } => {
            let ctx = ViewContext {
                lang: app.lang.current(),
                session: &session,
                shows_profile_panel,
                project_cursor: app.project_cursor,
                form: &app.form,
            };
            views::render(frame, area, &bundle, &ctx);
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            " [1-5]",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" pages ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "[←→]",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" history ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "[l]",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" language ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "[q]",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" quit ", Style::default().fg(Color::DarkGray)),
    ];

    if app.current_view() == ViewId::Contact {
        let hint = if app.form.editing {
            "[Esc] stop editing  [Tab] field  [Enter] send "
        } else {
            "[e] edit form "
        };
        spans.push(Span::styled(hint, Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use folio_auth::AnonymousIdentity;
    use folio_core::ProfileConfig;
    use folio_schema::PlaceholderId;
    use tokio::time::{timeout, Duration};

    use super::*;

    fn test_app() -> App {
        let provider: Arc<dyn IdentityProvider> = Arc::new(AnonymousIdentity::new());
        // Store endpoint is never reached in these tests; home and contact
        // bundles come from the profile alone.
        let client = Arc::new(ContentClient::new("http://127.0.0.1:9", "anon", None));
        let profile = ProfileConfig {
            name: "Walid Sabbar".into(),
            tagline: "Web Developer".into(),
            email: "owner@example.com".into(),
            location: None,
            response_time: None,
            social: vec![],
        };
        let source = Arc::new(ContentSource::new(client, profile));
        let relay = FormRelay::new("http://127.0.0.1:9/f/test");
        App::new(provider, source, relay)
    }

    async fn resolve_session(app: &mut App) {
        let state = timeout(Duration::from_secs(1), app.session_events.recv())
            .await
            .expect("session resolution timed out")
            .expect("resolver gone");
        app.session = state;
    }

    #[tokio::test]
    async fn number_keys_navigate_and_history_works() {
        let mut app = test_app();
        app.on_key(KeyCode::Char('2'));
        assert_eq!(app.nav.current(), "/about");
        app.on_key(KeyCode::Char('4'));
        assert_eq!(app.nav.current(), "/projects");
        app.on_key(KeyCode::Left);
        assert_eq!(app.nav.current(), "/about");
        app.on_key(KeyCode::Right);
        assert_eq!(app.nav.current(), "/projects");
    }

    #[tokio::test]
    async fn language_key_toggles_strings() {
        let mut app = test_app();
        assert_eq!(app.lang.current(), folio_schema::Language::En);
        app.on_key(KeyCode::Char('l'));
        assert_eq!(app.lang.current(), folio_schema::Language::Fr);
    }

    #[tokio::test]
    async fn placeholder_matches_route_before_session_resolves() {
        let mut app = test_app();
        app.on_key(KeyCode::Char('4'));
        assert_eq!(
            app.decision(),
            PresentationDecision::ShowPlaceholder(PlaceholderId::Projects)
        );
    }

    #[tokio::test]
    async fn form_typing_captures_keys_and_q_does_not_quit() {
        let mut app = test_app();
        resolve_session(&mut app).await;
        app.on_key(KeyCode::Char('5'));
        app.on_key(KeyCode::Char('e'));
        assert!(app.form.editing);

        app.on_key(KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.form.name, "q");

        app.on_key(KeyCode::Tab);
        app.on_key(KeyCode::Char('a'));
        assert_eq!(app.form.email, "a");

        app.on_key(KeyCode::Esc);
        assert!(!app.form.editing);
        app.on_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn home_view_renders_after_session_and_acquisition() {
        let mut app = test_app();
        resolve_session(&mut app).await;

        // First decision after resolution starts the acquisition.
        assert_eq!(
            app.decision(),
            PresentationDecision::ShowPlaceholder(PlaceholderId::Home)
        );
        let view = timeout(Duration::from_secs(1), app.load_events.recv())
            .await
            .expect("acquisition timed out")
            .expect("loader gone");
        assert_eq!(view, ViewId::Home);

        match app.decision() {
            PresentationDecision::ShowView { view, session, .. } => {
                assert_eq!(view, ViewId::Home);
                assert!(session.is_anonymous());
            }
            other => panic!("expected ShowView, got {other:?}"),
        }
    }
}
