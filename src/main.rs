//! Shigure TUI - passcode-gated view of the current activity
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - session state machine and activity cache
//! - Network Layer (Tokio) - async calls to the shigure backend

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use shigure_tui::app::{AppActor, AppState};
use shigure_tui::config::Config;
use shigure_tui::constants::{APP_NAME, APP_VERSION};
use shigure_tui::messages::ui_events::key_to_ui_event;
use shigure_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use shigure_tui::models::Route;
use shigure_tui::network::{ApiClient, NetworkActor};
use shigure_tui::session::{SessionManager, SessionStatus};
use shigure_tui::storage::FileTokenStore;
use shigure_tui::ui::{centered_box, centered_rect, render_activity, render_passcode, render_sidebar};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    // Initialize logging to file; the terminal belongs to the UI
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let log_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "shigure.log".into());
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(
        version = APP_VERSION,
        backend = %config.backend_host,
        token_file = %config.token_file.display(),
        "Starting"
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let client = ApiClient::new(config.backend_host.clone(), config.request_timeout());
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let session = SessionManager::new(Box::new(FileTokenStore::new(config.token_file.clone())));
    let state = AppState::new(session, config.backend_host.clone());
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) =
                    key_to_ui_event(key, current_state.route, current_state.show_help)
                {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    match state.route {
        Route::Login => draw_login(f, state, main_chunks[1]),
        Route::Home => draw_home(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let (label, color) = match state.session.status {
        SessionStatus::Authenticated => (" authenticated ", Color::Green),
        SessionStatus::Authenticating => (" authenticating ", Color::Yellow),
        SessionStatus::Unauthenticated => (" signed out ", Color::DarkGray),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Magenta).bold(),
        ),
        Span::raw(" "),
        Span::styled(state.backend_host.as_str(), Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(label, Style::default().fg(color)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_login(f: &mut Frame, state: &RenderState, area: Rect) {
    let field_area = centered_box(28, 3, area);
    let pending = state.session.status == SessionStatus::Authenticating;
    f.render_widget(
        render_passcode(&state.passcode, state.session.login_failed, pending),
        field_area,
    );

    let hint_area = Rect::new(
        field_area.x,
        (field_area.y + field_area.height).min(area.y + area.height.saturating_sub(1)),
        field_area.width,
        1,
    );
    let (hint, style) = if state.session.login_failed {
        ("rejected, edit to retry", Style::default().fg(Color::Red))
    } else if pending {
        ("checking...", Style::default().fg(Color::Yellow))
    } else {
        ("enter 6 digits", Style::default().fg(Color::DarkGray))
    };
    f.render_widget(
        Paragraph::new(hint).style(style).alignment(Alignment::Center),
        hint_area,
    );
}

fn draw_home(f: &mut Frame, state: &RenderState, area: Rect) {
    match state.session.status {
        SessionStatus::Authenticating => {
            let notice = Paragraph::new("Authenticating...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(notice, centered_box(28, 3, area));
        }
        SessionStatus::Unauthenticated => {
            let notice = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Not authenticated",
                    Style::default().fg(Color::White).bold(),
                )),
                Line::from(""),
                Line::from(Span::styled("l: login", Style::default().fg(Color::Green))),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            );
            f.render_widget(notice, centered_box(28, 5, area));
        }
        SessionStatus::Authenticated => draw_dashboard(f, state, area),
    }
}

fn draw_dashboard(f: &mut Frame, state: &RenderState, area: Rect) {
    let widget_area = if state.sidebar_open {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(0)])
            .split(area);
        f.render_widget(render_sidebar(), chunks[0]);
        chunks[1]
    } else {
        area
    };

    let widget_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(widget_area)[0];
    f.render_widget(render_activity(&state.activity), widget_area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = match (state.route, state.session.status) {
        (Route::Login, _) => " digits:passcode | Backspace:edit | Esc:back | Ctrl+C:quit ",
        (Route::Home, SessionStatus::Authenticated) => {
            " r:refresh | c:clear | b:sidebar | x:logout | ?:help | q:quit "
        }
        (Route::Home, _) => " l:login | ?:help | q:quit ",
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 SHIGURE - Keyboard Shortcuts

 LOGIN
   0-9                Passcode digit (submits at 6)
   Backspace          Delete digit
   Esc                Back

 HOME
   r                  Refresh activity
   c                  Clear activity
   b / Tab            Toggle sidebar
   x                  Logout
   l                  Login

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
