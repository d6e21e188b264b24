//! Projectarium TUI - terminal kanban board for the projectarium tracker
//!
//! A Ratatui-based TUI showing projects and their todos as three-column
//! boards, backed by the projectarium HTTP API.

mod api;
mod app;
mod config;
mod input;
mod message;
mod state;
mod ui;

use anyhow::Result;
use api::ApiClient;
use app::App;
use config::Settings;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use message::Message;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "projectarium_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    // Resolve settings before touching the terminal so failures print plainly
    let settings = Settings::load()?;
    let api = ApiClient::new(&settings.api_base_url, settings.timeout)?;
    tracing::info!(api = %api.base_url(), "Starting");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(Arc::new(api), settings.keymap, tx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// The alternate screen owns stdout, so logs go to a file in the data dir
fn log_writer() -> BoxMakeWriter {
    let file = ProjectDirs::from("dev", "projectarium", "projectarium-tui").and_then(|dirs| {
        let dir = dirs.data_dir();
        fs::create_dir_all(dir).ok()?;
        File::create(dir.join("projectarium-tui.log")).ok()
    });

    match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::sink),
    }
}

/// Feed one message through the reducer and start whatever it asks for
fn apply(app: &mut App, message: Message) {
    for intent in app.update(message) {
        app.dispatch(intent);
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &mut UnboundedReceiver<Message>,
) -> Result<()> {
    let size = terminal.size()?;
    apply(app, Message::Resize(size.width, size.height));
    for intent in app.start() {
        app.dispatch(intent);
    }

    loop {
        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle crossterm events
        if event::poll(Duration::from_millis(100))? {
            let message = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(Message::Key(key)),
                Event::Resize(width, height) => Some(Message::Resize(width, height)),
                _ => None,
            };
            if let Some(message) = message {
                apply(app, message);
            }
        }

        // Drain finished API calls
        while let Ok(message) = rx.try_recv() {
            apply(app, message);
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
