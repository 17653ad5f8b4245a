//! Guestbook TUI - terminal front-end for a guestbook / simple-board backend
//!
//! Built with Ratatui and crossterm.

mod app;
mod handlers;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use guestbook_core::{Config, HttpBoardApi, Request, Response, Schema};
use ratatui::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing_subscriber::EnvFilter;

use app::{App, AppState};

/// Guestbook TUI - read and write entries on a guestbook backend
#[derive(Parser, Debug)]
#[command(name = "guestbook-tui")]
#[command(about = "A terminal UI for a guestbook / simple-board backend")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config and environment)
    #[arg(short, long, value_name = "URL")]
    api_url: Option<String>,

    /// Backend layout: guestbook or board (overrides config and environment)
    #[arg(short, long)]
    schema: Option<Schema>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config)?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }
    if let Some(schema) = args.schema {
        config.schema = schema;
    }

    init_logging(config.log_file.as_deref())?;
    tracing::info!(
        "Starting Guestbook TUI against {} ({} schema)",
        config.api_url,
        config.schema
    );

    let api = Arc::new(HttpBoardApi::new(&config.api_url, config.schema)?);
    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let (tx, rx) = mpsc::unbounded_channel();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.schema, api.base_url().to_string());
    app.load();

    // Main loop
    let mut dispatcher = Dispatcher {
        runtime: &runtime,
        api,
        tx,
        rx,
    };
    let result = run_app(&mut terminal, &mut app, &mut dispatcher);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Write logs to `log_file` if configured, otherwise stderr.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("guestbook_tui=info".parse()?)
        .add_directive("guestbook_core=info".parse()?);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

/// Runs requests on the async runtime and hands their results back.
///
/// Requests run concurrently and are applied in the order they resolve, so a
/// slow earlier list fetch can overwrite a newer one. In-flight requests are
/// never cancelled.
struct Dispatcher<'a> {
    runtime: &'a Runtime,
    api: Arc<HttpBoardApi>,
    tx: UnboundedSender<Response>,
    rx: UnboundedReceiver<Response>,
}

impl Dispatcher<'_> {
    fn spawn(&self, request: Request) {
        tracing::debug!("Dispatching {:?}", request);
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        self.runtime.spawn(async move {
            let response = guestbook_core::execute(api.as_ref(), request).await;
            // The UI may have exited already
            let _ = tx.send(response);
        });
    }

    fn try_recv(&mut self) -> Option<Response> {
        self.rx.try_recv().ok()
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    dispatcher: &mut Dispatcher<'_>,
) -> Result<()> {
    loop {
        while let Some(response) = dispatcher.try_recv() {
            app.handle_response(response);
        }
        for request in app.take_requests() {
            dispatcher.spawn(request);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout so responses get drawn promptly
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handlers::handle_key(app, key) {
                    break;
                }
            }
        }

        // Check if we should quit
        if matches!(app.state, AppState::Quit) {
            break;
        }
    }

    Ok(())
}
