mod api;
mod app;
mod cli;
mod forms;
mod handlers;
mod logging;
mod types;
mod ui;
mod worker;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::{io, sync::mpsc, time::Duration};
use tracing::info;

use api::ApiClient;
use app::App;
use cli::Args;
use handlers::{handle_key, load_view};
use types::{ApiEvent, View};
use worker::Worker;

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = match args.log_file.clone() {
        Some(path) => Ok(path),
        None => logging::default_log_path(),
    };
    match log_path.and_then(|path| logging::init_logging(&args.log_level, &path).map(|()| path)) {
        Ok(path) => println!("Logging to {}", path.display()),
        Err(e) => eprintln!("Warning: logging disabled: {e:#}"),
    }

    // A malformed URL is fatal; a missing one surfaces on every request instead.
    let client = ApiClient::new(args.backend_url.as_deref()).context("Invalid configuration")?;
    if !client.is_configured() {
        eprintln!(
            "Warning: no backend URL configured (set RECIPEBOX_BACKEND_URL or --backend-url)"
        );
    }
    info!(backend = client.base_url(), configured = client.is_configured(), "starting");
    println!("Backend: {}", client.base_url());
    println!("Launching TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(args.theme, client.configured_url().to_string());
    let (tx, rx) = mpsc::channel::<ApiEvent>();
    let worker = Worker::new(client, tx);

    let res = run_app(&mut terminal, &mut app, &worker, &rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }
    info!("exiting");

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    worker: &Worker,
    rx: &mpsc::Receiver<ApiEvent>,
) -> Result<()> {
    worker.probe_session();
    load_view(app, worker, View::Recipes);

    loop {
        app.tick();

        while let Ok(event) = rx.try_recv() {
            if let Some(view) = app.apply(event) {
                load_view(app, worker, view);
            }
        }

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(app, key, worker) {
                    return Ok(());
                }
            }
        }
    }
}
