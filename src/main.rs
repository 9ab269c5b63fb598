mod app;
mod card;
mod catalog;
mod config;
mod logging;
mod search;
mod ui;

use app::{App, InputMode};
use catalog::{Catalog, CatalogClient};
use clap::Parser;
use config::CatalogConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Browse popular movies and search titles on The Movie Database
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// TMDb v3 API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the TMDb API
    #[arg(long, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Base URL that poster paths are appended to
    #[arg(long, default_value = config::DEFAULT_IMAGE_BASE_URL)]
    image_base_url: String,

    /// Milliseconds of typing inactivity before a search is sent
    #[arg(long, default_value_t = config::DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Directory for log files (defaults to the platform data directory)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_dir = cli
        .log_dir
        .clone()
        .or_else(logging::default_log_dir)
        .ok_or("Could not determine a log directory, pass --log-dir")?;
    let _log_guard = logging::init_tracing(&log_dir)?;

    let config = CatalogConfig::from_parts(cli.api_key, &cli.base_url, &cli.image_base_url);
    if config.api_key_missing() {
        warn!("no API key configured, requests will be rejected by the server");
    }
    info!(base_url = %config.base_url, debounce_ms = cli.debounce_ms, "starting movie browser");

    let client = CatalogClient::new(config.clone())?;
    let mut app = App::new(Arc::new(client), config, Duration::from_millis(cli.debounce_ms));
    app.start();

    // Init terminal
    let mut terminal = ratatui::init();

    let size = terminal.size()?;
    app.update_grid_columns(size.width);

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<C: Catalog>(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App<C>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.drain_events();
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so background results show up promptly
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Resize(width, _) => {
                    app.update_grid_columns(width);
                }
                _ => {}
            }
        }
    }
}

fn handle_key<C: Catalog>(app: &mut App<C>, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.input_mode {
        InputMode::Editing => handle_search_input(app, key),
        InputMode::Normal => handle_browse_key(app, key),
    }
}

fn handle_search_input<C: Catalog>(app: &mut App<C>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.pop_query_char();
        }
        KeyCode::Char(c) => {
            app.push_query_char(c);
        }
        _ => {}
    }
}

fn handle_browse_key<C: Catalog>(app: &mut App<C>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Right | KeyCode::Char('l') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_down(),
        KeyCode::Up | KeyCode::Char('k') => app.select_up(),
        KeyCode::Char('o') => {
            if let Some(card) = app.selected_card() {
                match std::process::Command::new("xdg-open").arg(&card.poster).spawn() {
                    Ok(_) => app.status_msg = format!("Opening: {}", card.poster),
                    Err(e) => {
                        warn!(error = %e, "could not launch xdg-open");
                        app.status_msg = format!("Poster: {} (no opener available)", card.poster);
                    }
                }
            }
        }
        KeyCode::Esc => {
            // Clear search
            app.clear_query();
        }
        _ => {}
    }
}
