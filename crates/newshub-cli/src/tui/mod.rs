//! NewsHub TUI
//!
//! Terminal interface for reading news and keeping an offline library.
//!
//! ## Layout
//!
//! - Title bar: current feed and the bookmark badge
//! - Left: Feed (headlines, top stories, or search results)
//! - Right: Offline library above a detail preview
//!
//! The badge, the per-article markers and the library are bookmark
//! observers: they refresh whenever the repository publishes a change,
//! including changes made by another process to the bookmark file.
//!
//! ## Keys
//!
//! - j/k or ↑/↓: Move selection
//! - Tab or h/l: Switch between feed and library
//! - b: Save / unsave the selected article
//! - d: Remove the selected library entry
//! - C (twice): Clear the library
//! - o or Enter: Open in browser
//! - [ / ]: Previous / next category
//! - s: Toggle AI summaries, t: Top stories, /: Search, r: Refresh
//! - q: Quit

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use newshub_core::{Config, NewsClient, RecordWatcher};

use app::{ActivePane, App, InputMode};

use crate::commands::open_repository;

/// Environment variable enabling file logging
const LOG_ENV: &str = "NEWSHUB_LOG";

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    ReloadFeed,
}

/// Run the TUI application
pub async fn run(config: Config) -> Result<()> {
    init_tui_logging(&config);

    let repo = Arc::new(open_repository(&config));
    let client = NewsClient::from_config(&config).context("Failed to create news client")?;

    let watcher = match RecordWatcher::new(&config.bookmarks_path()) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "bookmark file watching disabled");
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(repo, config.country.clone());
    info!(bookmarks = app.badge_count(), "TUI started");

    let result = run_app(&mut terminal, &mut app, &client, watcher.as_ref()).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &NewsClient,
    watcher: Option<&RecordWatcher>,
) -> Result<()> {
    load_feed(terminal, app, client).await?;

    loop {
        app.check_status_timeout();

        // Another writer touched the bookmark file
        if watcher.is_some_and(RecordWatcher::check_events) {
            app.repo().bus().publish();
        }
        app.sync_library();

        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::time::sleep(Duration::from_millis(50)).await;

        if !event::poll(Duration::from_millis(0))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // If help is showing, any key dismisses it
        if app.show_help {
            app.show_help = false;
            continue;
        }

        let action = match app.input_mode {
            InputMode::Normal => handle_normal_mode(app, key.code, key.modifiers),
            InputMode::Search => handle_search_mode(app, key.code),
        };

        if action == Action::ReloadFeed {
            load_feed(terminal, app, client).await?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Fetch the current feed, keeping the old one on failure
async fn load_feed<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &NewsClient,
) -> Result<()> {
    app.is_loading = true;
    terminal.draw(|frame| ui::draw(frame, app))?;

    let result = client.fetch(&app.feed_request, &app.country).await;
    app.is_loading = false;

    match result {
        Ok(articles) => {
            let count = articles.len();
            app.set_feed(articles);
            app.set_status(format!("{}: {} article(s)", app.feed_request.title(), count));
        }
        Err(e) => {
            warn!(error = %e, "feed request failed");
            app.set_status(format!("Could not load {}: {}", app.feed_request.title(), e));
        }
    }
    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    if code != KeyCode::Char('C') {
        app.pending_clear = None;
    }

    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Char('l') => {
            app.switch_pane();
        }

        KeyCode::Char('b') => {
            if app.active_pane == ActivePane::Feed {
                if let Err(e) = app.toggle_current() {
                    app.set_status(format!("Failed to update bookmark: {}", e));
                }
            }
        }
        KeyCode::Char('d') => {
            if app.active_pane == ActivePane::Library {
                if let Err(e) = app.remove_current_entry() {
                    app.set_status(format!("Failed to remove bookmark: {}", e));
                }
            }
        }
        KeyCode::Char('C') => {
            if let Err(e) = app.request_clear_all() {
                app.set_status(format!("Failed to clear library: {}", e));
            }
        }

        KeyCode::Char('o') | KeyCode::Enter => {
            if let Some(url) = app.selected_url() {
                match open::that_detached(&url) {
                    Ok(()) => app.set_status(format!("Opened: {}", url)),
                    Err(e) => app.set_status(format!("Failed to open URL: {}", e)),
                }
            }
        }

        KeyCode::Char(']') => {
            app.cycle_category(true);
            return Action::ReloadFeed;
        }
        KeyCode::Char('[') => {
            app.cycle_category(false);
            return Action::ReloadFeed;
        }
        KeyCode::Char('s') => {
            app.toggle_summaries();
            return Action::ReloadFeed;
        }
        KeyCode::Char('t') => {
            app.show_top_stories();
            return Action::ReloadFeed;
        }
        KeyCode::Char('r') => return Action::ReloadFeed,
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }

    Action::None
}

/// Handle key events while typing a search
fn handle_search_mode(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc => app.exit_input_mode(),
        KeyCode::Enter => {
            if app.submit_search() {
                return Action::ReloadFeed;
            }
        }
        KeyCode::Char(c) => app.search_input.push(c),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        _ => {}
    }
    Action::None
}

/// Initialize logging for TUI mode
///
/// Only initializes if NEWSHUB_LOG is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let log_path = config.log_path();
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!("newshub_core={0},newshub={0}", log_level));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
