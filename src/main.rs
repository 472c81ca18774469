//! Zukan - Entry Point
//!
//! Initializes the terminal, loads the catalog and saved
//! identification state, and runs the event loop.

use std::fs::OpenOptions;
use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use zukan::catalog::{Catalog, CATALOG_PATH};
use zukan::save::{default_path, IdentifiedSet};
use zukan::session::Session;
use zukan::ui::{self, App};

fn main() -> Result<()> {
    // Log to a file so the TUI stays clean
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("zukan.log")
        .unwrap_or_else(|_| OpenOptions::new().write(true).open("/dev/null").unwrap());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Zukan v{}", env!("CARGO_PKG_VERSION"));

    // Load data before touching the terminal; a bad catalog degrades
    // to an empty one rather than aborting
    let catalog = Catalog::load_or_empty(CATALOG_PATH);
    let identified = IdentifiedSet::load(default_path());
    let mut session = Session::new(catalog, identified);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_event_loop(&mut terminal, &mut app, &mut session);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Zukan shut down cleanly");
    result
}

/// Draw, block on the next key event, repeat
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut Session,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::draw(frame, app, session);
        })?;

        if let Event::Key(key) = event::read()? {
            // Only handle key press events, not releases
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_input(key, session)? {
                break;
            }
        }
    }

    Ok(())
}
