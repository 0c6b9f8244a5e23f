//! PinPad - terminal PIN entry with a randomized keypad
//!
//! Renders the pinpad-core widget and logs its notifications. Logs go to a
//! file under the config directory so they never draw over the UI.

use std::fs::{self, File};
use std::io;
use std::panic;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pinpad_tui::app::{EventHandler, TuiConfig};
use pinpad_tui::cli::Cli;
use pinpad_tui::App;

/// Application entry point with panic handling for terminal restoration
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up panic hook to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    init_logging()?;

    let mut config = TuiConfig::load();
    cli.apply(&mut config)?;
    if cli.save {
        config.save()?;
        tracing::info!("Saved options to {:?}", TuiConfig::config_file_path());
    }

    let result = run_app(config).await;

    if let Err(e) = &result {
        tracing::error!("Application error: {}", e);
    }

    result
}

/// Log to the config directory; logging is skipped when there is none
fn init_logging() -> Result<()> {
    let Some(path) = TuiConfig::log_file_path() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::options().create(true).append(true).open(&path)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive("pinpad_tui=info".parse()?)
                .add_directive("pinpad_core=info".parse()?),
        )
        .init();

    Ok(())
}

/// Main application runner
async fn run_app(config: TuiConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(config.tick_rate());
    let mut app = App::new(config);
    let result = app.run(&mut terminal, &mut events).await;

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
