//! JRB Contact - contact form and mail relay for the JRB Industries website
//!
//! Runs the contact form in the terminal by default. `serve` starts the mail
//! relay endpoint instead, and `init-config` writes the default
//! configuration file.

mod app;
mod config;
mod platform;
mod relay;
mod state;
mod transport;
mod ui;

use anyhow::{bail, Result};
use app::App;
use config::ContactConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Startup mode chosen on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Form,
    Serve,
    InitConfig,
}

impl Mode {
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        match args.next().as_deref() {
            None => Ok(Self::Form),
            Some("serve") => Ok(Self::Serve),
            Some("init-config") => Ok(Self::InitConfig),
            Some(other) => bail!("Unknown command '{other}' (expected serve or init-config)"),
        }
    }

    fn default_filter(self) -> &'static str {
        match self {
            Self::Serve => "jrb_contact=info,tower_http=info",
            Self::Form | Self::InitConfig => "jrb_contact=info",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mode = Mode::from_args(std::env::args().skip(1))?;

    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| mode.default_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = ContactConfig::load()?;

    match mode {
        Mode::Serve => relay::serve(&config.server).await,
        Mode::InitConfig => {
            let path = config.save()?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Mode::Form => run_form(&config).await,
    }
}

async fn run_form(config: &ContactConfig) -> Result<()> {
    // Build the app before touching the terminal so config errors print normally
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

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

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.update().await;

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        let poll_duration = app.poll_timeout(Instant::now());

        // Handle crossterm events
        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
