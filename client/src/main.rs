//! catalog-tui - terminal front end for the item catalog API

mod app;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use catalog_client::api::DEFAULT_API_URL;
use catalog_client::{ItemClient, Outcome};

use app::App;

/// How long to wait for input before redrawing
const TICK: Duration = Duration::from_millis(50);

/// Terminal UI for the item catalog
#[derive(Parser, Debug)]
#[command(name = "catalog-tui", about, long_about = None)]
struct Args {
    /// Items endpoint of the catalog API
    #[arg(long, env = "CATALOG_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long, env = "CATALOG_TUI_LOG")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let directory = log_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or("log file path has no file name")?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        init_logging(log_file)?;
    }
    let client = ItemClient::new(&args.api_url)?;
    tracing::info!("Using catalog API at {}", client.base_url());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app, client);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Event loop: spawn pending commands, draw, read a key, apply finished outcomes
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: ItemClient,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();

    loop {
        for command in app.take_commands() {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = client.execute(command).await;
                // The receiver only goes away when the UI is shutting down
                let _ = tx.send(outcome);
            });
        }

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key, Instant::now()) {
                    return Ok(());
                }
            }
        }

        while let Ok(outcome) = rx.try_recv() {
            app.handle_outcome(outcome);
        }
        app.tick(Instant::now());
    }
}
