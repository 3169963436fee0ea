//! Bible Lion TUI Entry Point
//!
//! Launches the terminal UI for Leo the lion.
//!
//! Usage:
//!   lion-tui [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>     Configuration file (env: LION_CONFIG)
//!   -n, --name <NAME>       Pet name
//!   -l, --log-level <LEVEL> Log level (env: LION_LOG_LEVEL)
//!       --log-file <FILE>   Write logs here (the screen is taken by the UI)

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lion_core::{load_config, load_config_from_path, ConfigOverrides, LionConfig};
use lion_tui::App;

/// Bible Lion - a devotional virtual pet in your terminal
#[derive(Parser, Debug)]
#[command(name = "lion-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "LION_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pet name (overrides config)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "LION_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Append logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn init_logging(level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lion_tui={level},lion_core={level}")));

    // Without a file there is nowhere to log: stdout belongs to the UI
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .init();
    Ok(())
}

fn load(args: &Args) -> anyhow::Result<LionConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_from_path(Some(path.clone()))
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => load_config().context("Failed to load config")?,
    };
    let mut overrides = ConfigOverrides::new();
    overrides.name = args.name.clone();
    overrides.apply(&mut config);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    let config = load(&args)?;
    tracing::info!(source = %config.source(), name = %config.name, "Configuration loaded");

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("❌ Error: lion-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        eprintln!();
        eprintln!("For a headless run, try: lion-sim --activities pray,read");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Show goodbye message after TUI closes
    match result {
        Ok(Some(goodbye)) => {
            println!("\n\x1b[33m🦁\x1b[0m {goodbye}\n");
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => Err(e),
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &LionConfig,
) -> anyhow::Result<Option<String>> {
    let mut app = App::new(config)?;
    app.run(terminal).await?;
    tracing::info!("Goodbye");
    Ok(app.goodbye().map(str::to_string))
}
