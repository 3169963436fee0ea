//! Lion Simulator
//!
//! Headless surface for the Companion. Replays a list of activities and
//! devotionals, fast-forwards a manual clock, and prints the final pet
//! snapshot as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Pray twice, read once, then leave the lion alone for 13 hours
//! lion-sim --activities pray,pray,read --advance-secs 46800
//!
//! # Complete three devotionals, print every message on the way
//! lion-sim --devotionals 3 --messages
//!
//! # Verbose logging (logs go to stderr, JSON to stdout)
//! RUST_LOG=debug lion-sim --activities sing
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;

use lion_core::{
    load_config, load_config_from_path, Activity, Companion, CompanionMessage, ConfigOverrides,
    ManualClock, SurfaceEvent, SurfaceType,
};

/// Lion Simulator - run the Bible Lion companion without a terminal UI
#[derive(Parser, Debug)]
#[command(name = "lion-sim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Activities to perform, in order (pray, read, sing, help)
    #[arg(short = 'a', long, value_delimiter = ',', value_name = "LIST")]
    activities: Vec<String>,

    /// Number of devotionals to complete after the activities
    #[arg(short = 'd', long, default_value_t = 0)]
    devotionals: u32,

    /// Seconds of simulated time to pass before the final snapshot
    #[arg(long, default_value_t = 0, value_name = "SECS")]
    advance_secs: u64,

    /// Configuration file path
    #[arg(short = 'c', long, env = "LION_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pet name (overrides config)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Needs decay interval in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    needs_decay_secs: Option<u64>,

    /// Print every companion message as a JSON line before the snapshot
    #[arg(short = 'm', long)]
    messages: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "LION_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("lion_sim={level},lion_core={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = match args.config {
        Some(ref path) => load_config_from_path(Some(path.clone()))
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => load_config().context("Failed to load config")?,
    };
    let mut overrides = ConfigOverrides::new();
    overrides.name = args.name.clone();
    overrides.needs_decay_secs = args.needs_decay_secs;
    overrides.apply(&mut config);
    config.validate().context("Invalid configuration")?;
    info!(source = %config.source(), name = %config.name, "Configuration loaded");

    // Fail fast on typos rather than simulating half a run
    for name in &args.activities {
        name.parse::<Activity>()
            .with_context(|| format!("Invalid --activities entry '{name}'"))?;
    }

    let clock = ManualClock::starting_now();
    let (tx, mut rx) = mpsc::channel(1024);
    let mut companion = Companion::new(&config, clock.clone(), tx);
    companion.start();

    let mut events = vec![SurfaceEvent::Connected {
        surface_type: SurfaceType::Headless,
    }];
    events.extend(args.activities.iter().map(SurfaceEvent::activity));
    for _ in 0..args.devotionals {
        events.push(SurfaceEvent::OpenDevotional);
        events.push(SurfaceEvent::CompleteDevotional);
    }

    let mut log = Vec::new();
    for event in events {
        companion.handle_event(event).await?;
        drain(&mut rx, &mut log);
    }

    if args.advance_secs > 0 {
        let by = i64::try_from(args.advance_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .context("--advance-secs is too large")?;
        clock.advance(by);
        companion.tick().await?;
        drain(&mut rx, &mut log);
    }

    if args.messages {
        for msg in &log {
            println!("{}", serde_json::to_string(msg)?);
        }
    }

    let snapshot = companion.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    companion.shutdown().await?;
    info!(messages = log.len(), "Simulation finished");
    Ok(())
}

fn drain(rx: &mut mpsc::Receiver<CompanionMessage>, log: &mut Vec<CompanionMessage>) {
    while let Ok(msg) = rx.try_recv() {
        log.push(msg);
    }
}
