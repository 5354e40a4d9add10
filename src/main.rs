//! nanji - analog clock trainer for children learning to read time
//!
//! Drag the hour and minute hands with the mouse, reveal and hear the time,
//! then try the bonus "N minutes before/after" questions.

mod config;
mod core;
mod frontend;
mod tts;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use frontend::{Frontend, FrontendEvent, TuiFrontend};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(ClapParser)]
#[command(name = "nanji")]
#[command(about = "Analog clock trainer: なんじなんぷん？", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Widget variant (overrides clock.variant from config)
    #[arg(short, long, value_enum)]
    variant: Option<VariantArg>,

    /// Custom data directory (default: ~/.nanji)
    /// Can also be set via NANJI_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Disable text-to-speech
    #[arg(long)]
    mute: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum VariantArg {
    /// 1-minute snap, three bonus questions
    Minute,
    /// 5-minute snap, three bonus questions
    FiveMinute,
    /// 5-minute snap, pick the offset yourself
    Offset,
}

impl VariantArg {
    fn variant(self) -> core::Variant {
        match self {
            VariantArg::Minute => core::Variant::Minute,
            VariantArg::FiveMinute => core::Variant::FiveMinute,
            VariantArg::Offset => core::Variant::Offset,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set custom data directory if specified (via CLI or environment variable)
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, data_dir);
    }

    // TUI apps can't log to stdout, so we write to a file in the data directory
    // (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    let base_dir = config::Config::base_dir()?;
    std::fs::create_dir_all(&base_dir)
        .context(format!("Failed to create data directory {:?}", base_dir))?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config::Config::log_path()?)
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    tracing::info!("Using data directory: {:?}", base_dir);

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => config::Config::load_from_path(path)?,
        None => config::Config::load()?,
    };
    if let Some(variant) = cli.variant {
        config.clock.variant = variant.variant();
    }
    if cli.mute {
        config.tts.enabled = false;
    }

    run_tui(config)
}

/// TUI main loop
fn run_tui(config: config::Config) -> Result<()> {
    use core::AppCore;
    use frontend::tui::ClockPalette;

    let mut app_core = AppCore::new(config);
    let palette = ClockPalette::from_config(&app_core.config.ui);
    let poll_timeout = Duration::from_millis(app_core.config.ui.poll_timeout_ms);

    let mut frontend = TuiFrontend::new(palette)?;
    frontend.set_poll_timeout(poll_timeout);

    while app_core.running {
        frontend.render(&mut app_core)?;

        // No sleep needed - event::poll() timeout already limits frame rate
        for event in frontend.poll_events()? {
            handle_frontend_event(&mut app_core, &frontend, event);
            if !app_core.running {
                break;
            }
        }
    }

    frontend.cleanup()?;
    tracing::info!("Exited cleanly");
    Ok(())
}

/// Route one event: clicks on panel controls become actions, everything else
/// goes to the core (hand drags, keys, resizes).
fn handle_frontend_event(
    app_core: &mut core::AppCore,
    frontend: &dyn Frontend,
    event: FrontendEvent,
) {
    let now = Instant::now();
    if let Some((x, y)) = event.left_click() {
        if let Some(action) = frontend.action_at(x, y) {
            app_core.dispatch(action, now);
            return;
        }
    }
    app_core.handle_event(event, now);
}
