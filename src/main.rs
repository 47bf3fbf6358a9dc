//! livecfg - Live-Reloading Configuration Viewer
//!
//! Loads a JSON settings file, prints the published settings and, when
//! watching, logs every change and error until interrupted.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use livecfg::{ConfigStore, LoadMode, ShutdownCoordinator, StoreOptions};

/// CLI arguments for livecfg
#[derive(Parser, Debug)]
#[command(name = "livecfg")]
#[command(about = "Load, merge and watch a JSON configuration file")]
#[command(version)]
#[command(long_about = "
Loads a JSON configuration file, optionally overlays it on a JSON file of
default settings (top-level keys only), and prints the result.

With --watch the file is re-read whenever it changes on disk. Touches that
leave the content unchanged are ignored; invalid content is reported and
the last good settings are kept.

RUST_LOG overrides --log-level.
")]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short, long, default_value = livecfg::config::DEFAULT_FILE_PATH)]
    pub config: PathBuf,

    /// JSON object file holding default settings
    #[arg(short, long)]
    pub defaults: Option<PathBuf>,

    /// Load the file asynchronously instead of before startup completes
    #[arg(long)]
    pub deferred: bool,

    /// Watch the configuration file and reload on change
    #[arg(short, long)]
    pub watch: bool,

    /// Print the settings once and exit; fails if nothing could be loaded
    #[arg(long, conflicts_with = "watch")]
    pub print_once: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    init_tracing(&args)?;

    info!("Starting livecfg v{}", env!("CARGO_PKG_VERSION"));

    // Reports the outcome of each load so a deferred start can be awaited
    let (loaded_tx, mut loaded_rx) = mpsc::unbounded_channel::<bool>();
    let error_tx = loaded_tx.clone();

    let mut options = StoreOptions::new(args.config.clone())
        .load_mode(if args.deferred {
            LoadMode::Deferred
        } else {
            LoadMode::Immediate
        })
        .watch(args.watch)
        .on_change(move |change| {
            info!("Settings loaded from {}", change.file_path.display());
            if let Err(e) = print_settings(&change.current) {
                error!("Failed to print settings: {}", e);
            }
            let _ = loaded_tx.send(true);
        })
        .on_error(move |err| {
            warn!("Keeping previous settings: {}", err);
            let _ = error_tx.send(false);
        });

    if let Some(path) = &args.defaults {
        options = options.default_settings(load_defaults(path)?);
    }

    let store = ConfigStore::new(options).with_context(|| {
        format!(
            "Failed to create configuration store for {}",
            args.config.display()
        )
    })?;

    if args.deferred {
        loaded_rx.recv().await;
    }

    if !args.watch {
        if args.print_once && !store.is_initialized() {
            bail!("No settings could be loaded from {}", args.config.display());
        }
        return Ok(());
    }

    info!("Watching {} (Ctrl+C to stop)", args.config.display());
    let shutdown = ShutdownCoordinator::new();
    shutdown.listen_for_signals().await?;

    info!("livecfg stopped");
    Ok(())
}

/// Read a JSON object of default settings
fn load_defaults(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read defaults file: {}", path.display()))?;

    match serde_json::from_slice::<Value>(&content)
        .with_context(|| format!("Failed to parse defaults file: {}", path.display()))?
    {
        Value::Object(map) => Ok(map),
        _ => bail!("Defaults file must contain a JSON object: {}", path.display()),
    }
}

fn print_settings(settings: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(args: &CliArgs) -> Result<()> {
    let log_level = if args.verbose {
        "debug"
    } else {
        &args.log_level
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(env_filter)
        .init();

    Ok(())
}
