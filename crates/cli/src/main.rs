use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use feedback_tui::TuiConfig;
use feedback_util::{FeedbackSettings, default_log_path, expand_tilde};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Collect customer feedback from the terminal.
#[derive(Parser, Debug)]
#[command(name = "feedback", version, about)]
struct Args {
    /// Settings file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    settings: Option<String>,

    /// Seconds the thank-you page waits before returning home
    #[arg(long, value_name = "SECONDS")]
    redirect_seconds: Option<u64>,

    /// Base id for the type selector's accessibility relationships
    #[arg(long, value_name = "ID")]
    dom_id: Option<String>,

    /// Theme identifier (TUI_THEME still takes precedence)
    #[arg(long, value_name = "THEME")]
    theme: Option<String>,

    /// Where to append log output
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_path = args.log_file.as_deref().map(expand_tilde).unwrap_or_else(default_log_path);
    init_tracing(&log_path)?;

    let settings = match args.settings.as_deref() {
        Some(path) => FeedbackSettings::load_from(expand_tilde(path))
            .with_context(|| format!("failed to load settings from {path}"))?,
        None => FeedbackSettings::load().context("failed to load settings")?,
    };
    info!(settings = %settings.path().display(), log = %log_path.display(), "starting feedback TUI");

    let config = apply_overrides(TuiConfig::from_settings(&settings), &args);
    feedback_tui::run(config).await
}

/// Command-line flags win over the settings file.
fn apply_overrides(mut config: TuiConfig, args: &Args) -> TuiConfig {
    if let Some(seconds) = args.redirect_seconds {
        config.redirect_seconds = seconds;
    }
    if let Some(dom_id) = &args.dom_id {
        config.dom_id = Some(dom_id.clone());
    }
    if let Some(theme) = &args.theme {
        config.theme = Some(theme.clone());
    }
    config
}

/// Routes tracing output to `path`; the terminal belongs to the UI.
fn init_tracing(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
}
