//! Dialog Forge
//!
//! Declarative modal dialogs and forms for Dioxus applications.
//!
//! This binary launches a desktop demo of the dialog layer.

mod demo;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dialog_core::DialogDefaults;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Window title
const TITLE: &str = "Dialog Forge - Demo";

#[derive(Debug, Parser)]
#[command(name = "dialog-forge", version, about = "Declarative dialog demo")]
struct Args {
    /// TOML file with dialog defaults (title, labels, widths, exit timing)
    #[arg(long = "defaults", value_name = "PATH", env = "DIALOG_FORGE_DEFAULTS")]
    defaults: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `dialog_core=trace` (overrides RUST_LOG)
    #[arg(long = "log-level", value_name = "FILTER")]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let defaults = match &args.defaults {
        Some(path) => DialogDefaults::load(path)
            .with_context(|| format!("failed to load dialog defaults from {}", path.display()))?,
        None => DialogDefaults::default(),
    };

    tracing::info!("Starting {} v{}", TITLE, dialog_ui::VERSION);

    dioxus::LaunchBuilder::desktop()
        .with_context(defaults)
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(TITLE)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(960.0, 720.0))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(480.0, 400.0)),
                )
                .with_menu(None)
                .with_custom_head(demo::custom_head()),
        )
        .launch(demo::App);

    Ok(())
}
