//! `tracing` subscriber setup. The filter comes from `FEIHUA_LOG` (same syntax
//! as `RUST_LOG`) and defaults to `feihua=info`.

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogTarget;

const LOG_ENV: &str = "FEIHUA_LOG";
const DEFAULT_FILTER: &str = "feihua=info";

/// Install the global subscriber. Call once, before the store is opened.
pub fn init_logging(target: &LogTarget) -> Result<()> {
    match target {
        LogTarget::Stderr => install(io::stderr, true),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context("failed to create log directory")?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            install(Mutex::new(file), false)
        }
    }
}

fn install<W>(writer: W, ansi: bool) -> Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("failed to install log subscriber")
}
