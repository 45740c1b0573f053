use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogFormat;

/// Installs the global subscriber. `RUST_LOG` wins over `verbose`.
/// Library `log` records are bridged into tracing.
pub fn init(verbose: bool, format: LogFormat) -> Result<()> {
    tracing_log::LogTracer::init().context("Failed to install log bridge")?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Text => {
            let subscriber = registry.with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            );
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Json => {
            let subscriber = registry.with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            );
            tracing::subscriber::set_global_default(subscriber)
        }
    };
    installed.context("Failed to install tracing subscriber")
}
