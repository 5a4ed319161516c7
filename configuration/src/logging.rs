use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{AppConfig, LogFormat};

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// `logging.level`; a second call is a no-op.
pub fn setup_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.logging.format {
        LogFormat::Full => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
    };

    match installed {
        Ok(()) => tracing::debug!(level = %config.logging.level, "logging initialized"),
        Err(err) => tracing::debug!(error = %err, "logging already initialized"),
    }
}
