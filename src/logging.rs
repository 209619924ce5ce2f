//! Logging setup for the application.
//!
//! Installs a global tracing subscriber writing to stderr, so that stdout
//! stays reserved for command output. `RUST_LOG` takes precedence over the
//! configured level.

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber, filtering at `default_level` unless `RUST_LOG` is set
///
/// # Errors
///
/// Returns `LoggingError::SetGlobal` if a global subscriber is already installed.
pub fn init(default_level: &str) -> Result<(), LoggingError> {
    let subscriber = Registry::default()
        .with(build_env_filter(default_level))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
