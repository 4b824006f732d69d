//! Subscriber setup for Dompet applications.
//!
//! Libraries in this workspace only emit `tracing` events; binaries and
//! tests call [`init_logging`] once to decide where those events go.

mod config;

pub use config::{LogConfig, LogFormat, LogOutput, RotationConfig};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name used for rolling log files.
const LOG_FILE_PREFIX: &str = "dompet.log";

/// Installs the global subscriber described by `config`.
///
/// `RUST_LOG` overrides `config.level` when set. Returns the appender guards;
/// keep them alive until shutdown so buffered file output is flushed.
///
/// # Example
///
/// ```no_run
/// use dompet_telemetry::logging::{init_logging, LogConfig};
///
/// let _guards = init_logging(&LogConfig::default())?;
/// # Ok::<(), dompet_telemetry::logging::LoggingError>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<Vec<WorkerGuard>, LoggingError> {
    if config.outputs.is_empty() {
        return Err(LoggingError::InvalidConfig(
            "at least one output is required".to_string(),
        ));
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| LoggingError::InvalidConfig(format!("bad level '{}': {e}", config.level)))?;

    let mut guards = Vec::new();
    let mut layers: Vec<Box<dyn Layer<_> + Send + Sync>> = Vec::new();

    for output in &config.outputs {
        match output {
            LogOutput::Stdout => layers.push(stdout_layer(config)),
            LogOutput::File { path, rotation } => {
                std::fs::create_dir_all(path)?;
                let (layer, guard) = file_layer(config, path, *rotation);
                layers.push(layer);
                guards.push(guard);
            }
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(guards)
}

fn stdout_layer<S>(config: &LogConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let base = fmt::layer()
        .with_target(true)
        .with_thread_ids(config.include_thread_id)
        .with_file(config.include_file_info)
        .with_line_number(config.include_file_info);

    match config.format {
        LogFormat::Json => base.json().flatten_event(true).boxed(),
        LogFormat::Pretty => base.pretty().boxed(),
    }
}

fn file_layer<S>(
    config: &LogConfig,
    path: &str,
    rotation: Option<RotationConfig>,
) -> (Box<dyn Layer<S> + Send + Sync>, WorkerGuard)
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let appender = match rotation.unwrap_or_default() {
        RotationConfig::Hourly => tracing_appender::rolling::hourly(path, LOG_FILE_PREFIX),
        RotationConfig::Daily => tracing_appender::rolling::daily(path, LOG_FILE_PREFIX),
        RotationConfig::Never => tracing_appender::rolling::never(path, LOG_FILE_PREFIX),
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(config.include_thread_id)
        .with_file(config.include_file_info)
        .with_line_number(config.include_file_info)
        .json()
        .flatten_event(true)
        .boxed();

    (layer, guard)
}

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory: {0}")]
    DirectoryCreation(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid logging configuration: {0}")]
    InvalidConfig(String),

    /// A global subscriber is already installed
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_outputs_rejected() {
        let config = LogConfig {
            outputs: Vec::new(),
            ..LogConfig::default()
        };
        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidConfig(_)));
    }
}
