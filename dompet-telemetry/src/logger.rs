//! [`Logger`] implementation that forwards to `tracing`.

use dompet_core::traits::{LogContext, LogLevel, Logger};
use tracing::{debug, error, info, warn};

use crate::masking::SensitiveDataMasker;

/// Forwards gateway log records to the installed `tracing` subscriber.
///
/// Emergency, alert, and critical records are emitted as `ERROR` events and
/// notices as `INFO`; the original level is kept in the `severity` field.
/// Messages and context are scrubbed with [`SensitiveDataMasker`] first.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    masker: SensitiveDataMasker,
}

impl TracingLogger {
    /// Creates a logger with the default masker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logger with a custom masker.
    #[must_use]
    pub fn with_masker(masker: SensitiveDataMasker) -> Self {
        Self { masker }
    }

    fn render_context(&self, context: &LogContext) -> String {
        if context.is_empty() {
            return String::new();
        }
        let raw = serde_json::to_string(context).unwrap_or_default();
        self.masker.mask_string(&raw).into_owned()
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) {
        let message = self.masker.mask_string(message);
        let context = self.render_context(context);
        let level_name = level.as_str();

        match level {
            LogLevel::Emergency | LogLevel::Alert | LogLevel::Critical | LogLevel::Error => {
                error!(target: "dompet", severity = level_name, context = %context, "{message}");
            }
            LogLevel::Warning => {
                warn!(target: "dompet", severity = level_name, context = %context, "{message}");
            }
            LogLevel::Notice | LogLevel::Info => {
                info!(target: "dompet", severity = level_name, context = %context, "{message}");
            }
            LogLevel::Debug => {
                debug!(target: "dompet", severity = level_name, context = %context, "{message}");
            }
        }
    }
}
