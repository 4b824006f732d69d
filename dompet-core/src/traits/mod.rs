//! Core trait definitions.
//!
//! - [`PaymentProvider`] - the capability every wallet adapter implements
//! - [`Logger`] - the structured log sink used by the gateway façade

mod logger;
mod provider;

pub use logger::{LogContext, LogEntry, LogLevel, Logger, MemoryLogger, NullLogger};
pub use provider::{AuthState, DEFAULT_TRANSACTION_LIMIT, PaymentProvider, ResultMap};
