//! # Dompet Telemetry
//!
//! Logging support for the Dompet e-wallet client.
//!
//! This crate provides:
//! - Subscriber setup with JSON and pretty formats, stdout and rolling files
//! - Masking of phone numbers, OTP codes, passwords, and tokens
//! - [`TracingLogger`](logger::TracingLogger), a `tracing`-backed gateway logger

#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

/// Subscriber configuration and initialization
pub mod logging;

/// `tracing`-backed [`Logger`](dompet_core::traits::Logger)
pub mod logger;

/// Sensitive data masking
pub mod masking;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::logger::TracingLogger;
    pub use crate::logging::{LogConfig, LogFormat, LogOutput, init_logging};
    pub use crate::masking::{Sensitive, SensitiveDataMasker, mask_phone};
}
