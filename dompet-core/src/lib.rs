//! # Dompet Core
//!
//! Core types, traits, and configuration for the Dompet e-wallet client.
//!
//! This crate provides:
//! - Error types for configuration, provider, and gateway failures
//! - A nested configuration tree with merge, validation, and dotted-path access
//! - The [`PaymentProvider`](traits::PaymentProvider) capability shared by every wallet adapter
//! - The [`Logger`](traits::Logger) capability with a no-op default

#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_const_for_fn)]

/// Error types and handling
pub mod error;

/// Configuration management
pub mod config;

/// Core trait definitions
pub mod traits;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{
        ConfigError, ContextMap, DompetError, ErrorSeverity, GatewayError, GatewayErrorKind,
        ProviderError, ProviderErrorKind,
    };
    pub use crate::traits::*;
}
