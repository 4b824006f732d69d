//! # Dompet Gateway
//!
//! OVO and GoPay wallet adapters behind a single façade.
//!
//! This crate provides:
//! - [`WalletGateway`], which dispatches calls by provider name and wraps
//!   provider failures into gateway errors
//! - Provider adapters implementing
//!   [`PaymentProvider`](dompet_core::traits::PaymentProvider)
//! - A shared request executor parameterized by a per-provider descriptor
//!
//! # Architecture
//!
//! - `rest` - transport abstraction, descriptor, request executor
//! - `ovo`, `gopay` - payload shaping and response normalization
//! - `gateway` - provider registry and façade
//!
//! # Example
//!
//! ```ignore
//! use dompet_core::config::Configuration;
//! use dompet_gateway::WalletGateway;
//!
//! let config = Configuration::load_from_file("dompet.toml")?;
//! let mut gateway = WalletGateway::from_configuration(&config, None)?;
//!
//! let started = gateway.login("gopay", "081234567890").await?;
//! if started["requires_verification"] == true {
//!     gateway.verify_code("gopay", "123456").await?;
//! }
//! let history = gateway.get_transactions("gopay", Some(20)).await?;
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)]

/// Gateway façade
pub mod gateway;

/// HTTP plumbing shared by the providers
pub mod rest;

/// OVO adapter
pub mod ovo;

/// GoPay adapter
pub mod gopay;

mod normalize;

pub use gateway::{KNOWN_PROVIDERS, WalletGateway};
pub use normalize::CURRENCY;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::gateway::WalletGateway;
    pub use crate::gopay::GoPayProvider;
    pub use crate::ovo::OvoProvider;
    pub use crate::rest::{
        AuthHeader, HttpRequest, HttpResponse, HttpTransport, ProviderDescriptor,
        ReqwestTransport, RequestExecutor, SessionHeaders, TransportError,
    };
}
