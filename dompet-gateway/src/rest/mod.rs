//! HTTP plumbing shared by every provider.
//!
//! - [`HttpTransport`] sends a built request; [`ReqwestTransport`] is the
//!   production implementation
//! - [`ProviderDescriptor`] captures what differs between providers: base
//!   URL, user agent, auth and session header shapes, timeout
//! - [`RequestExecutor`] builds headers, serializes bodies, parses responses,
//!   and turns failures into `ProviderError`s
//!
//! # Example
//!
//! ```ignore
//! use dompet_gateway::rest::{AuthHeader, ProviderDescriptor, RequestExecutor, SessionHeaders};
//!
//! let descriptor = ProviderDescriptor::new("gopay", base_url, "GoPay/1.0", AuthHeader::Bearer);
//! let executor = RequestExecutor::new(descriptor, transport);
//! let profile = executor
//!     .execute(Method::GET, "/wallet/profile", None, SessionHeaders::from_state(&state))
//!     .await?;
//! ```

mod client;
mod config;
mod executor;

pub use client::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use config::{AuthHeader, ProviderDescriptor};
pub use executor::{RequestExecutor, SessionHeaders};
pub use reqwest::Method;
