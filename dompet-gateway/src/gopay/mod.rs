//! GoPay wallet adapter.
//!
//! Phone + password + OTP login. The password comes from the provider
//! settings. `login` returns an OTP token which is carried as the session id
//! in `X-Session-ID`; verification yields a bearer token.

mod provider;
mod types;

pub use provider::GoPayProvider;
pub use types::*;
