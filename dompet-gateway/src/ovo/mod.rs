//! OVO wallet adapter.
//!
//! Phone + OTP login. `login` always asks for verification and returns the
//! upstream reference id that `verify_code` must echo back. The auth token
//! is sent raw in the `Authorization` header.
//!
//! # Example
//!
//! ```ignore
//! use dompet_gateway::ovo::OvoProvider;
//! use dompet_core::traits::PaymentProvider;
//!
//! let mut ovo = OvoProvider::new(&settings, transport);
//! ovo.login("081234567890").await?;
//! ovo.verify_code("123456").await?;
//! let balance = ovo.get_balance().await?;
//! ```

mod provider;
mod types;

pub use provider::OvoProvider;
pub use types::*;
