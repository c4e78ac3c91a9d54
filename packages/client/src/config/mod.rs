//! Transport configuration
//!
//! [`HttpConfig`] holds the settings an [`HttpClient`](crate::HttpClient)
//! is built from: pool behaviour, timeouts and redirect defaults.

mod builders;
mod types;

pub use types::HttpConfig;
