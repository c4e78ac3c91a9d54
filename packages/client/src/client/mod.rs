//! The default hyper-backed transport
//!
//! Split into the client itself, its construction helpers, and the request
//! counters it keeps.

pub mod configuration;
pub mod core;
pub mod stats;

pub use configuration::HttpClientBuilder;
pub use core::HttpClient;
pub use stats::{ClientStats, ClientStatsSnapshot};
