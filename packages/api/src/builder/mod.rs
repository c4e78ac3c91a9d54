//! Fluent request builder
//!
//! Configuration methods consume and return the builder; `execute` sends
//! the request and hands back a [`TestResponse`](crate::TestResponse).

pub mod auth;
pub mod body;
pub mod core;
pub mod execute;
pub mod headers;
pub mod hooks;
pub mod methods;
pub mod query;

pub use self::core::{AfterHook, BeforeHook, ContentType, RequestBuilder};
pub use self::query::QueryParams;
