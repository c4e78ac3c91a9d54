//! Fluent HTTP request builder and response assertions for integration tests
//!
//! Build a request step by step, execute it against a [`Transport`] and
//! chain assertions on the buffered [`TestResponse`]. Nothing in the chain
//! returns errors: every failure goes to the [`ErrorSink`] supplied up
//! front, usually [`ErrorSink::panicking`] to fail the running test.
//!
//! ```no_run
//! use httptester::{ErrorSink, HttpClient, RequestBuilder};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Created {
//!     id: u64,
//! }
//!
//! # async fn run() {
//! let mut builder = RequestBuilder::new("http://127.0.0.1:8080", HttpClient::new(), ErrorSink::panicking())
//!     .post("/users")
//!     .bearer("token")
//!     .json(&serde_json::json!({ "name": "ann" }));
//!
//! if let Some(resp) = builder.execute().await {
//!     let created: Option<Created> = resp.assert_status(&[201]).decode_json();
//!     assert!(created.is_some());
//! }
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod error;
pub mod response;
pub mod sink;
pub mod tester;

pub use builder::{AfterHook, BeforeHook, ContentType, QueryParams, RequestBuilder};
pub use error::{Error, Kind, Result};
pub use response::TestResponse;
pub use sink::{ErrorCollector, ErrorSink};
pub use tester::HttpTester;

// Transport-side types callers need to configure and observe requests
pub use httptester_client::redirect::Policy;
pub use httptester_client::{
    Body, CancelContext, CancellationToken, HttpClient, HttpClientBuilder, HttpConfig, HttpError, HttpRequest,
    HttpResponse, RequestHead, Transport,
};

/// The transport crate, for mocks and lower-level configuration
pub use httptester_client as client;
