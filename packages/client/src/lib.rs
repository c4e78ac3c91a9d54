//! # httptester client
//!
//! The transport layer under `httptester`: a pooled HTTP/1.1 client built on
//! hyper, a redirect policy that can be swapped between requests, request
//! bodies that stream from readers or from a concurrently running producer,
//! and cooperative cancellation.
//!
//! ```no_run
//! use httptester_client::{HttpClient, HttpRequest, Method, Transport, Url};
//!
//! # async fn run() -> httptester_client::Result<()> {
//! let client = HttpClient::new();
//! let url = Url::parse("http://127.0.0.1:8080/health").expect("valid url");
//! let response = client.dispatch(HttpRequest::new(Method::GET, url)).await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod redirect;
pub mod transport;

pub mod prelude;

pub use crate::prelude::*;
