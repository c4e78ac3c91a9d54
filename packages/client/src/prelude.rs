//! Types most callers need, re-exported in one place

pub use crate::http::{Body, HttpRequest, HttpResponse, PipeWriter, RequestHead, pipe};

pub use crate::error::{Error, HttpError, Result};

pub use crate::cancel::CancelContext;
pub use crate::client::{ClientStats, ClientStatsSnapshot, HttpClient, HttpClientBuilder};
pub use crate::config::HttpConfig;
pub use crate::transport::Transport;

pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Version};

pub use tokio_util::sync::CancellationToken;
pub use url::Url;
