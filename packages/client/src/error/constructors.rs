use super::BoxError;
use super::helpers::{Canceled, TimedOut};
use super::types::{Error, Kind};

/// Creates an `Error` for a builder error.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for a request error.
pub fn request<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Request).with(e.into())
}

/// Creates an `Error` for a redirect error.
pub fn redirect<E: Into<BoxError>>(e: E, url: url::Url) -> Error {
    Error::new(Kind::Redirect).with(e.into()).with_url(url)
}

/// Creates an `Error` for a body error.
pub fn body<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Body).with(e.into())
}

/// Creates an `Error` for a request whose cancellation token fired.
pub fn canceled() -> Error {
    Error::new(Kind::Canceled).with(Canceled)
}

/// Creates an `Error` for a request whose deadline passed.
pub fn timed_out() -> Error {
    Error::new(Kind::Timeout).with(TimedOut)
}

pub fn url_bad_scheme(url: url::Url) -> Error {
    Error::new(Kind::Builder)
        .with(format!("unsupported URL scheme {:?}", url.scheme()))
        .with_url(url)
}
