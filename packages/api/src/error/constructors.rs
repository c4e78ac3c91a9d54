use httptester_client::HttpError;

use super::BoxError;
use super::types::{Error, Kind};

pub(crate) fn url<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Url).with(e)
}

pub(crate) fn build(message: impl Into<String>) -> Error {
    Error::new(Kind::Build).with_message(message)
}

pub(crate) fn build_with<E: Into<BoxError>>(message: impl Into<String>, e: E) -> Error {
    Error::new(Kind::Build).with_message(message).with(e)
}

pub(crate) fn encode<E: Into<BoxError>>(format: &str, e: E) -> Error {
    Error::new(Kind::Encode)
        .with_message(format!("error encoding {format} body"))
        .with(e)
}

pub(crate) fn transport(e: HttpError) -> Error {
    Error::new(Kind::Transport).with(e)
}

pub(crate) fn body(e: HttpError) -> Error {
    Error::new(Kind::Body).with(e)
}

pub(crate) fn status(expected: &[u16], actual: u16, excerpt: &str) -> Error {
    let expected = expected
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    Error::new(Kind::Status).with_message(format!(
        "expected status [{expected}] got {actual}: {excerpt}"
    ))
}

pub(crate) fn content_type(expected: &str, actual: &str, excerpt: &str) -> Error {
    Error::new(Kind::ContentType).with_message(format!(
        "Content-Type is not {expected}, got {actual}: {excerpt}"
    ))
}

pub(crate) fn decode<E: Into<BoxError>>(format: &str, e: E) -> Error {
    Error::new(Kind::Decode)
        .with_message(format!("error decoding {format} body"))
        .with(e)
}

pub(crate) fn assertion(message: impl Into<String>) -> Error {
    Error::new(Kind::Assertion).with_message(message)
}
