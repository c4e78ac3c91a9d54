//! Buffered test responses
//!
//! A [`TestResponse`] holds the whole response body in memory. Assertions
//! report failures to the error sink and always hand the response back,
//! so one chain surfaces every violation.

mod assertions;
mod core;
mod decode;

pub use self::core::TestResponse;
