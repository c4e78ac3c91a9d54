mod classification;
pub(crate) mod constructors;
mod types;

pub use types::{Error, Kind, Result};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
