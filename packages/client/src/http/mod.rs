//! HTTP request, response and body types
//!
//! These are the values exchanged with a [`Transport`](crate::Transport):
//! the request handed to `dispatch`, the response it produces, and the
//! byte bodies flowing in both directions.

pub mod body;
pub mod request;
pub mod response;

pub use body::{Body, PipeWriter, pipe};
pub use request::{HttpRequest, RequestHead};
pub use response::HttpResponse;
