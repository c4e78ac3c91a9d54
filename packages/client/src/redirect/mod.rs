//! Redirect handling
//!
//! An [`HttpClient`](crate::HttpClient) follows redirects itself, asking its
//! current [`Policy`] about every hop. By default it follows up to 10 hops.
//! The policy is shared, mutable client state: see
//! [`Transport::set_redirect_policy`](crate::Transport::set_redirect_policy).

mod attempt;
mod headers;
mod policy;

pub(crate) use attempt::ActionKind;
pub use attempt::{Action, Attempt};
pub(crate) use headers::{is_cross_host, make_referer, remove_sensitive_headers};
pub use policy::Policy;
