//! The transport capability driven by request builders

use std::sync::Arc;

use async_trait::async_trait;

use crate::http::{HttpRequest, HttpResponse};
use crate::redirect::Policy;

/// Turns a finalized request into a response or a transport error.
///
/// The redirect policy is transport-wide mutable state. Callers that swap it
/// for one request are expected to restore the previous policy afterwards,
/// and must not share a transport with a concurrently executing caller that
/// swaps it too.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and wait for the response head.
    ///
    /// The request's cancel context bounds the whole exchange, including
    /// redirect hops.
    async fn dispatch(&self, request: HttpRequest) -> crate::Result<HttpResponse>;

    /// The policy currently applied to redirect responses.
    fn redirect_policy(&self) -> Policy;

    /// Replace the policy applied to redirect responses.
    fn set_redirect_policy(&self, policy: Policy);
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn dispatch(&self, request: HttpRequest) -> crate::Result<HttpResponse> {
        (**self).dispatch(request).await
    }

    fn redirect_policy(&self) -> Policy {
        (**self).redirect_policy()
    }

    fn set_redirect_policy(&self, policy: Policy) {
        (**self).set_redirect_policy(policy);
    }
}
