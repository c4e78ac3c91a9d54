//! Execution hooks

use httptester_client::{HttpError, HttpRequest, HttpResponse, RequestHead};

use crate::builder::core::RequestBuilder;

impl RequestBuilder {
    /// Inspect or modify the finalized request just before it is sent.
    #[must_use]
    pub fn before_execute<F>(self, mut hook: F) -> Self
    where
        F: FnMut(&mut HttpRequest) + Send + 'static,
    {
        self.before_execute_with(move |mut request| {
            hook(&mut request);
            request
        })
    }

    /// Replace the finalized request with the one `hook` returns.
    ///
    /// Redirect suppression from [`no_follow`](RequestBuilder::no_follow)
    /// stays in effect for the substituted request.
    #[must_use]
    pub fn before_execute_with<F>(mut self, hook: F) -> Self
    where
        F: FnMut(HttpRequest) -> HttpRequest + Send + 'static,
    {
        self.before = Some(Box::new(hook));
        self
    }

    /// Observe the outcome of dispatch. Exactly one of the response and
    /// the error is present. Runs before the redirect policy is restored.
    #[must_use]
    pub fn after_execute<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&RequestHead, Option<&HttpResponse>, Option<&HttpError>) + Send + 'static,
    {
        self.after = Some(Box::new(hook));
        self
    }
}
