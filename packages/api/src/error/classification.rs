use httptester_client::HttpError;

use super::types::{Error, Kind};

impl Error {
    #[must_use]
    pub fn is_url(&self) -> bool {
        matches!(self.inner.kind, Kind::Url)
    }

    #[must_use]
    pub fn is_build(&self) -> bool {
        matches!(self.inner.kind, Kind::Build)
    }

    #[must_use]
    pub fn is_encode(&self) -> bool {
        matches!(self.inner.kind, Kind::Encode)
    }

    /// Returns true if the transport failed to produce a response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self.inner.kind, Kind::Transport)
    }

    #[must_use]
    pub fn is_body(&self) -> bool {
        matches!(self.inner.kind, Kind::Body)
    }

    #[must_use]
    pub fn is_status(&self) -> bool {
        matches!(self.inner.kind, Kind::Status)
    }

    #[must_use]
    pub fn is_content_type(&self) -> bool {
        matches!(self.inner.kind, Kind::ContentType)
    }

    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self.inner.kind, Kind::Decode)
    }

    #[must_use]
    pub fn is_assertion(&self) -> bool {
        matches!(self.inner.kind, Kind::Assertion)
    }

    /// The transport error behind a transport or body-read failure.
    #[must_use]
    pub fn transport_error(&self) -> Option<&HttpError> {
        self.inner
            .source
            .as_deref()
            .and_then(|source| source.downcast_ref::<HttpError>())
    }
}
