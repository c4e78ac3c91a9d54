//! Request and response bodies
//!
//! A [`Body`] is either an in-memory buffer, which can be replayed for
//! redirects and repeated requests, or a one-shot stream. [`pipe`] builds a
//! streaming body fed by a concurrently running producer.

use std::fmt;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::{self, BoxStream, Stream};
use http_body::Frame;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyDataStream, BodyExt, Full, StreamBody};
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_util::io::ReaderStream;

use crate::error::{self, BoxError, BrokenPipe};

/// Number of chunks a pipe buffers before the writer has to wait.
const PIPE_CAPACITY: usize = 1;

/// A request or response body.
pub struct Body {
    inner: Inner,
}

enum Inner {
    Reusable(Bytes),
    Streaming(BoxStream<'static, Result<Bytes, BoxError>>),
}

impl Body {
    /// An empty, replayable body.
    #[must_use]
    pub fn empty() -> Self {
        Body {
            inner: Inner::Reusable(Bytes::new()),
        }
    }

    /// Wrap a stream of chunks. The resulting body can be sent only once.
    pub fn wrap_stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        Body {
            inner: Inner::Streaming(stream.map(|chunk| chunk.map_err(Into::into)).boxed()),
        }
    }

    /// Stream the contents of an async reader without buffering it.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self::wrap_stream(ReaderStream::new(reader))
    }

    pub(crate) fn from_incoming(incoming: hyper::body::Incoming) -> Self {
        Self::wrap_stream(BodyDataStream::new(incoming))
    }

    /// The buffered contents, if this body is held in memory.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.inner {
            Inner::Reusable(bytes) => Some(bytes),
            Inner::Streaming(_) => None,
        }
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        matches!(self.inner, Inner::Streaming(_))
    }

    /// Clone the body if it is held in memory. Streams cannot be cloned.
    #[must_use]
    pub fn try_clone(&self) -> Option<Body> {
        match &self.inner {
            Inner::Reusable(bytes) => Some(Body {
                inner: Inner::Reusable(bytes.clone()),
            }),
            Inner::Streaming(_) => None,
        }
    }

    /// Read the whole body into memory.
    ///
    /// # Errors
    ///
    /// Returns a body error if any chunk of the underlying stream fails.
    pub async fn bytes(self) -> crate::Result<Bytes> {
        match self.inner {
            Inner::Reusable(bytes) => Ok(bytes),
            Inner::Streaming(mut stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk.map_err(error::body)?);
                }
                Ok(buf.freeze())
            }
        }
    }

    pub(crate) fn into_http_body(self) -> UnsyncBoxBody<Bytes, BoxError> {
        match self.inner {
            Inner::Reusable(bytes) => Full::new(bytes)
                .map_err(|never| match never {})
                .boxed_unsync(),
            Inner::Streaming(stream) => StreamBody::new(stream.map(|chunk| chunk.map(Frame::data)))
                .boxed_unsync(),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body {
            inner: Inner::Reusable(bytes),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(vec: Vec<u8>) -> Self {
        Bytes::from(vec).into()
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Bytes::from(s).into()
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Bytes::from_static(s.as_bytes()).into()
    }
}

impl From<&'static [u8]> for Body {
    fn from(s: &'static [u8]) -> Self {
        Bytes::from_static(s).into()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Reusable(bytes) => f
                .debug_tuple("Body")
                .field(&format!("{} bytes", bytes.len()))
                .finish(),
            Inner::Streaming(_) => f.debug_tuple("Body").field(&"streaming").finish(),
        }
    }
}

/// The write end of a body pipe.
///
/// Every `write` waits until the reader has room for the chunk, so a
/// producer can never run more than [`PIPE_CAPACITY`] chunks ahead of the
/// transport consuming the body.
#[derive(Debug)]
pub struct PipeWriter {
    tx: mpsc::Sender<Result<Bytes, BoxError>>,
}

impl PipeWriter {
    /// Hand a chunk to the reader.
    ///
    /// # Errors
    ///
    /// Returns [`BrokenPipe`] once the read end has been dropped.
    pub async fn write(&mut self, chunk: Bytes) -> Result<(), BrokenPipe> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.tx.send(Ok(chunk)).await.map_err(|_| BrokenPipe)
    }

    /// True once the read end has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Close the pipe. The reader sees a clean end of stream.
    pub fn close(self) {
        drop(self);
    }

    /// Close the pipe so the reader sees `err` instead of end of stream.
    pub async fn close_with_error<E: Into<BoxError>>(self, err: E) {
        // Nobody is left to observe the error if the reader is gone.
        let _ = self.tx.send(Err(err.into())).await;
    }
}

/// Create a bounded pipe whose read end is a streaming [`Body`].
#[must_use]
pub fn pipe() -> (PipeWriter, Body) {
    let (tx, mut rx) = mpsc::channel(PIPE_CAPACITY);
    let reader = stream::poll_fn(move |cx| rx.poll_recv(cx));
    (PipeWriter { tx }, Body::wrap_stream(reader))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reusable_body_clones_and_collects() {
        let body = Body::from("hello");
        let copy = body.try_clone().expect("in-memory body clones");
        assert_eq!(body.bytes().await.expect("collect").as_ref(), b"hello");
        assert_eq!(copy.as_bytes(), Some(&b"hello"[..]));
    }

    #[tokio::test]
    async fn pipe_delivers_writes_in_order() {
        let (mut writer, body) = pipe();
        assert!(body.try_clone().is_none());

        let producer = tokio::spawn(async move {
            writer.write(Bytes::from_static(b"ab")).await.expect("write");
            writer.write(Bytes::from_static(b"cd")).await.expect("write");
            writer.close();
        });

        assert_eq!(body.bytes().await.expect("collect").as_ref(), b"abcd");
        producer.await.expect("producer");
    }

    #[tokio::test]
    async fn pipe_error_replaces_end_of_stream() {
        let (mut writer, body) = pipe();

        tokio::spawn(async move {
            writer.write(Bytes::from_static(b"partial")).await.expect("write");
            writer.close_with_error("disk on fire").await;
        });

        let err = body.bytes().await.expect_err("reader sees the producer error");
        assert!(err.is_body());
        assert!(err.to_string().contains("disk on fire"));
    }

    #[tokio::test]
    async fn dropped_reader_breaks_the_pipe() {
        let (mut writer, body) = pipe();
        drop(body);
        assert!(writer.is_closed());
        assert!(writer.write(Bytes::from_static(b"x")).await.is_err());
    }
}
