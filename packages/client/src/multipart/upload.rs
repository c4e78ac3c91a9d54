use std::fmt;
use std::future::Future;
use std::pin::{Pin, pin};

use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio::task::JoinHandle;
use tokio_util::io::ReaderStream;

use super::writer::MultipartWriter;
use crate::error::BoxError;
use crate::http::body::{Body, PipeWriter, pipe};

/// A multipart body whose bytes are produced by a separate task.
#[derive(Debug)]
pub struct MultipartUpload {
    /// Value for the request's Content-Type header
    pub content_type: String,
    /// Read end of the pipe, to be installed as the request body
    pub body: Body,
    /// Writes the parts into the pipe; must run concurrently with the send
    pub producer: Producer,
}

/// The producer half of a [`MultipartUpload`].
///
/// It ends when everything has been written, when a write or read fails,
/// or when the body is dropped by the transport.
pub struct Producer {
    fut: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
}

impl Producer {
    /// Run the producer on the current Tokio runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.fut)
    }

    /// Run the producer on the calling task.
    pub async fn run(self) {
        self.fut.await;
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("Producer")
    }
}

/// Prepare a streaming upload of `content` as the file part `field_name`.
///
/// `fields` are written first as plain parts, in iteration order. Any
/// failure closes the pipe with that error so the transport reading the
/// body fails instead of seeing a truncated upload.
pub fn file_upload<R, I, K, V>(field_name: &str, file_name: &str, content: R, fields: I) -> MultipartUpload
where
    R: AsyncRead + Send + 'static,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let writer = MultipartWriter::new();
    let content_type = writer.content_type();
    let (pipe_writer, body) = pipe();
    let fields: Vec<(String, String)> = fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let fut = produce(
        pipe_writer,
        writer,
        fields,
        field_name.to_owned(),
        file_name.to_owned(),
        content,
    );

    MultipartUpload {
        content_type,
        body,
        producer: Producer { fut: Box::pin(fut) },
    }
}

async fn produce<R>(
    mut pipe: PipeWriter,
    mut writer: MultipartWriter,
    fields: Vec<(String, String)>,
    field_name: String,
    file_name: String,
    content: R,
) where
    R: AsyncRead + Send + 'static,
{
    for (name, value) in &fields {
        if let Err(err) = pipe.write(writer.field(name, value)).await {
            fail(pipe, "field", err).await;
            return;
        }
    }

    if let Err(err) = pipe.write(writer.file_header(&field_name, &file_name)).await {
        fail(pipe, "file header", err).await;
        return;
    }

    let mut chunks = pin!(ReaderStream::new(content));
    while let Some(chunk) = chunks.next().await {
        let result = match chunk {
            Ok(chunk) => pipe.write(chunk).await.map_err(BoxError::from),
            Err(err) => Err(BoxError::from(err)),
        };
        if let Err(err) = result {
            fail(pipe, "file content", err).await;
            return;
        }
    }

    if let Err(err) = pipe.write(writer.finish()).await {
        fail(pipe, "closing boundary", err).await;
        return;
    }

    tracing::trace!(%field_name, %file_name, "multipart upload written");
    pipe.close();
}

async fn fail<E: Into<BoxError>>(pipe: PipeWriter, stage: &str, err: E) {
    let err = err.into();
    tracing::debug!(stage, error = %err, "multipart producer failed");
    pipe.close_with_error(err).await;
}
