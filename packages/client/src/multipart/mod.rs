//! Streaming multipart/form-data bodies
//!
//! [`MultipartWriter`] encodes parts. [`file_upload`] wires a writer, a body
//! pipe and a producer task together so a file can be uploaded without
//! holding it in memory.

mod upload;
mod writer;

pub use upload::{MultipartUpload, Producer, file_upload};
pub use writer::MultipartWriter;
