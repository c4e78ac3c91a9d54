use std::fmt::Write as _;

use bytes::Bytes;

/// Incremental multipart/form-data encoder.
///
/// Each method returns the bytes for the next section; the caller decides
/// where they go.
#[derive(Debug, Clone)]
pub struct MultipartWriter {
    boundary: String,
    parts_written: usize,
}

impl MultipartWriter {
    /// A writer with a random 60-character hex boundary.
    #[must_use]
    pub fn new() -> Self {
        let mut boundary = String::with_capacity(64);
        for _ in 0..4 {
            let _ = write!(boundary, "{:016x}", fastrand::u64(..));
        }
        boundary.truncate(60);
        Self::with_boundary(boundary)
    }

    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts_written: 0,
        }
    }

    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The Content-Type header value for a body produced by this writer.
    #[must_use]
    pub fn content_type(&self) -> String {
        if self.boundary.contains(['(', ')', '<', '>', '@', ',', ';', ':', '\\', '"', '/', '[', ']', '?', '=', ' ']) {
            format!("multipart/form-data; boundary=\"{}\"", self.boundary)
        } else {
            format!("multipart/form-data; boundary={}", self.boundary)
        }
    }

    /// A complete plain field.
    pub fn field(&mut self, name: &str, value: &str) -> Bytes {
        let mut out = self.part_header(&format!("form-data; name=\"{}\"", escape_quotes(name)), None);
        out.push_str(value);
        Bytes::from(out)
    }

    /// The header of a file part. The file contents follow it directly.
    pub fn file_header(&mut self, field_name: &str, file_name: &str) -> Bytes {
        let disposition = format!(
            "form-data; name=\"{}\"; filename=\"{}\"",
            escape_quotes(field_name),
            escape_quotes(file_name)
        );
        Bytes::from(self.part_header(&disposition, Some("application/octet-stream")))
    }

    /// The closing delimiter.
    #[must_use]
    pub fn finish(&self) -> Bytes {
        Bytes::from(format!("\r\n--{}--\r\n", self.boundary))
    }

    fn part_header(&mut self, disposition: &str, content_type: Option<&str>) -> String {
        let mut out = String::new();
        if self.parts_written > 0 {
            out.push_str("\r\n");
        }
        let _ = write!(out, "--{}\r\n", self.boundary);
        let _ = write!(out, "Content-Disposition: {disposition}\r\n");
        if let Some(content_type) = content_type {
            let _ = write!(out, "Content-Type: {content_type}\r\n");
        }
        out.push_str("\r\n");
        self.parts_written += 1;
        out
    }
}

impl Default for MultipartWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
