//! Wire format of the processing service.
//!
//! Both endpoints take the same multipart form:
//!
//! | field         | content                                  |
//! |---------------|------------------------------------------|
//! | `image`       | file bytes, with file name and MIME type |
//! | `text`        | overlay string (may be empty)            |
//! | `double_line` | `"true"` or `"false"`                    |
//!
//! `/process` answers with JSON, either `{"image": "<data URI>"}` or
//! `{"error": "<message>"}`. `/download` answers with the PNG bytes on
//! success; its body is ignored on any other status.

use std::fmt;

use serde::Deserialize;

use crate::data_uri::{DataUri, DataUriError};
use crate::transport::SubmitError;

/// Multipart field carrying the image bytes.
pub const FIELD_IMAGE: &str = "image";
/// Multipart field carrying the overlay text.
pub const FIELD_TEXT: &str = "text";
/// Multipart field carrying the double-line flag.
pub const FIELD_DOUBLE_LINE: &str = "double_line";
/// MIME type of the composite returned by `/download`.
pub const DOWNLOAD_MIME: &str = "image/png";

/// The two remote endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Preview: returns the composite as a JSON-wrapped data URI.
    Process,
    /// Final: returns the composite as raw PNG bytes.
    Download,
}

impl Endpoint {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Download => "download",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Image reference returned by `/process`.
///
/// Kept verbatim: the preview element's `src` is set to exactly this
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage(String);

impl ProcessedImage {
    #[must_use]
    pub const fn new(reference: String) -> Self {
        Self(reference)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Parse the reference as a `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns [`DataUriError`] if the reference is not a base64 data URI.
    pub fn data_uri(&self) -> Result<DataUri, DataUriError> {
        self.0.parse()
    }
}

/// JSON body of a `/process` reply.
#[derive(Debug, Deserialize)]
struct ProcessReply {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

const fn is_success(status: u16) -> bool {
    matches!(status, 200..=299)
}

/// Decode a `/process` reply.
///
/// An explicit `error` message wins over everything else, whatever the
/// status code (the service reports its own failures with 4xx/5xx plus a
/// message). Anything else that is not a success carrying an `image`
/// is a malformed reply.
///
/// # Errors
///
/// - [`SubmitError::Remote`] with the service's message verbatim.
/// - [`SubmitError::MalformedReply`] for non-JSON bodies, error statuses
///   without a message, or success replies without an image.
pub fn decode_process_reply(status: u16, body: &[u8]) -> Result<ProcessedImage, SubmitError> {
    let reply: ProcessReply = serde_json::from_slice(body).map_err(|e| {
        if is_success(status) {
            SubmitError::MalformedReply(format!("invalid JSON: {e}"))
        } else {
            SubmitError::MalformedReply(format!("HTTP {status}"))
        }
    })?;

    if let Some(message) = reply.error.filter(|m| !m.is_empty()) {
        return Err(SubmitError::Remote(message));
    }
    if !is_success(status) {
        return Err(SubmitError::MalformedReply(format!("HTTP {status}")));
    }
    reply
        .image
        .filter(|image| !image.is_empty())
        .map(ProcessedImage::new)
        .ok_or_else(|| SubmitError::MalformedReply("reply has neither image nor error".into()))
}

/// Decode a `/download` reply.
///
/// # Errors
///
/// Returns [`SubmitError::DownloadFailed`] for any non-success status.
/// The body is not inspected in that case.
pub fn decode_download_reply(status: u16, body: Vec<u8>) -> Result<Vec<u8>, SubmitError> {
    if is_success(status) {
        Ok(body)
    } else {
        Err(SubmitError::DownloadFailed { status })
    }
}
