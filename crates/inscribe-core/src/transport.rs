//! The seam between the workflow and the network.
//!
//! A [`Transport`] posts a [`Submission`] as a multipart form to one of
//! the two endpoints and hands back the raw status and body.
//! [`submit_process`] and [`submit_download`] layer the
//! [`protocol`](crate::protocol) decoding on top, so every transport
//! gets identical error semantics.

use std::future::Future;

use crate::protocol::{self, Endpoint, ProcessedImage};
use crate::submission::Submission;

/// Raw HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Reply {
    #[must_use]
    pub const fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }
}

/// The request could not be completed (network failure, browser API
/// failure, unreadable body).
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Why a submission did not produce a result.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The service rejected the request with its own message.
    #[error("{0}")]
    Remote(String),

    /// The request never produced a reply.
    #[error("network request failed: {0}")]
    Transport(#[from] TransportError),

    /// The reply could not be understood.
    #[error("unexpected response from server: {0}")]
    MalformedReply(String),

    /// `/download` answered with a non-success status.
    #[error("Download failed (HTTP {status})")]
    DownloadFailed { status: u16 },
}

impl SubmitError {
    /// `true` when the message came from the service itself rather than
    /// from the client or the network.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Posts submissions to the processing service.
///
/// Implementations perform exactly one request per call: no retries,
/// no cancellation, no client-side timeout.
pub trait Transport {
    /// Post `submission` to `endpoint` as a multipart form.
    fn post(
        &self,
        endpoint: Endpoint,
        submission: &Submission,
    ) -> impl Future<Output = Result<Reply, TransportError>>;
}

/// Submit to `/process` and decode the image reference.
///
/// # Errors
///
/// See [`protocol::decode_process_reply`]; transport failures map to
/// [`SubmitError::Transport`].
#[allow(clippy::future_not_send)] // browser transports are !Send
pub async fn submit_process<T: Transport>(
    transport: &T,
    submission: &Submission,
) -> Result<ProcessedImage, SubmitError> {
    let reply = transport.post(Endpoint::Process, submission).await?;
    protocol::decode_process_reply(reply.status, &reply.body)
}

/// Submit to `/download` and return the composite PNG bytes.
///
/// # Errors
///
/// See [`protocol::decode_download_reply`]; transport failures map to
/// [`SubmitError::Transport`].
#[allow(clippy::future_not_send)] // browser transports are !Send
pub async fn submit_download<T: Transport>(
    transport: &T,
    submission: &Submission,
) -> Result<Vec<u8>, SubmitError> {
    let reply = transport.post(Endpoint::Download, submission).await?;
    protocol::decode_download_reply(reply.status, reply.body)
}
