//! inscribe-core: Pure upload/process/download workflow (sans-IO).
//!
//! Models the client side of the greeting-image service:
//! select an image -> submit it with overlay text -> show the composite
//! returned by `/process` -> save the composite returned by `/download`.
//!
//! This crate has **no I/O dependencies**. The [`Session`] state machine
//! decides what may happen next, the [`protocol`] module encodes and
//! decodes the wire format, and the [`Transport`] trait is the seam
//! where `inscribe-io` (browser `fetch`) and `inscribe-cli` (`reqwest`)
//! plug in the actual network call.

pub mod config;
pub mod data_uri;
pub mod mime;
pub mod protocol;
pub mod session;
pub mod submission;
pub mod transport;

pub use config::ClientConfig;
pub use data_uri::{DataUri, DataUriError};
pub use protocol::{Endpoint, ProcessedImage};
pub use session::{Phase, PendingRequest, Session, SessionError, Ticket};
pub use submission::{FileCandidate, OverlayOptions, SelectedFile, Submission};
pub use transport::{Reply, SubmitError, Transport, TransportError, submit_download, submit_process};
