//! inscribe-io: Browser I/O and Dioxus component library.
//!
//! Posts submissions with `fetch`, turns selected files into Blob
//! preview URLs, saves downloaded composites through a temporary
//! `<a download>` element, and provides the UI components of the
//! inscribe web application.

pub mod components;
pub mod download;
pub mod fetch;
pub mod preview;

pub use components::{BusyOverlay, FileUpload, NoticeBanner, OverlayControls, PreviewPanel};
pub use fetch::FetchTransport;
pub use preview::BlobUrl;
