//! Dioxus UI components for inscribe.
//!
//! Provides the drop zone, the overlay controls, the side-by-side
//! original/processed preview, the busy overlay, and the blocking
//! notice dialog.

mod busy;
mod controls;
mod notice;
mod preview;
mod upload;

pub use busy::BusyOverlay;
pub use controls::OverlayControls;
pub use notice::NoticeBanner;
pub use preview::PreviewPanel;
pub use upload::FileUpload;
