//! The upload/preview/download state machine.
//!
//! A [`Session`] holds the currently selected file, the latest processed
//! result, and the bookkeeping for requests in flight. It performs no
//! I/O: callers start a request with [`Session::begin_process`] or
//! [`Session::begin_download`], run the returned [`Submission`] through
//! a [`Transport`](crate::Transport), and feed the outcome back with
//! the matching `finish_*` method.
//!
//! ```text
//!          select                process              ok
//!   Idle ─────────▶ FileSelected ───────▶ Processing ─────▶ ResultReady
//!                       ▲  ▲                 │                  │
//!                       │  └──── error ──────┘                  │
//!                       │                     ◀─── regenerate ──┘
//!                       └──────── select (from any state) ───────┘
//! ```
//!
//! Requests are never cancelled and may overlap. Each one carries the
//! file generation it was started with; a `/process` reply for a file
//! that has since been replaced is dropped instead of overwriting the
//! current preview. Among replies for the same file the last to complete
//! wins. Only requests for the current file hold the phase in
//! [`Phase::Processing`]; every outstanding request counts as busy.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::ClientConfig;
use crate::protocol::{Endpoint, ProcessedImage};
use crate::submission::{FileCandidate, OverlayOptions, SelectedFile, Submission};
use crate::transport::SubmitError;

/// Observable state of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No file selected yet.
    Idle,
    /// A file is selected and previewed locally; no processed result.
    FileSelected,
    /// At least one `/process` request for the current file is in flight.
    Processing,
    /// The processed preview is shown.
    ResultReady,
}

impl Phase {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::FileSelected => "File selected",
            Self::Processing => "Processing",
            Self::ResultReady => "Result ready",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-visible outcome of a rejected or failed action.
///
/// Every variant leaves the session usable; the user may retry.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// The selected file is not an image.
    #[error("Please upload an image file ({name} is not an image)")]
    NotAnImage { name: String },

    /// The selected file has no content.
    #[error("{name} is empty")]
    EmptyFile { name: String },

    /// The selected file exceeds the upload limit.
    #[error("{name} is too large ({size} bytes; the limit is {limit} bytes)")]
    FileTooLarge {
        name: String,
        size: usize,
        limit: usize,
    },

    /// Process was requested with no file selected.
    #[error("Please select an image first")]
    NoFile,

    /// Download was requested with no file selected.
    #[error("Please process an image first")]
    NothingToDownload,

    /// `/process` failed.
    #[error("Error processing image: {0}")]
    Process(SubmitError),

    /// `/download` failed.
    #[error("Error downloading image: {0}")]
    Download(SubmitError),

    /// A `/process` reply arrived for a file that has since been replaced.
    #[error("discarded a result for a previously selected image")]
    Stale,

    /// The ticket is not in flight: it was never issued by this session
    /// or has already been finished.
    #[error("ignored a reply for request {id}, which is not in flight")]
    UnknownTicket { id: u64 },
}

impl SessionError {
    /// `true` for errors raised before any request was made.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NotAnImage { .. }
                | Self::EmptyFile { .. }
                | Self::FileTooLarge { .. }
                | Self::NoFile
                | Self::NothingToDownload
        )
    }
}

/// Identifies one in-flight request.
///
/// Must be passed back to the `finish_*` method matching the endpoint
/// it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    id: u64,
    generation: u64,
    endpoint: Endpoint,
}

impl Ticket {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.id
    }

    /// File generation the request was started with.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn endpoint(self) -> Endpoint {
        self.endpoint
    }
}

/// A started request: what to send, and the ticket to finish it with.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub submission: Submission,
}

/// Interaction state for one mounted view.
#[derive(Debug, Clone)]
pub struct Session {
    max_upload_bytes: usize,
    file: Option<SelectedFile>,
    generation: u64,
    result: Option<ProcessedImage>,
    last_submitted: Option<OverlayOptions>,
    /// Every request in flight, keyed by ticket id.
    outstanding: BTreeMap<u64, Ticket>,
    /// `/process` requests in flight for the current file only.
    processing_current: usize,
    next_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl Session {
    /// An idle session enforcing `config`'s upload limit.
    #[must_use]
    pub const fn new(config: &ClientConfig) -> Self {
        Self {
            max_upload_bytes: config.max_upload_bytes,
            file: None,
            generation: 0,
            result: None,
            last_submitted: None,
            outstanding: BTreeMap::new(),
            processing_current: 0,
            next_ticket: 0,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.file.is_none() {
            Phase::Idle
        } else if self.processing_current > 0 {
            Phase::Processing
        } else if self.result.is_some() {
            Phase::ResultReady
        } else {
            Phase::FileSelected
        }
    }

    /// `true` while any request, process or download, is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.outstanding.is_empty()
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.outstanding.len()
    }

    #[must_use]
    pub const fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    #[must_use]
    pub const fn result(&self) -> Option<&ProcessedImage> {
        self.result.as_ref()
    }

    /// Options sent with the most recent `/process` request for the
    /// current file.
    #[must_use]
    pub const fn last_submitted(&self) -> Option<&OverlayOptions> {
        self.last_submitted.as_ref()
    }

    /// Bumped on every successful selection.
    #[must_use]
    pub const fn file_generation(&self) -> u64 {
        self.generation
    }

    /// Select a file, replacing the current one and discarding any result.
    ///
    /// # Errors
    ///
    /// Returns a validation [`SessionError`] if the candidate is not an
    /// acceptable image. The session is left untouched in that case.
    pub fn select(&mut self, candidate: FileCandidate) -> Result<&SelectedFile, SessionError> {
        let file = SelectedFile::validate(candidate, self.max_upload_bytes)?;
        self.generation += 1;
        self.result = None;
        self.last_submitted = None;
        // Requests for the previous file stay outstanding (busy) but no
        // longer hold the phase in `Processing`.
        self.processing_current = 0;
        Ok(&*self.file.insert(file))
    }

    /// Select the first of several candidates; the rest are ignored.
    ///
    /// Returns `Ok(None)` when `candidates` is empty.
    ///
    /// # Errors
    ///
    /// Same as [`select`](Self::select), for the first candidate.
    pub fn select_first<I>(&mut self, candidates: I) -> Result<Option<&SelectedFile>, SessionError>
    where
        I: IntoIterator<Item = FileCandidate>,
    {
        match candidates.into_iter().next() {
            Some(candidate) => self.select(candidate).map(Some),
            None => Ok(None),
        }
    }

    /// Start a `/process` request for the current file with `options`.
    ///
    /// Also used for regenerate: nothing prevents starting a new request
    /// while earlier ones are still in flight.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoFile`] if no file is selected.
    pub fn begin_process(
        &mut self,
        options: OverlayOptions,
    ) -> Result<PendingRequest, SessionError> {
        let file = self.file.clone().ok_or(SessionError::NoFile)?;
        self.last_submitted = Some(options.clone());
        self.processing_current += 1;
        Ok(self.issue(Endpoint::Process, Submission::new(file, options)))
    }

    /// Apply the outcome of a `/process` request.
    ///
    /// On success the result replaces any previous one. On failure the
    /// result is cleared and the session falls back to
    /// [`Phase::FileSelected`]; the file stays selected.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Process`] wrapping the submission failure.
    /// - [`SessionError::Stale`] if the file was replaced after the
    ///   request started; the outcome is discarded.
    /// - [`SessionError::UnknownTicket`] if `ticket` is not in flight;
    ///   nothing changes.
    pub fn finish_process(
        &mut self,
        ticket: Ticket,
        outcome: Result<ProcessedImage, SubmitError>,
    ) -> Result<&ProcessedImage, SessionError> {
        debug_assert_eq!(ticket.endpoint, Endpoint::Process);
        self.retire(ticket)?;

        if ticket.generation != self.generation {
            return Err(SessionError::Stale);
        }
        self.processing_current = self.processing_current.saturating_sub(1);

        match outcome {
            Ok(image) => Ok(&*self.result.insert(image)),
            Err(e) => {
                self.result = None;
                Err(SessionError::Process(e))
            }
        }
    }

    /// Start a `/download` request for the current file.
    ///
    /// Sends the options of the last `/process` request for this file,
    /// so the saved composite matches the preview on screen. `current`
    /// is used only when the file has not been processed yet.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NothingToDownload`] if no file is selected.
    pub fn begin_download(
        &mut self,
        current: OverlayOptions,
    ) -> Result<PendingRequest, SessionError> {
        let file = self.file.clone().ok_or(SessionError::NothingToDownload)?;
        let options = self.last_submitted.clone().unwrap_or(current);
        Ok(self.issue(Endpoint::Download, Submission::new(file, options)))
    }

    /// Apply the outcome of a `/download` request.
    ///
    /// The bytes are returned even if the file was replaced meanwhile:
    /// the user asked for that composite.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Download`] wrapping the submission failure.
    /// - [`SessionError::UnknownTicket`] if `ticket` is not in flight.
    pub fn finish_download(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<u8>, SubmitError>,
    ) -> Result<Vec<u8>, SessionError> {
        debug_assert_eq!(ticket.endpoint, Endpoint::Download);
        self.retire(ticket)?;
        outcome.map_err(SessionError::Download)
    }

    fn issue(&mut self, endpoint: Endpoint, submission: Submission) -> PendingRequest {
        self.next_ticket += 1;
        let ticket = Ticket {
            id: self.next_ticket,
            generation: self.generation,
            endpoint,
        };
        self.outstanding.insert(ticket.id, ticket);
        PendingRequest { ticket, submission }
    }

    /// Remove `ticket` from the in-flight set.
    fn retire(&mut self, ticket: Ticket) -> Result<(), SessionError> {
        match self.outstanding.remove(&ticket.id) {
            Some(issued) if issued == ticket => Ok(()),
            Some(issued) => {
                // Same id, different ticket: keep the real one in flight.
                self.outstanding.insert(issued.id, issued);
                Err(SessionError::UnknownTicket { id: ticket.id })
            }
            None => Err(SessionError::UnknownTicket { id: ticket.id }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::transport::TransportError;

    fn image(name: &str) -> FileCandidate {
        FileCandidate::new(name, Some("image/png".into()), name.as_bytes().to_vec())
    }

    fn text_file() -> FileCandidate {
        FileCandidate::new("notes.txt", Some("text/plain".into()), b"hello".to_vec())
    }

    fn processed(tag: &str) -> ProcessedImage {
        ProcessedImage::new(format!("data:image/png;base64,{tag}"))
    }

    #[test]
    fn new_session_is_idle() {
        let session = Session::default();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.is_busy());
        assert!(session.file().is_none());
    }

    #[test]
    fn selecting_an_image_enters_file_selected() {
        let mut session = Session::default();
        let file = session.select(image("cake.png")).unwrap();
        assert_eq!(file.name(), "cake.png");
        assert_eq!(session.phase(), Phase::FileSelected);
        assert_eq!(session.file_generation(), 1);
    }

    #[test]
    fn non_image_selection_leaves_state_unchanged() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let pending = session.begin_process(OverlayOptions::default()).unwrap();
        session
            .finish_process(pending.ticket, Ok(processed("A")))
            .unwrap();

        let err = session.select(text_file()).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Please upload an image file (notes.txt is not an image)"
        );
        assert_eq!(session.file().unwrap().name(), "cake.png");
        assert_eq!(session.phase(), Phase::ResultReady);
        assert_eq!(session.file_generation(), 1);
    }

    #[test]
    fn non_image_selection_from_idle_stays_idle() {
        let mut session = Session::default();
        assert!(session.select(text_file()).is_err());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn only_first_of_many_candidates_is_adopted() {
        let mut session = Session::default();
        let adopted = session
            .select_first(vec![image("first.png"), image("second.png")])
            .unwrap()
            .unwrap();
        assert_eq!(adopted.name(), "first.png");
        assert_eq!(session.file_generation(), 1);
    }

    #[test]
    fn first_candidate_decides_even_if_later_ones_are_valid() {
        let mut session = Session::default();
        assert!(
            session
                .select_first(vec![text_file(), image("cake.png")])
                .is_err()
        );
        assert!(session.file().is_none());
    }

    #[test]
    fn empty_candidate_list_is_a_no_op() {
        let mut session = Session::default();
        assert_eq!(session.select_first(Vec::new()).unwrap(), None);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn upload_limit_comes_from_config() {
        let config = ClientConfig {
            max_upload_bytes: 4,
            ..ClientConfig::default()
        };
        let mut session = Session::new(&config);
        let err = session
            .select(FileCandidate::new("big.png", None, vec![0; 5]))
            .unwrap_err();
        assert!(matches!(err, SessionError::FileTooLarge { limit: 4, .. }));
    }

    #[test]
    fn process_without_file_issues_nothing() {
        let mut session = Session::default();
        let err = session.begin_process(OverlayOptions::default()).unwrap_err();
        assert_eq!(err, SessionError::NoFile);
        assert_eq!(err.to_string(), "Please select an image first");
        assert!(!session.is_busy());
        assert!(session.last_submitted().is_none());
    }

    #[test]
    fn download_without_file_issues_nothing() {
        let mut session = Session::default();
        let err = session
            .begin_download(OverlayOptions::default())
            .unwrap_err();
        assert_eq!(err, SessionError::NothingToDownload);
        assert!(!session.is_busy());
    }

    #[test]
    fn successful_process_shows_exact_reference() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();

        let pending = session
            .begin_process(OverlayOptions::new("Happy Birthday", true))
            .unwrap();
        assert_eq!(session.phase(), Phase::Processing);
        assert!(session.is_busy());
        assert_eq!(pending.submission.file.name(), "cake.png");
        assert_eq!(pending.submission.options.text, "Happy Birthday");

        let shown = session
            .finish_process(pending.ticket, Ok(processed("iVBOR")))
            .unwrap();
        assert_eq!(shown.as_str(), "data:image/png;base64,iVBOR");
        assert_eq!(session.phase(), Phase::ResultReady);
        assert!(!session.is_busy());
    }

    #[test]
    fn remote_error_is_surfaced_and_file_stays_usable() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let pending = session.begin_process(OverlayOptions::default()).unwrap();

        let err = session
            .finish_process(pending.ticket, Err(SubmitError::Remote("X".into())))
            .unwrap_err();
        assert_eq!(err.to_string(), "Error processing image: X");
        assert!(session.result().is_none());
        assert_eq!(session.phase(), Phase::FileSelected);
        assert!(!session.is_busy());

        // Retry works.
        assert!(session.begin_process(OverlayOptions::default()).is_ok());
    }

    #[test]
    fn failed_regenerate_drops_previous_result() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let first = session.begin_process(OverlayOptions::default()).unwrap();
        session.finish_process(first.ticket, Ok(processed("A"))).unwrap();

        let again = session.begin_process(OverlayOptions::default()).unwrap();
        let outcome = Err(SubmitError::Transport(TransportError::new("offline")));
        assert!(session.finish_process(again.ticket, outcome).is_err());
        assert_eq!(session.phase(), Phase::FileSelected);
    }

    #[test]
    fn regenerate_replaces_result() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let first = session.begin_process(OverlayOptions::default()).unwrap();
        session.finish_process(first.ticket, Ok(processed("A"))).unwrap();

        let second = session
            .begin_process(OverlayOptions::new("Again", false))
            .unwrap();
        assert_eq!(session.phase(), Phase::Processing);
        session
            .finish_process(second.ticket, Ok(processed("B")))
            .unwrap();
        assert_eq!(session.result().unwrap(), &processed("B"));
        assert_eq!(session.last_submitted().unwrap().text, "Again");
    }

    #[test]
    fn selecting_new_file_discards_result() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let pending = session.begin_process(OverlayOptions::default()).unwrap();
        session
            .finish_process(pending.ticket, Ok(processed("A")))
            .unwrap();

        session.select(image("party.png")).unwrap();
        assert!(session.result().is_none());
        assert_eq!(session.phase(), Phase::FileSelected);
        assert_eq!(session.file_generation(), 2);
    }

    #[test]
    fn overlapping_requests_apply_in_completion_order() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let a = session.begin_process(OverlayOptions::new("A", true)).unwrap();
        let b = session.begin_process(OverlayOptions::new("B", true)).unwrap();
        assert_ne!(a.ticket.id(), b.ticket.id());
        assert_eq!(session.in_flight(), 2);

        // B completes first, then A: last completed wins.
        session.finish_process(b.ticket, Ok(processed("B"))).unwrap();
        assert_eq!(session.phase(), Phase::Processing);
        session.finish_process(a.ticket, Ok(processed("A"))).unwrap();

        assert_eq!(session.result().unwrap(), &processed("A"));
        assert_eq!(session.phase(), Phase::ResultReady);
        assert!(!session.is_busy());
    }

    #[test]
    fn reply_for_replaced_file_is_discarded() {
        let mut session = Session::default();
        session.select(image("old.png")).unwrap();
        let pending = session.begin_process(OverlayOptions::default()).unwrap();

        session.select(image("new.png")).unwrap();
        let err = session
            .finish_process(pending.ticket, Ok(processed("OLD")))
            .unwrap_err();
        assert_eq!(err, SessionError::Stale);
        assert!(session.result().is_none());
        assert_eq!(session.phase(), Phase::FileSelected);
        assert!(!session.is_busy());
    }

    #[test]
    fn in_flight_request_keeps_its_own_file() {
        let mut session = Session::default();
        session.select(image("old.png")).unwrap();
        let pending = session.begin_process(OverlayOptions::default()).unwrap();
        session.select(image("new.png")).unwrap();
        assert_eq!(pending.submission.file.name(), "old.png");
        assert_eq!(pending.ticket.generation(), 1);
    }

    #[test]
    fn download_reuses_last_submitted_options() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let options = OverlayOptions::new("Feliz cumple", false);
        let process = session.begin_process(options.clone()).unwrap();
        session
            .finish_process(process.ticket, Ok(processed("A")))
            .unwrap();

        // The text field was edited after processing; the download still
        // matches the preview.
        let download = session
            .begin_download(OverlayOptions::new("edited later", true))
            .unwrap();
        assert_eq!(download.ticket.endpoint(), Endpoint::Download);
        assert_eq!(download.submission.options, options);
        assert_eq!(
            download.submission.text_fields(),
            process.submission.text_fields()
        );
        // Download does not change the phase.
        assert_eq!(session.phase(), Phase::ResultReady);
        assert!(session.is_busy());

        let bytes = session
            .finish_download(download.ticket, Ok(b"\x89PNG".to_vec()))
            .unwrap();
        assert_eq!(bytes, b"\x89PNG");
        assert!(!session.is_busy());
    }

    #[test]
    fn download_before_processing_uses_current_options() {
        let mut session = Session::default();
        session.select(image("old.png")).unwrap();
        let process = session
            .begin_process(OverlayOptions::new("old text", true))
            .unwrap();
        session
            .finish_process(process.ticket, Ok(processed("A")))
            .unwrap();

        session.select(image("new.png")).unwrap();
        assert!(session.last_submitted().is_none());
        let current = OverlayOptions::new("new text", false);
        let download = session.begin_download(current.clone()).unwrap();
        assert_eq!(download.submission.options, current);
        assert_eq!(download.submission.file.name(), "new.png");
    }

    #[test]
    fn download_failure_keeps_result() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let process = session.begin_process(OverlayOptions::default()).unwrap();
        session
            .finish_process(process.ticket, Ok(processed("A")))
            .unwrap();

        let download = session.begin_download(OverlayOptions::default()).unwrap();
        let err = session
            .finish_download(
                download.ticket,
                Err(SubmitError::DownloadFailed { status: 500 }),
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error downloading image: Download failed (HTTP 500)"
        );
        assert_eq!(session.phase(), Phase::ResultReady);
    }

    #[test]
    fn busy_until_every_request_finishes() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let process = session.begin_process(OverlayOptions::default()).unwrap();
        let download = session.begin_download(OverlayOptions::default()).unwrap();

        session
            .finish_process(process.ticket, Ok(processed("A")))
            .unwrap();
        assert!(session.is_busy());
        let _ = session.finish_download(download.ticket, Ok(Vec::new()));
        assert!(!session.is_busy());
    }

    #[test]
    fn finishing_a_ticket_twice_is_ignored() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let first = session.begin_process(OverlayOptions::default()).unwrap();
        let second = session.begin_process(OverlayOptions::default()).unwrap();
        session
            .finish_process(first.ticket, Ok(processed("A")))
            .unwrap();

        let err = session
            .finish_process(first.ticket, Ok(processed("X")))
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::UnknownTicket {
                id: first.ticket.id()
            }
        );
        // The second request still holds the busy state and the phase.
        assert!(session.is_busy());
        assert_eq!(session.in_flight(), 1);
        assert_eq!(session.phase(), Phase::Processing);
        assert_eq!(session.result().unwrap(), &processed("A"));

        session
            .finish_process(second.ticket, Ok(processed("B")))
            .unwrap();
        assert!(!session.is_busy());
    }

    #[test]
    fn download_ticket_finished_twice_keeps_others_busy() {
        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let download = session.begin_download(OverlayOptions::default()).unwrap();
        let process = session.begin_process(OverlayOptions::default()).unwrap();

        session
            .finish_download(download.ticket, Ok(Vec::new()))
            .unwrap();
        assert!(matches!(
            session.finish_download(download.ticket, Ok(Vec::new())),
            Err(SessionError::UnknownTicket { .. })
        ));
        assert_eq!(session.in_flight(), 1);

        session
            .finish_process(process.ticket, Ok(processed("A")))
            .unwrap();
        assert!(!session.is_busy());
    }

    #[test]
    fn ticket_from_another_session_is_ignored() {
        let mut other = Session::default();
        other.select(image("cake.png")).unwrap();
        let foreign = other.begin_process(OverlayOptions::default()).unwrap();

        let mut session = Session::default();
        session.select(image("cake.png")).unwrap();
        let err = session
            .finish_process(foreign.ticket, Ok(processed("A")))
            .unwrap_err();
        assert!(matches!(err, SessionError::UnknownTicket { .. }));
        assert!(session.result().is_none());
    }

    #[test]
    fn replacing_file_leaves_processing_even_with_old_request_in_flight() {
        let mut session = Session::default();
        session.select(image("old.png")).unwrap();
        let old = session.begin_process(OverlayOptions::default()).unwrap();

        session.select(image("new.png")).unwrap();
        assert_eq!(session.phase(), Phase::FileSelected);
        // Still busy: the old request has not come back.
        assert!(session.is_busy());

        assert_eq!(
            session.finish_process(old.ticket, Ok(processed("OLD"))),
            Err(SessionError::Stale)
        );
        assert_eq!(session.phase(), Phase::FileSelected);
        assert!(!session.is_busy());
    }

    #[test]
    fn current_result_is_ready_while_old_request_is_pending() {
        let mut session = Session::default();
        session.select(image("old.png")).unwrap();
        let old = session.begin_process(OverlayOptions::default()).unwrap();

        session.select(image("new.png")).unwrap();
        let current = session.begin_process(OverlayOptions::default()).unwrap();
        assert_eq!(session.phase(), Phase::Processing);
        session
            .finish_process(current.ticket, Ok(processed("NEW")))
            .unwrap();
        assert_eq!(session.phase(), Phase::ResultReady);
        assert_eq!(session.in_flight(), 1);

        // The late reply for the old file changes nothing.
        assert!(session.finish_process(old.ticket, Ok(processed("OLD"))).is_err());
        assert_eq!(session.result().unwrap(), &processed("NEW"));
        assert_eq!(session.phase(), Phase::ResultReady);
        assert!(!session.is_busy());
    }
}
