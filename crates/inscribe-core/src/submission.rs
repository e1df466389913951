//! Selected file, overlay options, and the submission unit sent to both
//! endpoints.

use std::fmt;
use std::sync::Arc;

use crate::mime;
use crate::session::SessionError;

/// A file offered by the user before validation.
///
/// Produced by the drop zone, the file picker, or a CLI path argument.
#[derive(Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// File name as reported by the platform (no directory component).
    pub name: String,
    /// MIME type declared by the platform, if any. Browsers report an
    /// empty string for unknown types; that is treated as undeclared.
    pub declared_mime: Option<String>,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    #[must_use]
    pub fn new(name: impl Into<String>, declared_mime: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_mime,
            bytes,
        }
    }

    /// The MIME type this candidate would be submitted with.
    #[must_use]
    pub fn effective_mime(&self) -> Option<String> {
        mime::resolve(self.declared_mime.as_deref(), &self.name)
    }
}

impl fmt::Debug for FileCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCandidate")
            .field("name", &self.name)
            .field("declared_mime", &self.declared_mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A validated image file: non-empty, within the upload limit, and
/// carrying an `image/*` MIME type.
///
/// The payload is reference-counted so every in-flight submission can
/// hold the file it was started with, independent of later selections.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    /// Validate a candidate against the image and size rules.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotAnImage`] if no `image/*` type can be
    ///   determined.
    /// - [`SessionError::EmptyFile`] if the payload is empty.
    /// - [`SessionError::FileTooLarge`] if the payload exceeds
    ///   `max_bytes`.
    pub fn validate(candidate: FileCandidate, max_bytes: usize) -> Result<Self, SessionError> {
        let mime = match candidate.effective_mime() {
            Some(mime) if mime::is_image(&mime) => mime,
            _ => {
                return Err(SessionError::NotAnImage {
                    name: candidate.name,
                });
            }
        };
        if candidate.bytes.is_empty() {
            return Err(SessionError::EmptyFile {
                name: candidate.name,
            });
        }
        if candidate.bytes.len() > max_bytes {
            return Err(SessionError::FileTooLarge {
                name: candidate.name,
                size: candidate.bytes.len(),
                limit: max_bytes,
            });
        }
        Ok(Self {
            name: candidate.name,
            mime,
            bytes: candidate.bytes.into(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Text overlay settings, read from the form at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayOptions {
    /// Overlay string. May be empty.
    pub text: String,
    /// Lay the text out over two lines.
    pub double_line: bool,
}

impl OverlayOptions {
    /// Greeting pre-filled in the text field.
    pub const DEFAULT_TEXT: &'static str = "Happy Birthday";

    #[must_use]
    pub fn new(text: impl Into<String>, double_line: bool) -> Self {
        Self {
            text: text.into(),
            double_line,
        }
    }

    /// The double-line flag in its wire form (`"true"` / `"false"`).
    #[must_use]
    pub const fn double_line_field(&self) -> &'static str {
        if self.double_line { "true" } else { "false" }
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TEXT, true)
    }
}

/// One request's worth of input: the file plus the overlay options.
///
/// Identical for `/process` and `/download`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub file: SelectedFile,
    pub options: OverlayOptions,
}

impl Submission {
    #[must_use]
    pub const fn new(file: SelectedFile, options: OverlayOptions) -> Self {
        Self { file, options }
    }

    /// The non-file form fields, in submission order.
    #[must_use]
    pub fn text_fields(&self) -> [(&'static str, &str); 2] {
        [
            (crate::protocol::FIELD_TEXT, self.options.text.as_str()),
            (
                crate::protocol::FIELD_DOUBLE_LINE,
                self.options.double_line_field(),
            ),
        ]
    }
}
