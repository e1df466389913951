//! `data:` URI parsing for processed previews.
//!
//! The browser displays the reference returned by `/process` directly;
//! native callers need the bytes behind it.

use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// MIME type implied by a `data:` URI with an empty media type.
const DEFAULT_MIME: &str = "text/plain";

/// Errors from parsing a `data:` URI.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DataUriError {
    /// The string does not start with `data:`.
    #[error("not a data URI")]
    MissingScheme,

    /// No `,` separates the header from the payload.
    #[error("data URI has no payload separator")]
    MissingPayload,

    /// Only base64-encoded payloads are supported.
    #[error("data URI payload is not base64-encoded")]
    NotBase64,

    /// The payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Decode(String),
}

/// A decoded `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime: String,
    bytes: Vec<u8>,
}

impl DataUri {
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl FromStr for DataUri {
    type Err = DataUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .get(..5)
            .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
            .map(|_| &s[5..])
            .ok_or(DataUriError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::MissingPayload)?;

        let mut params = header.split(';');
        let mime = params.next().unwrap_or_default().trim();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(DataUriError::NotBase64);
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| DataUriError::Decode(e.to_string()))?;

        Ok(Self {
            mime: if mime.is_empty() {
                DEFAULT_MIME.to_owned()
            } else {
                mime.to_owned()
            },
            bytes,
        })
    }
}
