//! Saving the composite returned by `/download`.
//!
//! The browser only offers a save dialog for navigations, so the bytes
//! are exposed through a [`BlobUrl`] and a detached `<a download>` is
//! clicked on the caller's behalf. Browser-only.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

use crate::preview::{BlobUrl, PreviewError};

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error(transparent)]
    Blob(#[from] PreviewError),

    #[error("cannot save {filename}: {reason}")]
    Dom { filename: String, reason: String },
}

/// Ask the browser to save `data` as `filename`.
///
/// # Errors
///
/// [`DownloadError::Blob`] if the object URL cannot be created, or
/// [`DownloadError::Dom`] if the document has no body or the anchor
/// cannot be inserted.
pub fn trigger_download(data: &[u8], filename: &str, mime_type: &str) -> Result<(), DownloadError> {
    let dom = |reason: String| DownloadError::Dom {
        filename: filename.to_owned(),
        reason,
    };
    let js = |value: JsValue| dom(format!("{value:?}"));

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| dom("no document".into()))?;
    let body = document.body().ok_or_else(|| dom("no body".into()))?;

    let url = BlobUrl::new(data, mime_type)?;
    let anchor = document
        .create_element("a")
        .map_err(js)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| dom("<a> is not an HtmlAnchorElement".into()))?;
    anchor.set_href(url.as_str());
    anchor.set_download(filename);

    body.append_child(&anchor).map_err(js)?;
    anchor.click();
    // Saving has started; the anchor is no longer needed. `url` is
    // revoked on drop.
    let _ = body.remove_child(&anchor);

    Ok(())
}
