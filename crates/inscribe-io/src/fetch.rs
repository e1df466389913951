//! [`Transport`] implementation on top of the browser `fetch` API.
//!
//! The submission is sent as `FormData`, so the browser sets the
//! multipart boundary and `Content-Type` header itself.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use inscribe_core::{ClientConfig, Endpoint, Reply, Submission, Transport, TransportError};
use inscribe_core::protocol::FIELD_IMAGE;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::BlobPropertyBag;

/// Posts submissions to the endpoints named by a [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct FetchTransport {
    config: ClientConfig,
}

impl FetchTransport {
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Transport for FetchTransport {
    async fn post(
        &self,
        endpoint: Endpoint,
        submission: &Submission,
    ) -> Result<Reply, TransportError> {
        let url = self.config.url_for(endpoint);
        let form = build_form(submission).map_err(js_error)?;

        let init = web_sys::RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);

        let window = web_sys::window().ok_or_else(|| TransportError::new("no global window"))?;

        // fetch() only rejects on network failure; HTTP error statuses
        // resolve normally and are classified by the protocol layer.
        let response = JsFuture::from(window.fetch_with_str_and_init(&url, &init))
            .await
            .map_err(|e| {
                let err = js_error(e);
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "POST {url} failed: {err}"
                )));
                err
            })?;
        let response: web_sys::Response = response
            .dyn_into()
            .map_err(|_| TransportError::new("fetch did not return a Response"))?;

        let status = response.status();
        let buffer = JsFuture::from(response.array_buffer().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        if !response.ok() {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "POST {url} returned HTTP {status}"
            )));
        }

        Ok(Reply::new(status, body))
    }
}

/// Build the multipart form: the image as a typed, named Blob followed
/// by the text fields.
fn build_form(submission: &Submission) -> Result<web_sys::FormData, JsValue> {
    let form = web_sys::FormData::new()?;

    let file = &submission.file;
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(file.bytes()));
    let opts = BlobPropertyBag::new();
    opts.set_type(file.mime());
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    form.append_with_blob_and_filename(FIELD_IMAGE, &blob, file.name())?;

    for (name, value) in submission.text_fields() {
        form.append_with_str(name, value)?;
    }

    Ok(form)
}

/// Convert a rejected promise or failed browser call into a
/// [`TransportError`], preferring the JS `Error` message when there is one.
fn js_error(value: JsValue) -> TransportError {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return TransportError::new(String::from(err.message()));
    }
    value
        .as_string()
        .map_or_else(|| TransportError::new(format!("{value:?}")), TransportError::new)
}
