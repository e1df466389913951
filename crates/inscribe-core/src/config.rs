//! Endpoint configuration shared by the browser app and the CLI.

use serde::{Deserialize, Serialize};

use crate::protocol::Endpoint;

/// Where the processing service lives and how results are saved.
///
/// All fields have defaults matching the service's own routes, so a
/// partially specified JSON document (e.g. only `base_url`) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme + host (+ optional path prefix) of the service.
    ///
    /// Empty means "same origin", which is what the browser app uses
    /// when it is served by the processing service itself.
    pub base_url: String,

    /// Route of the preview endpoint.
    pub process_path: String,

    /// Route of the download endpoint.
    pub download_path: String,

    /// File name offered to the user when saving the composite.
    pub download_filename: String,

    /// Largest accepted image payload in bytes.
    ///
    /// Matches the service's request size cap so oversized files are
    /// rejected before upload instead of failing server-side.
    pub max_upload_bytes: usize,
}

impl ClientConfig {
    /// Default route of the preview endpoint.
    pub const DEFAULT_PROCESS_PATH: &'static str = "/process";
    /// Default route of the download endpoint.
    pub const DEFAULT_DOWNLOAD_PATH: &'static str = "/download";
    /// Default save-as file name for the composite.
    pub const DEFAULT_DOWNLOAD_FILENAME: &'static str = "birthday_image.png";
    /// Default upload cap (16 MiB).
    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

    /// A same-origin config with the default routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as the default config but pointed at `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL (or same-origin path) of `endpoint`.
    ///
    /// Exactly one `/` separates the base URL from the route, whatever
    /// the trailing/leading slashes on either side.
    #[must_use]
    pub fn url_for(&self, endpoint: Endpoint) -> String {
        let path = match endpoint {
            Endpoint::Process => &self.process_path,
            Endpoint::Download => &self.download_path,
        };
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            process_path: Self::DEFAULT_PROCESS_PATH.to_owned(),
            download_path: Self::DEFAULT_DOWNLOAD_PATH.to_owned(),
            download_filename: Self::DEFAULT_DOWNLOAD_FILENAME.to_owned(),
            max_upload_bytes: Self::DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
