//! inscribe-cli: drive the processing service from a terminal.
//!
//! Uses the same [`Session`] state machine and wire protocol as the
//! browser app, with a `reqwest` [`Transport`] in place of `fetch`.

use std::path::{Path, PathBuf};

use inscribe_core::protocol::FIELD_IMAGE;
use inscribe_core::{
    ClientConfig, DataUriError, Endpoint, FileCandidate, OverlayOptions, ProcessedImage, Reply,
    Session, SessionError, Submission, Transport, TransportError, submit_download, submit_process,
};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

/// Server used when neither `--server` nor `--config-json` is given.
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

/// File the `process` command writes the preview to by default.
pub const DEFAULT_PREVIEW_PATH: &str = "preview.png";

/// Errors surfaced by the command-line client.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading the input or writing the output failed.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The workflow rejected the action or the request failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// `/process` returned a reference that is not a data URI.
    #[error("cannot decode processed image: {0}")]
    DataUri(#[from] DataUriError),

    /// `--config-json` could not be parsed.
    #[error("invalid client config: {0}")]
    Config(#[from] serde_json::Error),
}

/// [`Transport`] over a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

fn transport_error(err: &reqwest::Error) -> TransportError {
    TransportError::new(err.to_string())
}

impl Transport for HttpTransport {
    async fn post(
        &self,
        endpoint: Endpoint,
        submission: &Submission,
    ) -> Result<Reply, TransportError> {
        let url = self.config.url_for(endpoint);
        let file = &submission.file;

        let image = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_owned())
            .mime_str(file.mime())
            .map_err(|e| transport_error(&e))?;
        let mut form = Form::new().part(FIELD_IMAGE, image);
        for (name, value) in submission.text_fields() {
            form = form.text(name, value.to_owned());
        }

        debug!(%url, file = file.name(), bytes = file.len(), "posting submission");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "request failed");
                transport_error(&e)
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| transport_error(&e))?;
        debug!(%url, status, bytes = body.len(), "reply received");

        Ok(Reply::new(status, body.to_vec()))
    }
}

/// A [`Session`] bound to an [`HttpTransport`].
#[derive(Debug)]
pub struct Client {
    session: Session,
    transport: HttpTransport,
}

impl Client {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            session: Session::new(&config),
            transport: HttpTransport::new(config),
        }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Select the image at `path`. The MIME type is inferred from the
    /// file extension.
    ///
    /// # Errors
    ///
    /// [`CliError::Io`] if the file cannot be read, or
    /// [`CliError::Session`] if it is not an acceptable image.
    pub async fn select_path(&mut self, path: &Path) -> Result<(), CliError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        let file = self.session.select(FileCandidate::new(name, None, bytes))?;
        info!(
            file = file.name(),
            mime = file.mime(),
            bytes = file.len(),
            "selected image"
        );
        Ok(())
    }

    /// Run `/process` for the selected image.
    ///
    /// # Errors
    ///
    /// [`CliError::Session`] if no image is selected or the request fails.
    pub async fn process(&mut self, options: OverlayOptions) -> Result<ProcessedImage, CliError> {
        let pending = self.session.begin_process(options)?;
        let outcome = submit_process(&self.transport, &pending.submission).await;
        let image = self.session.finish_process(pending.ticket, outcome)?;
        info!(bytes = image.as_str().len(), "processed image received");
        Ok(image.clone())
    }

    /// Run `/download` for the selected image.
    ///
    /// # Errors
    ///
    /// [`CliError::Session`] if no image is selected or the request fails.
    pub async fn download(&mut self, options: OverlayOptions) -> Result<Vec<u8>, CliError> {
        let pending = self.session.begin_download(options)?;
        let outcome = submit_download(&self.transport, &pending.submission).await;
        let bytes = self.session.finish_download(pending.ticket, outcome)?;
        info!(bytes = bytes.len(), "composite downloaded");
        Ok(bytes)
    }
}

/// What the command line asked for.
#[derive(Debug, Clone)]
pub enum Job {
    /// Process and write the preview image.
    Process { image: PathBuf, output: PathBuf },
    /// Optionally process, then download the composite.
    Download {
        image: PathBuf,
        output: Option<PathBuf>,
        skip_process: bool,
    },
}

/// Run `job` and return the path written.
///
/// # Errors
///
/// Any [`CliError`] from selection, the requests, decoding, or writing
/// the output.
pub async fn run(
    config: ClientConfig,
    options: OverlayOptions,
    job: Job,
) -> Result<PathBuf, CliError> {
    let mut client = Client::new(config);

    match job {
        Job::Process { image, output } => {
            client.select_path(&image).await?;
            let processed = client.process(options).await?;
            let bytes = processed.data_uri()?.into_bytes();
            write_output(&output, &bytes).await?;
            Ok(output)
        }
        Job::Download {
            image,
            output,
            skip_process,
        } => {
            client.select_path(&image).await?;
            if !skip_process {
                client.process(options.clone()).await?;
            }
            let bytes = client.download(options).await?;
            let output =
                output.unwrap_or_else(|| PathBuf::from(&client.config().download_filename));
            write_output(&output, &bytes).await?;
            Ok(output)
        }
    }
}

async fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    tokio::fs::write(path, bytes).await.map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(())
}
