use std::rc::Rc;

use dioxus::prelude::*;
use inscribe_core::protocol::DOWNLOAD_MIME;
use inscribe_core::{
    ClientConfig, FileCandidate, OverlayOptions, PendingRequest, Phase, Session, SessionError,
    submit_download, submit_process,
};
use inscribe_io::{
    BlobUrl, BusyOverlay, FetchTransport, FileUpload, NoticeBanner, OverlayControls, PreviewPanel,
    download,
};
use wasm_bindgen::JsValue;

fn main() {
    dioxus::launch(app);
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Root application component.
///
/// Owns the [`Session`] for the lifetime of the view and wires the
/// upload zone, overlay controls, previews, busy overlay, and notice
/// dialog to its transitions. Requests run in spawned tasks and report
/// back through `finish_*`.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let config = use_hook(ClientConfig::default);
    let transport = use_hook(|| Rc::new(FetchTransport::new(config.clone())));
    let mut session = use_signal(|| Session::new(&config));
    let mut options = use_signal(OverlayOptions::default);
    let mut original = use_signal(|| Option::<BlobUrl>::None);
    let mut notice = use_signal(|| Option::<String>::None);

    // --- File selection ---
    // The Blob preview is created synchronously here, before any request
    // can be started for the new file.
    let on_select = move |candidate: FileCandidate| {
        let mut state = session.write();
        match state.select(candidate) {
            Ok(file) => {
                match BlobUrl::new(file.bytes(), file.mime()) {
                    Ok(url) => original.set(Some(url)),
                    Err(e) => {
                        warn(&format!("failed to create preview for {}: {e}", file.name()));
                        original.set(None);
                    }
                }
                notice.set(None);
            }
            Err(e) => notice.set(Some(e.to_string())),
        }
    };

    let on_reject = move |e: SessionError| {
        notice.set(Some(e.to_string()));
    };

    // --- Process / regenerate ---
    let process_transport = Rc::clone(&transport);
    let on_process = move |()| {
        let started = session.write().begin_process(options());
        let PendingRequest { ticket, submission } = match started {
            Ok(pending) => pending,
            Err(e) => {
                notice.set(Some(e.to_string()));
                return;
            }
        };
        let transport = Rc::clone(&process_transport);
        spawn(async move {
            let outcome = submit_process(&*transport, &submission).await;
            let applied = session.write().finish_process(ticket, outcome).map(|_| ());
            match applied {
                Ok(()) => {}
                Err(SessionError::Stale) => {
                    warn("dropped a processed image for a replaced file");
                }
                Err(e @ SessionError::UnknownTicket { .. }) => warn(&e.to_string()),
                Err(e) => {
                    warn(&e.to_string());
                    notice.set(Some(e.to_string()));
                }
            }
        });
    };

    // --- Download ---
    let download_transport = Rc::clone(&transport);
    let download_name = config.download_filename.clone();
    let on_download = move |()| {
        let started = session.write().begin_download(options());
        let PendingRequest { ticket, submission } = match started {
            Ok(pending) => pending,
            Err(e) => {
                notice.set(Some(e.to_string()));
                return;
            }
        };
        let transport = Rc::clone(&download_transport);
        let filename = download_name.clone();
        spawn(async move {
            let outcome = submit_download(&*transport, &submission).await;
            let finished = session.write().finish_download(ticket, outcome);
            let saved =
                finished.map(|bytes| download::trigger_download(&bytes, &filename, DOWNLOAD_MIME));
            match saved {
                Ok(Ok(())) => {}
                Ok(Err(e)) => notice.set(Some(format!("Error downloading image: {e}"))),
                Err(e @ SessionError::UnknownTicket { .. }) => warn(&e.to_string()),
                Err(e) => {
                    warn(&e.to_string());
                    notice.set(Some(e.to_string()));
                }
            }
        });
    };

    // --- Derived view state ---
    let state = session.read();
    let phase = state.phase();
    let in_flight = state.in_flight();
    let file_name = state.file().map(|f| f.name().to_owned());
    let processed = state.result().map(|r| r.as_str().to_owned());
    drop(state);
    let original_src = original.read().as_ref().map(|url| url.as_str().to_owned());

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/inscribe.css") }

        div { class: "app",
            header { class: "app__header",
                h1 { class: "app__title", "inscribe" }
                p { class: "app__subtitle",
                    "Put a greeting on your photo, preview it, and download the result"
                }
            }

            main { class: "app__main",
                FileUpload {
                    on_select: on_select,
                    on_reject: on_reject,
                    current: file_name.clone(),
                }

                if phase != Phase::Idle {
                    OverlayControls {
                        options: options(),
                        phase: phase,
                        on_options_change: move |o: OverlayOptions| options.set(o),
                        on_process: on_process,
                        on_download: on_download,
                    }
                }

                if let (Some(src), Some(name)) = (original_src, file_name) {
                    PreviewPanel {
                        original: src,
                        file_name: name,
                        processed: processed,
                    }
                }
            }

            BusyOverlay { in_flight: in_flight }

            NoticeBanner {
                message: notice(),
                on_dismiss: move |()| notice.set(None),
            }
        }
    }
}
