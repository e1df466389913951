//! File upload component with drag-and-drop and file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use inscribe_core::{FileCandidate, SessionError, mime};

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Called with the first offered image after its bytes are read.
    on_select: EventHandler<FileCandidate>,
    /// Called when the first offered file is not an image.
    on_reject: EventHandler<SessionError>,
    /// Name of the currently selected file, if any.
    #[props(default)]
    current: Option<String>,
}

/// A drop zone that also opens the file picker when clicked.
///
/// Only the first file of a multi-file drop or selection is used; the
/// rest are ignored. Files that are not `image/*` are rejected before
/// their content is read.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut read_error = use_signal(|| Option::<String>::None);

    // Shared by the picker and drop paths.
    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.into_iter().next() else {
            return;
        };
        let name = file.name();
        let declared = file.content_type();
        if !mime::resolve(declared.as_deref(), &name).is_some_and(|m| mime::is_image(&m)) {
            props.on_reject.call(SessionError::NotAnImage { name });
            return;
        }
        match file.read_bytes().await {
            Ok(bytes) => {
                read_error.set(None);
                props
                    .on_select
                    .call(FileCandidate::new(name, declared, bytes.to_vec()));
            }
            Err(e) => {
                read_error.set(Some(format!("Failed to read {name}: {e}")));
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        evt.stop_propagation();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let zone_class = if dragging() {
        "drop-zone drop-zone--active"
    } else {
        "drop-zone"
    };

    rsx! {
        label {
            class: "{zone_class}",
            ondragenter: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |evt| {
                evt.prevent_default();
                dragging.set(false);
            },
            ondrop: handle_drop,

            input {
                r#type: "file",
                accept: "image/*",
                class: "hidden",
                onchange: handle_files,
            }

            Icon { width: 32, height: 32, icon: LdUpload }

            if let Some(ref name) = props.current {
                p { class: "drop-zone__current", "Selected: {name}" }
            }

            if let Some(ref err) = read_error() {
                p { class: "text-error", "{err}" }
            }

            p { class: "drop-zone__hint",
                "Drop an image here or click to choose one"
            }
        }
    }
}
