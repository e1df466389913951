//! Overlay text, double-line toggle, and the action buttons.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdRefreshCw, LdSparkles};
use inscribe_core::{OverlayOptions, Phase};

/// Props for the [`OverlayControls`] component.
#[derive(Props, Clone, PartialEq)]
pub struct OverlayControlsProps {
    /// Current form values.
    options: OverlayOptions,
    /// Current workflow phase (decides which buttons are offered).
    phase: Phase,
    /// Fired on every edit of the text or the toggle.
    on_options_change: EventHandler<OverlayOptions>,
    /// Fired by the Process and Regenerate buttons.
    on_process: EventHandler<()>,
    /// Fired by the Download button.
    on_download: EventHandler<()>,
}

/// Form controls for the overlay and the workflow actions.
///
/// - **Process** while no processed result is shown
/// - **Regenerate** + **Download** once a result is shown
///
/// Buttons stay clickable while requests are in flight; the busy
/// overlay is the only guard against overlapping submissions.
#[component]
pub fn OverlayControls(props: OverlayControlsProps) -> Element {
    let options = props.options.clone();
    let on_change = props.on_options_change;
    let has_result = props.phase == Phase::ResultReady;

    let text_options = options.clone();
    let toggle_options = options.clone();

    rsx! {
        div { class: "controls",
            div { class: "field",
                label { r#for: "overlay_text", class: "field__label", "Text" }
                input {
                    id: "overlay_text",
                    r#type: "text",
                    class: "field__input",
                    value: "{options.text}",
                    placeholder: OverlayOptions::DEFAULT_TEXT,
                    oninput: move |e| {
                        on_change.call(OverlayOptions {
                            text: e.value(),
                            ..text_options.clone()
                        });
                    },
                }
            }

            div { class: "field field--inline",
                input {
                    id: "double_line",
                    r#type: "checkbox",
                    checked: options.double_line,
                    onchange: move |e| {
                        on_change.call(OverlayOptions {
                            double_line: e.checked(),
                            ..toggle_options.clone()
                        });
                    },
                }
                label { r#for: "double_line", "Split text over two lines" }
            }

            div { class: "actions",
                if has_result {
                    button {
                        class: "btn btn--secondary",
                        onclick: move |_| props.on_process.call(()),
                        Icon { width: 16, height: 16, icon: LdRefreshCw }
                        "Regenerate"
                    }
                    button {
                        class: "btn btn--primary",
                        onclick: move |_| props.on_download.call(()),
                        Icon { width: 16, height: 16, icon: LdDownload }
                        "Download"
                    }
                } else {
                    button {
                        class: "btn btn--primary",
                        title: "Add the text to your image",
                        onclick: move |_| props.on_process.call(()),
                        Icon { width: 16, height: 16, icon: LdSparkles }
                        "Process"
                    }
                }
            }
        }
    }
}
