//! Blocking notice dialog for validation and request errors.

use dioxus::prelude::*;

/// Props for the [`NoticeBanner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct NoticeBannerProps {
    /// Message to show; nothing is rendered for `None`.
    message: Option<String>,
    /// Fired when the user acknowledges the notice.
    on_dismiss: EventHandler<()>,
}

/// Modal notice that must be acknowledged before continuing.
#[component]
pub fn NoticeBanner(props: NoticeBannerProps) -> Element {
    let Some(message) = props.message else {
        return rsx! {};
    };

    rsx! {
        div { class: "notice-backdrop",
            div {
                class: "notice",
                role: "alertdialog",
                aria_modal: "true",
                aria_describedby: "notice_message",
                p { id: "notice_message", class: "notice__message", "{message}" }
                button {
                    class: "btn btn--primary",
                    autofocus: true,
                    onclick: move |_| props.on_dismiss.call(()),
                    "OK"
                }
            }
        }
    }
}
