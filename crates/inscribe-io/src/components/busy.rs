//! Full-screen busy indicator.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdLoader;

/// Props for the [`BusyOverlay`] component.
#[derive(Props, Clone, PartialEq)]
pub struct BusyOverlayProps {
    /// Number of requests in flight. Nothing is rendered at zero.
    in_flight: usize,
}

/// Dims the page while requests are in flight.
#[component]
pub fn BusyOverlay(props: BusyOverlayProps) -> Element {
    if props.in_flight == 0 {
        return rsx! {};
    }

    rsx! {
        div { class: "busy-overlay", role: "status", aria_live: "polite",
            div { class: "busy-overlay__spinner",
                Icon { width: 40, height: 40, icon: LdLoader }
            }
            p {
                if props.in_flight > 1 {
                    "Working on {props.in_flight} requests..."
                } else {
                    "Working..."
                }
            }
        }
    }
}
