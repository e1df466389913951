//! Side-by-side original and processed previews.

use dioxus::prelude::*;

/// Props for the [`PreviewPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PreviewPanelProps {
    /// Object URL of the selected file.
    original: String,
    /// Name of the selected file (used as alt text).
    file_name: String,
    /// Image reference returned by `/process`, used verbatim as `src`.
    #[props(default)]
    processed: Option<String>,
}

/// Shows the selected image and, once available, the processed one.
#[component]
pub fn PreviewPanel(props: PreviewPanelProps) -> Element {
    rsx! {
        div { class: if props.processed.is_some() { "previews previews--pair" } else { "previews" },
            figure { class: "preview",
                img {
                    id: "original_preview",
                    src: "{props.original}",
                    alt: "{props.file_name}",
                }
                figcaption { "Original" }
            }

            if let Some(ref processed) = props.processed {
                figure { class: "preview",
                    img {
                        id: "processed_preview",
                        src: "{processed}",
                        alt: "{props.file_name} with text",
                    }
                    figcaption { "With text" }
                }
            }
        }
    }
}
