//! MIME type checks for selected files.
//!
//! Browsers report the declared type of a dropped or picked file, but
//! leave it empty when they do not recognise the extension. Native
//! callers have only a path. Both cases fall back to
//! [`from_file_name`].

/// File extensions recognised as images, with their MIME types.
const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("ico", "image/x-icon"),
    ("avif", "image/avif"),
];

/// Returns `true` if `mime` names an image type (`image/*`).
///
/// The comparison ignores ASCII case, since MIME types are
/// case-insensitive.
#[must_use]
pub fn is_image(mime: &str) -> bool {
    mime.get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Guess an image MIME type from a file name's extension.
///
/// Returns `None` for names without an extension or with an extension
/// that is not a known image format.
#[must_use]
pub fn from_file_name(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    IMAGE_EXTENSIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
}

/// Resolve the effective MIME type of a file.
///
/// A non-empty declared type wins; otherwise the type is inferred from
/// the file name.
#[must_use]
pub fn resolve(declared: Option<&str>, name: &str) -> Option<String> {
    match declared.map(str::trim) {
        Some(mime) if !mime.is_empty() => Some(mime.to_owned()),
        _ => from_file_name(name).map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_types_are_recognised() {
        assert!(is_image("image/png"));
        assert!(is_image("image/svg+xml"));
        assert!(is_image("IMAGE/JPEG"));
    }

    #[test]
    fn non_image_types_are_rejected() {
        assert!(!is_image("text/plain"));
        assert!(!is_image("application/pdf"));
        assert!(!is_image("image"));
        assert!(!is_image(""));
        // Prefix must be at the start.
        assert!(!is_image("x-image/png"));
    }

    #[test]
    fn extension_lookup_ignores_case() {
        assert_eq!(from_file_name("cake.PNG"), Some("image/png"));
        assert_eq!(from_file_name("party.JpEg"), Some("image/jpeg"));
    }

    #[test]
    fn extension_lookup_uses_last_dot() {
        assert_eq!(from_file_name("archive.tar.webp"), Some("image/webp"));
        assert_eq!(from_file_name("photo.png.txt"), None);
    }

    #[test]
    fn names_without_extension_have_no_type() {
        assert_eq!(from_file_name("README"), None);
        assert_eq!(from_file_name(""), None);
    }

    #[test]
    fn declared_type_wins_over_extension() {
        assert_eq!(
            resolve(Some("text/plain"), "cake.png").as_deref(),
            Some("text/plain")
        );
    }

    #[test]
    fn empty_declared_type_falls_back_to_extension() {
        assert_eq!(resolve(Some(""), "cake.gif").as_deref(), Some("image/gif"));
        assert_eq!(resolve(None, "cake.bmp").as_deref(), Some("image/bmp"));
        assert_eq!(resolve(Some("  "), "notes"), None);
    }
}
