//! Content-type catalogue: canonical extensions, sniffing from URL paths,
//! and which formats must be transcoded before they are web-safe.

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const JPEG: &str = "image/jpeg";

/// `(content type, canonical extension)`. The first row for a type wins
/// when mapping type → extension; every row is consulted for extension →
/// type.
const CATALOGUE: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpeg", "jpeg"),
    ("image/jpg", "jpg"),
    ("image/pjpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/heic", "heic"),
    ("image/heif", "heif"),
    ("image/heic-sequence", "heics"),
    ("image/heif-sequence", "heifs"),
    ("image/avif", "avif"),
    ("image/bmp", "bmp"),
    ("image/tiff", "tiff"),
    ("image/svg+xml", "svg"),
    ("video/mp4", "mp4"),
    ("video/quicktime", "mov"),
    ("video/webm", "webm"),
    ("video/x-m4v", "m4v"),
    ("audio/mpeg", "mp3"),
    ("audio/mp4", "m4a"),
];

/// Formats browsers cannot be relied on to display.
pub(crate) const NEEDS_TRANSCODE: &[&str] = &[
    "image/heic",
    "image/heif",
    "image/heic-sequence",
    "image/heif-sequence",
    "image/avif",
];

/// Lower-cases a `Content-Type` header value and drops parameters
/// (`image/JPEG; charset=binary` → `image/jpeg`). Blank input becomes
/// [`OCTET_STREAM`].
#[must_use]
pub fn normalize_content_type(raw: &str) -> String {
    let essence = raw.split(';').next().unwrap_or_default().trim();
    if essence.is_empty() {
        OCTET_STREAM.to_owned()
    } else {
        essence.to_ascii_lowercase()
    }
}

/// Canonical file extension (without the dot) for a content type.
#[must_use]
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    CATALOGUE
        .iter()
        .find(|(ct, _)| *ct == content_type)
        .map(|(_, ext)| *ext)
}

/// Content type for a file extension, case-insensitively.
#[must_use]
pub fn content_type_for_extension(ext: &str) -> Option<&'static str> {
    CATALOGUE
        .iter()
        .find(|(_, e)| e.eq_ignore_ascii_case(ext))
        .map(|(ct, _)| *ct)
}

#[must_use]
pub fn needs_transcode(content_type: &str) -> bool {
    NEEDS_TRANSCODE.contains(&content_type)
}

/// Resolves the content type of a fetched asset. A specific header wins;
/// a missing or generic (`application/octet-stream`, `binary/octet-stream`)
/// header falls back to the URL's extension.
#[must_use]
pub fn detect_content_type(header: Option<&str>, url_extension: Option<&str>) -> String {
    let declared = header.map_or_else(|| OCTET_STREAM.to_owned(), normalize_content_type);
    let generic = declared == OCTET_STREAM || declared == "binary/octet-stream";
    if generic {
        if let Some(sniffed) = url_extension.and_then(content_type_for_extension) {
            return sniffed.to_owned();
        }
    }
    declared
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_parameters_and_case_are_dropped() {
        assert_eq!(normalize_content_type("image/JPEG; charset=binary"), "image/jpeg");
        assert_eq!(normalize_content_type("  "), OCTET_STREAM);
    }

    #[test]
    fn canonical_extensions() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/heic"), Some("heic"));
        assert_eq!(extension_for("video/quicktime"), Some("mov"));
        assert_eq!(extension_for("application/x-unknown"), None);
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(content_type_for_extension("JPEG"), Some("image/jpeg"));
        assert_eq!(content_type_for_extension("HEIC"), Some("image/heic"));
        assert_eq!(content_type_for_extension("exe"), None);
    }

    #[test]
    fn only_heif_family_and_avif_need_transcoding() {
        assert!(needs_transcode("image/heic"));
        assert!(needs_transcode("image/heif"));
        assert!(needs_transcode("image/avif"));
        assert!(!needs_transcode("image/jpeg"));
        assert!(!needs_transcode("image/webp"));
        assert!(!needs_transcode("video/mp4"));
    }

    #[test]
    fn generic_header_defers_to_url_extension() {
        assert_eq!(detect_content_type(Some(OCTET_STREAM), Some("heic")), "image/heic");
        assert_eq!(detect_content_type(None, Some("mp4")), "video/mp4");
        assert_eq!(detect_content_type(Some("image/png"), Some("jpg")), "image/png");
        assert_eq!(detect_content_type(None, None), OCTET_STREAM);
    }
}
