//! Destination filename derivation.
//!
//! Precedence when the caller supplies no name: the content type's canonical
//! extension, then the source URL's own extension, then no extension at all,
//! always on a `media-{unix_millis}` stem. A supplied name is kept and only
//! gains an extension when it has none. After a transcode,
//! [`force_extension`] makes the extension match the new content type.

use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use reqwest::Url;

use crate::content_type::extension_for;

/// Picks the destination filename for an asset.
#[must_use]
pub fn derive_filename(
    supplied: Option<&str>,
    content_type: &str,
    source_url: &str,
    now: DateTime<Utc>,
) -> String {
    let canonical = extension_for(content_type);

    if let Some(name) = supplied.map(sanitize).filter(|n| !n.is_empty()) {
        return match (split_extension(&name).1, canonical) {
            (None, Some(ext)) => format!("{name}.{ext}"),
            _ => name,
        };
    }

    let stem = format!("media-{}", now.timestamp_millis());
    let ext = canonical
        .map(str::to_owned)
        .or_else(|| url_extension(source_url));
    match ext {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

/// Replaces (or adds) the extension of `filename`.
#[must_use]
pub fn force_extension(filename: &str, ext: &str) -> String {
    let (stem, _) = split_extension(filename);
    format!("{stem}.{ext}")
}

/// Lower-cased extension of the last path segment of `url`, if it has one.
#[must_use]
pub fn url_extension(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last = parsed.path_segments()?.next_back()?;
    let decoded = percent_decode_str(last).decode_utf8().ok()?;
    split_extension(&decoded)
        .1
        .map(str::to_ascii_lowercase)
}

/// Splits `name` into stem and extension. Dotfiles (`.env`) and trailing
/// dots have no extension; extensions are 1–5 ASCII alphanumerics.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (1..=5).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            (stem, Some(ext))
        }
        _ => (name, None),
    }
}

/// Strips path separators so a supplied name cannot escape its folder.
fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect::<String>()
        .trim_matches('.')
        .to_owned()
}
