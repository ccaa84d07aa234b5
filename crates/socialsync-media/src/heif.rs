//! HEIF-container decoding (HEIC, HEIF and AVIF) through libheif.
//!
//! The `image` crate has no HEVC decoder and only decodes AVIF through
//! dav1d, so these containers go to libheif, which picks the codec plugin
//! from the file itself. The primary image is decoded to interleaved 8-bit
//! RGB and handed back as an [`RgbImage`] for the JPEG encoder.

use image::RgbImage;
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

/// Content types routed to libheif instead of the `image` crate.
const HEIF_FAMILY: &[&str] = &[
    "image/heic",
    "image/heif",
    "image/heic-sequence",
    "image/heif-sequence",
    "image/avif",
];

#[must_use]
pub fn is_heif_family(content_type: &str) -> bool {
    HEIF_FAMILY.contains(&content_type)
}

/// Decodes the primary image of a HEIF container.
///
/// # Errors
///
/// Returns a description of the failing step: container parse, decode, or
/// an RGB plane whose geometry does not match the image.
pub fn decode_to_rgb(bytes: &[u8]) -> Result<RgbImage, String> {
    let lib = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(bytes).map_err(|e| format!("heif container: {e}"))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| format!("heif primary image: {e}"))?;
    let image = lib
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| format!("heif decode: {e}"))?;

    let planes = image.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| "heif decode: no interleaved RGB plane".to_owned())?;

    let (width, height) = (plane.width, plane.height);
    let row_len = width as usize * 3;
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in plane.data.chunks(plane.stride.max(1)).take(height as usize) {
        let row = row
            .get(..row_len)
            .ok_or_else(|| format!("heif plane row shorter than {row_len} bytes"))?;
        pixels.extend_from_slice(row);
    }

    RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| format!("heif plane does not fill a {width}x{height} raster"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heif_family_covers_every_transcoded_type() {
        for ct in crate::content_type::NEEDS_TRANSCODE {
            assert!(is_heif_family(ct), "{ct} should decode through libheif");
        }
        assert!(!is_heif_family("image/png"));
    }

    #[test]
    fn garbage_is_a_container_error() {
        let err = decode_to_rgb(b"definitely not heif").unwrap_err();
        assert!(err.starts_with("heif container"), "got: {err}");
    }
}
