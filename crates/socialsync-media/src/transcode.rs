//! Conversion of formats browsers cannot display into JPEG.
//!
//! [`Transcoder`] is synchronous CPU work; [`transcode_or_original`] runs it
//! on the blocking pool and falls back to the untouched input when it fails.
//! The fallback is logged, never returned as an error.

use std::io::Cursor;
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageReader, RgbImage};

use crate::content_type::JPEG;
use crate::error::MediaError;

pub const DEFAULT_JPEG_QUALITY: u8 = 82;

/// Encoded bytes plus the content type they are encoded as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

pub trait Transcoder: Send + Sync + 'static {
    /// Converts `bytes` (declared as `content_type`) into a web-safe format.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Transcode`] when the input cannot be decoded or
    /// the output cannot be encoded.
    fn transcode(&self, bytes: &[u8], content_type: &str) -> Result<Encoded, MediaError>;
}

/// Decodes the input into an RGB raster and re-encodes it as JPEG at a fixed
/// quality. Alpha is discarded. HEIC, HEIF and AVIF are decoded by libheif
/// (the default `heif` feature); other formats by the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct ImageTranscoder {
    quality: u8,
}

impl ImageTranscoder {
    /// `quality` is clamped to `1..=100`.
    #[must_use]
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    #[must_use]
    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for ImageTranscoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl Transcoder for ImageTranscoder {
    fn transcode(&self, bytes: &[u8], content_type: &str) -> Result<Encoded, MediaError> {
        let fail = |reason: String| MediaError::Transcode {
            from: content_type.to_owned(),
            reason,
        };

        let raster = decode_raster(bytes, content_type).map_err(fail)?;

        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, self.quality)
            .encode_image(&raster)
            .map_err(|e| fail(format!("encode: {e}")))?;

        Ok(Encoded {
            bytes: out,
            content_type: JPEG.to_owned(),
        })
    }
}

/// HEIF containers go to libheif when the `heif` feature is on; everything
/// else is left to the `image` crate's format sniffing.
fn decode_raster(bytes: &[u8], content_type: &str) -> Result<RgbImage, String> {
    #[cfg(feature = "heif")]
    if crate::heif::is_heif_family(content_type) {
        return crate::heif::decode_to_rgb(bytes);
    }
    #[cfg(not(feature = "heif"))]
    let _ = content_type;

    Ok(ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| format!("format detection: {e}"))?
        .decode()
        .map_err(|e| format!("decode: {e}"))?
        .to_rgb8())
}

/// Runs `transcoder` on the blocking pool. Any failure, including a panic in
/// the transcoder, yields the original bytes and content type.
pub async fn transcode_or_original<T: Transcoder>(
    transcoder: Arc<T>,
    bytes: Vec<u8>,
    content_type: String,
) -> Encoded {
    let input: Arc<[u8]> = Arc::from(bytes);
    let task_input = Arc::clone(&input);
    let task_type = content_type.clone();

    let outcome =
        tokio::task::spawn_blocking(move || transcoder.transcode(&task_input, &task_type)).await;

    let reason = match outcome {
        Ok(Ok(encoded)) => {
            tracing::debug!(
                from = %content_type,
                to = %encoded.content_type,
                bytes_in = input.len(),
                bytes_out = encoded.bytes.len(),
                "transcoded media"
            );
            return encoded;
        }
        Ok(Err(err)) => err.to_string(),
        Err(join_err) => format!("transcoder task failed: {join_err}"),
    };

    tracing::warn!(
        content_type = %content_type,
        reason = %reason,
        "transcode failed; storing original bytes"
    );
    Encoded {
        bytes: input.to_vec(),
        content_type,
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png_fixture() -> Vec<u8> {
        let img = RgbaImage::from_pixel(8, 6, Rgba([200, 40, 40, 128]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    struct Failing;

    impl Transcoder for Failing {
        fn transcode(&self, _bytes: &[u8], content_type: &str) -> Result<Encoded, MediaError> {
            Err(MediaError::Transcode {
                from: content_type.to_owned(),
                reason: "simulated".to_owned(),
            })
        }
    }

    struct Panicking;

    impl Transcoder for Panicking {
        fn transcode(&self, _bytes: &[u8], _content_type: &str) -> Result<Encoded, MediaError> {
            panic!("decoder blew up");
        }
    }

    #[test]
    fn image_transcoder_produces_jpeg() {
        let encoded = ImageTranscoder::default()
            .transcode(&png_fixture(), "image/png")
            .unwrap();
        assert_eq!(encoded.content_type, "image/jpeg");
        assert_eq!(&encoded.bytes[..2], &[0xFF_u8, 0xD8], "JPEG SOI marker");

        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }

    #[test]
    fn undecodable_input_is_a_transcode_error() {
        let err = ImageTranscoder::default()
            .transcode(b"\x00\x00\x00\x18ftypheic not really", "image/heic")
            .unwrap_err();
        assert!(matches!(err, MediaError::Transcode { ref from, .. } if from == "image/heic"));
    }

    #[cfg(feature = "heif")]
    #[test]
    fn avif_is_decoded_by_libheif_and_reencoded_as_jpeg() {
        let img = image::RgbImage::from_fn(16, 16, |x, y| {
            image::Rgb([(x * 16) as u8, (y * 16) as u8, 128])
        });
        let mut avif = Cursor::new(Vec::new());
        img.write_to(&mut avif, ImageFormat::Avif).unwrap();
        let avif = avif.into_inner();
        assert_eq!(&avif[4..12], b"ftypavif");

        let encoded = ImageTranscoder::default()
            .transcode(&avif, "image/avif")
            .unwrap();
        assert_eq!(encoded.content_type, "image/jpeg");
        assert_eq!(&encoded.bytes[..2], &[0xFF_u8, 0xD8]);

        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(ImageTranscoder::new(0).quality(), 1);
        assert_eq!(ImageTranscoder::new(255).quality(), 100);
        assert_eq!(ImageTranscoder::default().quality(), 82);
    }

    #[tokio::test]
    async fn failure_falls_back_to_original() {
        let original = b"heic-bytes".to_vec();
        let encoded = transcode_or_original(
            Arc::new(Failing),
            original.clone(),
            "image/heic".to_owned(),
        )
        .await;
        assert_eq!(encoded.bytes, original);
        assert_eq!(encoded.content_type, "image/heic");
    }

    #[tokio::test]
    async fn panic_falls_back_to_original() {
        let encoded =
            transcode_or_original(Arc::new(Panicking), b"x".to_vec(), "image/avif".to_owned())
                .await;
        assert_eq!(encoded.bytes, b"x");
        assert_eq!(encoded.content_type, "image/avif");
    }

    #[tokio::test]
    async fn success_returns_transcoded_output() {
        let encoded = transcode_or_original(
            Arc::new(ImageTranscoder::default()),
            png_fixture(),
            "image/png".to_owned(),
        )
        .await;
        assert_eq!(encoded.content_type, "image/jpeg");
    }
}
