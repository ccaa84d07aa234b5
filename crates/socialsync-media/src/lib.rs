pub mod content_type;
pub mod error;
pub mod fetch;
pub mod filename;
#[cfg(feature = "heif")]
pub mod heif;
pub mod resolve;
pub mod service;
pub mod storage;
pub mod transcode;

pub use error::MediaError;
pub use fetch::{FetchedMedia, MediaFetcher, DEFAULT_MAX_MEDIA_BYTES};
pub use resolve::{resolve_account_media, resolve_post_media, ResolveReport};
pub use service::{destination_folder, MediaService};
pub use storage::{HttpObjectStore, MemoryObjectStore, ObjectStore, StoredObject};
pub use transcode::{Encoded, ImageTranscoder, Transcoder, DEFAULT_JPEG_QUALITY};
