pub mod client;
pub mod endpoints;
pub mod error;
pub mod handle;
pub mod ingest;
pub mod normalize;
pub mod pagination;
pub mod types;
pub mod website;

pub use client::VendorClient;
pub use error::ScraperError;
pub use handle::extract_handle;
pub use ingest::{Ingestor, MAX_PAGES};
pub use pagination::Continuation;
pub use website::{check_target, normalize_website_url};
