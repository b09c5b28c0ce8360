mod content_api;
mod download;
mod http;
mod listing;

pub use content_api::{ContentApiClient, extract_image_link};
pub use download::{asset_extension, staged_file_name};
pub use http::HttpClient;
pub(crate) use http::check_status;
pub use listing::{cache_buster, listing_url};

use crate::error::ThumbnailerError;

/// Fetches the HTML of an article listing page.
pub trait ListingSource {
    fn fetch_listing(&self, url: &str) -> Result<String, ThumbnailerError>;
}

/// Resolves an article identifier to the link of its image asset.
pub trait ImageLinkResolver {
    /// Check that the service is reachable at all.
    fn probe(&self) -> Result<(), ThumbnailerError>;

    /// `Ok(None)` when the article has no image asset.
    fn resolve(&self, id: &str) -> Result<Option<String>, ThumbnailerError>;
}

/// Downloads the raw bytes behind an asset link.
pub trait AssetDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>, ThumbnailerError>;
}
