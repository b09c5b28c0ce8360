use serde::{Deserialize, Serialize};

use crate::lock::DEFAULT_LOCK_FILE;
use crate::scrape::DEFAULT_DOI_PREFIX;
use crate::thumbnail::{DEFAULT_QUALITY, DEFAULT_TARGET_EDGE};

/// Content API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentApiConfig {
    /// API root, e.g. `http://hub-api.example.com:80`
    pub base_url: String,
    /// Value of the `domain` query parameter
    pub domain: String,
    /// Value of the `client` query parameter
    pub client: String,
}

impl Default for ContentApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://hub-api.live.cf.private.springer.com:80".to_string(),
            domain: "nature".to_string(),
            client: "natureasia".to_string(),
        }
    }
}

/// Object store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectStoreConfig {
    /// `host:port` or full URL of the S3-compatible endpoint
    pub endpoint: Option<String>,
    /// Use https when `endpoint` has no scheme
    pub secure: bool,
    /// Bucket all thumbnails are written into
    pub bucket: String,
    /// Signing region
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Write into this directory instead of a remote endpoint
    pub local_root: Option<String>,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            secure: false,
            bucket: "natureasia-static".to_string(),
            region: "us-east-1".to_string(),
            access_key_id: None,
            secret_access_key: None,
            local_root: None,
        }
    }
}

/// Thumbnail geometry and encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Edge length in pixels
    pub size: u32,
    /// Pad mode background as `[r, g, b]`
    pub fill_color: [u8; 3],
    /// JPEG quality 0-100
    pub quality: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_TARGET_EDGE,
            fill_color: [255, 255, 255],
            quality: u32::from(DEFAULT_QUALITY),
        }
    }
}

/// Thumbnailer configuration file structure.
///
/// Relative paths are resolved against the config file location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailerConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Site locale, used in listing URLs and object keys
    pub locale: String,
    /// Listing page template with `{locale}` and `{journal}` placeholders
    pub listing_url: String,
    /// DOI registrant prefix stripped from scraped identifiers
    pub doi_prefix: String,
    pub content_api: ContentApiConfig,
    pub object_store: ObjectStoreConfig,
    pub thumbnail: ThumbnailConfig,
    /// Scratch directory [default: $HOME/Desktop/THUMBNAIL_OUT]
    pub workspace_dir: Option<String>,
    /// Single-instance lock file
    pub lock_file: String,
}

impl Default for ThumbnailerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            locale: "ja-jp".to_string(),
            listing_url: "https://www.natureasia.com/{locale}/{journal}/articles".to_string(),
            doi_prefix: DEFAULT_DOI_PREFIX.to_string(),
            content_api: ContentApiConfig::default(),
            object_store: ObjectStoreConfig::default(),
            thumbnail: ThumbnailConfig::default(),
            workspace_dir: None,
            lock_file: DEFAULT_LOCK_FILE.to_string(),
        }
    }
}
