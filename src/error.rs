use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbnailerError {
    #[error("Invalid thumbnail policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid JPEG quality {0}: must be between 0 and 100")]
    InvalidQuality(u32),

    #[error("Failed to read image source '{id}': {source}")]
    SourceRead {
        id: String,
        source: std::io::Error,
    },

    #[error("Failed to decode image '{id}': {source}")]
    ImageDecode {
        id: String,
        source: image::ImageError,
    },

    #[error("Image '{id}' has degenerate dimensions {width}x{height}")]
    DegenerateImage { id: String, width: u32, height: u32 },

    #[error("Failed to encode thumbnail '{id}': {source}")]
    ImageEncode {
        id: String,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Request to '{url}' failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request to '{url}' returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Content API response for '{id}' is not valid JSON: {source}")]
    ContentApiJson {
        id: String,
        source: serde_json::Error,
    },

    #[error("Bucket '{0}' does not exist")]
    BucketMissing(String),

    #[error("Another thumbnailer run holds the lock '{0}'. Please try later.")]
    LockHeld(PathBuf),

    #[error("Failed to acquire lock '{path}': {source}")]
    Lock {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ThumbnailerError {
    /// Configuration errors abort the whole run; everything else only
    /// excludes the item it happened on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ThumbnailerError::InvalidPolicy(_) | ThumbnailerError::InvalidQuality(_)
        )
    }
}
