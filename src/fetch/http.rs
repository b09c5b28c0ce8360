use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, Response};

use super::{AssetDownloader, ListingSource};
use crate::error::ThumbnailerError;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Blocking HTTP client shared by the listing, API and asset fetches.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, ThumbnailerError> {
        let client = Client::builder()
            .user_agent(concat!("thumbnailer/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ThumbnailerError::Http {
                url: String::new(),
                source: e,
            })?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// `GET` a URL, treating any non-success status as an error.
    pub fn get(&self, url: &str) -> Result<Response, ThumbnailerError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ThumbnailerError::Http {
                url: url.to_string(),
                source: e,
            })?;
        check_status(url, response)
    }

    pub fn get_text(&self, url: &str) -> Result<String, ThumbnailerError> {
        self.get(url)?.text().map_err(|e| ThumbnailerError::Http {
            url: url.to_string(),
            source: e,
        })
    }

    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>, ThumbnailerError> {
        self.get(url)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| ThumbnailerError::Http {
                url: url.to_string(),
                source: e,
            })
    }
}

pub(crate) fn check_status(url: &str, response: Response) -> Result<Response, ThumbnailerError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ThumbnailerError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

impl ListingSource for HttpClient {
    fn fetch_listing(&self, url: &str) -> Result<String, ThumbnailerError> {
        self.get_text(url)
    }
}

impl AssetDownloader for HttpClient {
    fn download(&self, url: &str) -> Result<Vec<u8>, ThumbnailerError> {
        self.get_bytes(url)
    }
}
