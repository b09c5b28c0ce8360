use anyhow::{Context, Result, bail};
use log::{debug, info};
use reqwest::Url;
use serde_json::Value;

use super::{HttpClient, ImageLinkResolver};
use crate::error::ThumbnailerError;

/// JSON pointer to the image asset link in an article response
const IMAGE_LINK_POINTER: &str = "/article/hasImage/hasImageAsset/link";

/// Client for the article content API.
#[derive(Debug, Clone)]
pub struct ContentApiClient {
    http: HttpClient,
    base: Url,
    domain: String,
    client_id: String,
}

impl ContentApiClient {
    pub fn new(
        http: HttpClient,
        base_url: &str,
        domain: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("invalid content API URL: {}", base_url))?;
        if base.cannot_be_a_base() {
            bail!("content API URL cannot have a path: {}", base_url);
        }
        Ok(Self {
            http,
            base,
            domain: domain.into(),
            client_id: client_id.into(),
        })
    }

    /// `{base}/api/v1/articles/{id}?domain=..&client=..`
    pub fn article_url(&self, id: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v1", "articles", id]);
        }
        url.query_pairs_mut()
            .append_pair("domain", &self.domain)
            .append_pair("client", &self.client_id);
        url
    }
}

impl ImageLinkResolver for ContentApiClient {
    fn probe(&self) -> Result<(), ThumbnailerError> {
        let response = self.http.get(self.base.as_str())?;
        debug!("Content API answered {}", response.status());
        Ok(())
    }

    fn resolve(&self, id: &str) -> Result<Option<String>, ThumbnailerError> {
        let url = self.article_url(id);
        let body = self.http.get_text(url.as_str())?;
        let json: Value =
            serde_json::from_str(&body).map_err(|e| ThumbnailerError::ContentApiJson {
                id: id.to_string(),
                source: e,
            })?;

        let link = extract_image_link(&json);
        if link.is_some() {
            info!("Found image asset of {}", id);
        }
        Ok(link)
    }
}

/// Pull `article.hasImage.hasImageAsset.link` out of an article response.
pub fn extract_image_link(json: &Value) -> Option<String> {
    json.pointer(IMAGE_LINK_POINTER)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(str::to_string)
}
