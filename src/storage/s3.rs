use anyhow::{Context, Result, bail};
use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};

use super::{Credentials, ObjectStore, sign, uri_encode_segment};
use crate::error::ThumbnailerError;

/// S3-compatible object store (MinIO) addressed with path-style URLs.
///
/// Requests are signed with Signature V4 when credentials are configured and
/// sent anonymously otherwise.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    endpoint: Url,
    bucket: String,
    region: String,
    credentials: Option<Credentials>,
}

impl S3ObjectStore {
    pub fn new(
        client: Client,
        endpoint: &str,
        bucket: impl Into<String>,
        region: impl Into<String>,
        credentials: Option<Credentials>,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("invalid object store endpoint: {}", endpoint))?;
        if endpoint.cannot_be_a_base() {
            bail!("object store endpoint cannot have a path: {}", endpoint);
        }
        Ok(Self {
            client,
            endpoint,
            bucket: bucket.into(),
            region: region.into(),
            credentials,
        })
    }

    /// `<endpoint>/<bucket>/<key>`, each segment encoded the way requests are
    /// signed
    pub fn object_url(&self, key: &str) -> Url {
        let mut path = self.endpoint.path().trim_end_matches('/').to_string();
        let segments = std::iter::once(self.bucket.as_str())
            .chain(key.split('/').filter(|s| !s.is_empty()));
        for segment in segments {
            path.push('/');
            path.push_str(&uri_encode_segment(segment));
        }

        let mut url = self.endpoint.clone();
        url.set_path(&path);
        url
    }

    fn bucket_url(&self) -> Url {
        self.object_url("")
    }

    fn request(&self, method: Method, url: &Url, body: &[u8]) -> RequestBuilder {
        let builder = self.client.request(method.clone(), url.clone());
        match &self.credentials {
            Some(credentials) => {
                let signed = sign(
                    method.as_str(),
                    url,
                    body,
                    &self.region,
                    credentials,
                    chrono::Utc::now(),
                );
                builder
                    .header("x-amz-date", signed.amz_date)
                    .header("x-amz-content-sha256", signed.content_sha256)
                    .header("authorization", signed.authorization)
            }
            None => builder,
        }
    }
}

impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn bucket_exists(&self) -> Result<bool, ThumbnailerError> {
        let url = self.bucket_url();
        let response = self
            .request(Method::HEAD, &url, b"")
            .send()
            .map_err(|e| ThumbnailerError::Http {
                url: url.to_string(),
                source: e,
            })?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(ThumbnailerError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }),
        }
    }

    fn put_object(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), ThumbnailerError> {
        let url = self.object_url(key);
        debug!("PUT {} ({} bytes)", url, bytes.len());

        let response = self
            .request(Method::PUT, &url, bytes)
            .header(CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .map_err(|e| ThumbnailerError::Http {
                url: url.to_string(),
                source: e,
            })?;

        crate::fetch::check_status(url.as_str(), response).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(endpoint: &str) -> S3ObjectStore {
        S3ObjectStore::new(Client::new(), endpoint, "natureasia-static", "us-east-1", None)
            .unwrap()
    }

    #[test]
    fn test_object_url_is_path_style() {
        let url = store("http://minio.local:9000").object_url("ja-jp/nature/img/articles/a.jpg");

        assert_eq!(
            url.as_str(),
            "http://minio.local:9000/natureasia-static/ja-jp/nature/img/articles/a.jpg"
        );
    }

    #[test]
    fn test_object_url_escapes_segments() {
        let url = store("https://s3.example.com/").object_url("ja-jp/n/img/articles/a b.jpg");

        assert_eq!(
            url.as_str(),
            "https://s3.example.com/natureasia-static/ja-jp/n/img/articles/a%20b.jpg"
        );
    }

    #[test]
    fn test_object_url_encodes_reserved_characters() {
        let url = store("http://minio.local:9000").object_url("ja-jp/n/img/articles/a(1)!+,.jpg");

        assert_eq!(
            url.path(),
            "/natureasia-static/ja-jp/n/img/articles/a%281%29%21%2B%2C.jpg"
        );
    }

    #[test]
    fn test_bucket_url() {
        assert_eq!(
            store("http://minio.local:9000").bucket_url().as_str(),
            "http://minio.local:9000/natureasia-static"
        );
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(S3ObjectStore::new(Client::new(), "minio.local:9000", "b", "r", None).is_err());
    }
}
