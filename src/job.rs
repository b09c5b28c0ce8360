use anyhow::{Context, Result, bail};
use log::{debug, info, warn};

use crate::error::ThumbnailerError;
use crate::fetch::{
    AssetDownloader, ImageLinkResolver, ListingSource, cache_buster, listing_url, staged_file_name,
};
use crate::pipeline::{PipelineDriver, SourceItem};
use crate::scrape::{DEFAULT_DOI_PREFIX, ScraperStrategy, default_strategies, scrape_identifiers};
use crate::storage::{JPEG_CONTENT_TYPE, ObjectStore, object_key};
use crate::thumbnail::EncodedThumbnail;
use crate::workspace::Workspace;

const DEFAULT_LOCALE: &str = "ja-jp";
const DEFAULT_LISTING_TEMPLATE: &str = "https://www.natureasia.com/{locale}/{journal}/articles";

/// The network and storage services a job talks to.
pub struct JobServices {
    pub listing: Box<dyn ListingSource>,
    pub resolver: Box<dyn ImageLinkResolver>,
    pub downloader: Box<dyn AssetDownloader>,
    pub store: Box<dyn ObjectStore>,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobSummary {
    /// Article identifiers scraped from the listing
    pub found: usize,
    /// Identifiers with an image link
    pub resolved: usize,
    /// Assets downloaded into the workspace
    pub downloaded: usize,
    /// Thumbnails encoded
    pub generated: usize,
    /// Thumbnails written to the object store
    pub uploaded: usize,
}

/// One end-to-end thumbnail run for a journal: scrape the listing, resolve
/// and download each article image, generate thumbnails and upload them.
pub struct ThumbnailJob {
    services: JobServices,
    driver: PipelineDriver,
    workspace: Workspace,
    strategies: Vec<Box<dyn ScraperStrategy>>,
    locale: String,
    listing_template: String,
}

impl ThumbnailJob {
    pub fn new(services: JobServices, driver: PipelineDriver, workspace: Workspace) -> Self {
        Self {
            services,
            driver,
            workspace,
            strategies: default_strategies(DEFAULT_DOI_PREFIX),
            locale: DEFAULT_LOCALE.to_string(),
            listing_template: DEFAULT_LISTING_TEMPLATE.to_string(),
        }
    }

    /// Locale segment used in listing URLs and object keys
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Listing URL template with `{locale}` and `{journal}` placeholders
    pub fn listing_template(mut self, template: impl Into<String>) -> Self {
        self.listing_template = template.into();
        self
    }

    /// Scraper strategies, tried in order
    pub fn strategies(mut self, strategies: Vec<Box<dyn ScraperStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Run the job for one journal.
    ///
    /// Listing, scraping, API reachability and bucket checks abort the run.
    /// Failures for a single article are logged and that article is skipped.
    pub fn run(&self, journal: &str) -> Result<JobSummary> {
        let mut summary = JobSummary::default();

        let url = listing_url(&self.listing_template, &self.locale, journal, cache_buster())?;
        info!("Fetching article listing {}", url);
        let html = self
            .services
            .listing
            .fetch_listing(url.as_str())
            .context("failed to fetch article listing")?;

        let ids = scrape_identifiers(&html, &self.strategies);
        if ids.is_empty() {
            bail!("could not scrape any article identifiers from {}", url);
        }
        summary.found = ids.len();
        info!("Found {} articles", ids.len());

        self.services
            .resolver
            .probe()
            .context("content API is unreachable")?;

        let store = &self.services.store;
        if !store.bucket_exists()? {
            return Err(ThumbnailerError::BucketMissing(store.bucket().to_string()).into());
        }

        let mut sources = Vec::with_capacity(ids.len());
        for id in &ids {
            let link = match self.services.resolver.resolve(id) {
                Ok(Some(link)) => link,
                Ok(None) => {
                    warn!("Skipping '{}': article has no image asset", id);
                    continue;
                }
                Err(e) => {
                    warn!("Skipping '{}': {}", id, e);
                    continue;
                }
            };
            summary.resolved += 1;

            match self.stage_asset(id, &link) {
                Ok(source) => {
                    summary.downloaded += 1;
                    sources.push(source);
                }
                Err(e) => warn!("Skipping '{}': {}", id, e),
            }
        }

        let thumbnails = self.driver.run(&sources)?;
        summary.generated = thumbnails.len();

        for thumbnail in &thumbnails {
            match self.upload(journal, thumbnail) {
                Ok(key) => {
                    summary.uploaded += 1;
                    info!("Uploaded {}", key);
                }
                Err(e) => warn!("Upload of '{}' failed: {}", thumbnail.file_name, e),
            }
        }

        if summary.uploaded == 0 {
            warn!("No thumbnails were uploaded for '{}'", journal);
        }
        debug!("{:?}", summary);

        Ok(summary)
    }

    fn stage_asset(&self, id: &str, link: &str) -> Result<SourceItem, ThumbnailerError> {
        let bytes = self.services.downloader.download(link)?;
        let path = self.workspace.write(&staged_file_name(id, link), &bytes)?;
        debug!("Downloaded {} to {}", link, path.display());
        Ok(SourceItem::from_file(id, path))
    }

    fn upload(&self, journal: &str, thumbnail: &EncodedThumbnail) -> Result<String, ThumbnailerError> {
        if let Err(e) = self.workspace.write(&thumbnail.file_name, &thumbnail.bytes) {
            warn!("Could not stage '{}': {}", thumbnail.file_name, e);
        }

        let key = object_key(&self.locale, journal, &thumbnail.file_name);
        self.services
            .store
            .put_object(&key, &thumbnail.bytes, JPEG_CONTENT_TYPE)?;
        Ok(key)
    }
}
