use std::collections::HashSet;
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;

use super::doi_suffix;

/// Extracts article identifiers from one particular listing page layout.
pub trait ScraperStrategy {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Identifiers in page order. Empty when the page does not have the
    /// layout this strategy understands.
    fn extract(&self, html: &str) -> Vec<String>;
}

/// Try each strategy in order and return the first non-empty result, with
/// duplicates removed in page order.
pub fn scrape_identifiers(html: &str, strategies: &[Box<dyn ScraperStrategy>]) -> Vec<String> {
    for strategy in strategies {
        let ids = strategy.extract(html);
        if ids.is_empty() {
            debug!("Scraper '{}' found nothing, trying the next one", strategy.name());
            continue;
        }

        let mut seen = HashSet::new();
        let ids: Vec<String> = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        info!("Found {} article link(s) with '{}'", ids.len(), strategy.name());
        return ids;
    }

    Vec::new()
}

/// Strategies for the journal listing pages, most specific first.
pub fn default_strategies(doi_prefix: &str) -> Vec<Box<dyn ScraperStrategy>> {
    vec![
        Box::new(ArticleListScraper::new(doi_prefix)),
        Box::new(DataDoiScraper::new(doi_prefix)),
    ]
}

#[expect(clippy::expect_used, reason = "patterns are compile-time constants")]
static ARTICLE_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<[a-z][a-z0-9]*\b[^>]*\bclass\s*=\s*["'](?:[^"']*\s)?article-list(?:\s[^"']*)?["'][^>]*>"#)
        .expect("valid article-list pattern")
});

#[expect(clippy::expect_used, reason = "patterns are compile-time constants")]
static ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<article\b[^>]*>(.*?)</article\s*>").expect("valid article pattern")
});

#[expect(clippy::expect_used, reason = "patterns are compile-time constants")]
static DOI_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<[a-z][a-z0-9]*\b[^>]*\bclass\s*=\s*["'](?:[^"']*\s)?doi(?:\s[^"']*)?["'][^>]*>(.*?)</[a-z]"#)
        .expect("valid doi element pattern")
});

#[expect(clippy::expect_used, reason = "patterns are compile-time constants")]
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag pattern"));

#[expect(clippy::expect_used, reason = "patterns are compile-time constants")]
static DATA_DOI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bdata-doi\s*=\s*["']([^"']+)["']"#).expect("valid data-doi pattern")
});

/// Listing pages with a `.article-list` container of `<article>` entries,
/// each holding a `.doi` element such as `doi:10.1038/nature12345`.
pub struct ArticleListScraper {
    doi_prefix: String,
}

impl ArticleListScraper {
    pub fn new(doi_prefix: impl Into<String>) -> Self {
        Self {
            doi_prefix: doi_prefix.into(),
        }
    }
}

impl ScraperStrategy for ArticleListScraper {
    fn name(&self) -> &'static str {
        "article-list"
    }

    fn extract(&self, html: &str) -> Vec<String> {
        let Some(container) = ARTICLE_LIST.find(html) else {
            debug!("No article-list container on the page");
            return Vec::new();
        };

        ARTICLE
            .captures_iter(&html[container.end()..])
            .filter_map(|article| {
                let body = article.get(1)?.as_str();
                let doi = DOI_ELEMENT.captures(body)?.get(1)?.as_str();
                let text = TAG.replace_all(doi, "");
                doi_suffix(&text, &self.doi_prefix)
            })
            .collect()
    }
}

/// Fallback for pages that expose DOIs as `data-doi` attributes.
pub struct DataDoiScraper {
    doi_prefix: String,
}

impl DataDoiScraper {
    pub fn new(doi_prefix: impl Into<String>) -> Self {
        Self {
            doi_prefix: doi_prefix.into(),
        }
    }
}

impl ScraperStrategy for DataDoiScraper {
    fn name(&self) -> &'static str {
        "data-doi"
    }

    fn extract(&self, html: &str) -> Vec<String> {
        DATA_DOI
            .captures_iter(html)
            .filter_map(|c| doi_suffix(c.get(1)?.as_str(), &self.doi_prefix))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::DEFAULT_DOI_PREFIX;

    const LISTING: &str = r#"
        <html><body>
        <nav class="menu"><p class="doi">doi:10.1038/not-an-article</p></nav>
        <ul class="list article-list">
          <li><article class="teaser">
            <h3>First</h3>
            <p class="doi">doi:10.1038/nature12345</p>
          </article></li>
          <li><article>
            <h3>Second</h3>
            <span class="meta doi"><a href="https://doi.org/10.1038/ncomms6789">doi: 10.1038/ncomms6789</a></span>
          </article></li>
          <li><article><h3>No DOI here</h3></article></li>
          <li><article><p class="doi">doi:10.1038/nature12345</p></article></li>
        </ul>
        </body></html>
    "#;

    #[test]
    fn test_article_list_scraper() {
        let ids = ArticleListScraper::new(DEFAULT_DOI_PREFIX).extract(LISTING);

        assert_eq!(ids, ["nature12345", "ncomms6789", "nature12345"]);
    }

    #[test]
    fn test_article_list_missing_container() {
        let html = r#"<div class="articles"><article><p class="doi">doi:10.1038/x</p></article></div>"#;

        assert!(ArticleListScraper::new(DEFAULT_DOI_PREFIX).extract(html).is_empty());
    }

    #[test]
    fn test_similar_class_names_do_not_match() {
        let html = r#"<ul class="article-list"><article><p class="doi-label">10.1038/x</p></article></ul>"#;

        assert!(ArticleListScraper::new(DEFAULT_DOI_PREFIX).extract(html).is_empty());
    }

    #[test]
    fn test_data_doi_scraper() {
        let html = r#"<div data-doi="10.1038/s41467-1"></div><div data-doi='10.1038/s41467-2'></div>"#;

        let ids = DataDoiScraper::new(DEFAULT_DOI_PREFIX).extract(html);

        assert_eq!(ids, ["s41467-1", "s41467-2"]);
    }

    #[test]
    fn test_first_non_empty_strategy_wins_and_dedupes() {
        let strategies = default_strategies(DEFAULT_DOI_PREFIX);

        let ids = scrape_identifiers(LISTING, &strategies);

        assert_eq!(ids, ["nature12345", "ncomms6789"]);
    }

    #[test]
    fn test_falls_back_to_next_strategy() {
        let html = r#"<section><a data-doi="10.1038/fallback1">x</a></section>"#;

        let ids = scrape_identifiers(html, &default_strategies(DEFAULT_DOI_PREFIX));

        assert_eq!(ids, ["fallback1"]);
    }

    #[test]
    fn test_unrecognized_page_yields_nothing() {
        let ids = scrape_identifiers("<html></html>", &default_strategies(DEFAULT_DOI_PREFIX));

        assert!(ids.is_empty());
    }
}
