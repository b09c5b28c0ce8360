mod doi;
mod strategy;

pub use doi::{DEFAULT_DOI_PREFIX, doi_suffix};
pub use strategy::{
    ArticleListScraper, DataDoiScraper, ScraperStrategy, default_strategies, scrape_identifiers,
};
