use anyhow::{Context, Result};
use reqwest::Url;

/// Build the article listing URL for a journal.
///
/// `{locale}` and `{journal}` in the template are substituted, and a `v`
/// query parameter is appended so caches in front of the site serve a fresh
/// page.
pub fn listing_url(template: &str, locale: &str, journal: &str, cache_buster: u32) -> Result<Url> {
    let raw = template
        .replace("{locale}", locale)
        .replace("{journal}", journal);

    let mut url =
        Url::parse(raw.trim()).with_context(|| format!("invalid listing URL: {}", raw))?;
    url.query_pairs_mut()
        .append_pair("v", &cache_buster.to_string());
    Ok(url)
}

/// Cache-busting value in 1..=1000 derived from the current time.
pub fn cache_buster() -> u32 {
    chrono::Utc::now().timestamp_subsec_millis() % 1000 + 1
}
