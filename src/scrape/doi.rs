/// Registrant prefix shared by every article DOI on the listing pages
pub const DEFAULT_DOI_PREFIX: &str = "10.1038/";

/// Extract the article identifier from DOI-bearing text.
///
/// The text may carry a label (`doi:10.1038/nature123`) or be a resolver URL
/// (`https://doi.org/10.1038/nature123`). Everything after the last `:` is
/// kept, and the registrant prefix is cut off together with anything before it.
///
/// # Examples
/// ```
/// # use thumbnailer::scrape::doi_suffix;
/// assert_eq!(doi_suffix("doi:10.1038/nature12345", "10.1038/"), Some("nature12345".into()));
/// assert_eq!(doi_suffix("  ", "10.1038/"), None);
/// ```
pub fn doi_suffix(text: &str, prefix: &str) -> Option<String> {
    let doi = text.rsplit(':').next().unwrap_or(text).trim();

    let suffix = match doi.find(prefix) {
        Some(pos) => &doi[pos + prefix.len()..],
        None => doi,
    };

    let suffix = suffix.trim().trim_matches('/');
    if suffix.is_empty() {
        None
    } else {
        Some(suffix.to_string())
    }
}
