/// Extension used when an asset link has none
const FALLBACK_EXTENSION: &str = "img";

/// Extension of the last path segment of an asset link, query and fragment
/// ignored.
pub fn asset_extension(link: &str) -> &str {
    let path = link.split(['?', '#']).next().unwrap_or(link);
    let segment = path.rsplit('/').next().unwrap_or(path);

    match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext,
        _ => FALLBACK_EXTENSION,
    }
}

/// File name a downloaded asset is staged under: `<id>.<ext>`.
///
/// Path separators in the identifier are replaced so every asset lands
/// directly in the workspace.
pub fn staged_file_name(id: &str, link: &str) -> String {
    let id: String = id
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}.{}", id, asset_extension(link))
}
