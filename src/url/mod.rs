//! URL handling for Playbill
//!
//! Normalization and link resolution shared by the extractors and the
//! frontier. The frontier deduplicates on the normalized form, so two hrefs
//! that differ only in fragment resolve to one entry.

use crate::UrlError;
use url::Url;

/// Parses and normalizes an absolute URL
///
/// Normalization strips the fragment so that `page#cast` and `page` share a
/// single frontier entry. Only http and https URLs are accepted.
///
/// # Arguments
///
/// * `raw` - The URL string to parse
///
/// # Returns
///
/// * `Ok(Url)` - The normalized URL
/// * `Err(UrlError)` - The string did not parse or uses an unsupported scheme
pub fn normalize_url(raw: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    url.set_fragment(None);
    Ok(url)
}

/// Resolves an href against the URL of the page it appeared on
///
/// Returns None for links a crawler cannot follow:
/// - empty and fragment-only hrefs
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - hrefs that fail to resolve
/// - non-HTTP(S) URLs after resolution
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    // Skip empty hrefs and same-page anchors
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    resolved.set_fragment(None);
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://www.imdb.com/title/tt0111161/").unwrap()
    }

    #[test]
    fn test_normalize_valid_url() {
        let url = normalize_url("https://example.com/page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_normalize_strips_fragment() {
        let url = normalize_url("https://example.com/page#cast").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let url = normalize_url("  https://example.com/page  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(matches!(normalize_url("not a url"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_normalize_rejects_ftp() {
        assert!(matches!(
            normalize_url("ftp://example.com/file"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_resolve_path_append() {
        // The film page derives its credits listing by path append
        let resolved = resolve_href(&base_url(), "fullcredits/").unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://www.imdb.com/title/tt0111161/fullcredits/"
        );
    }

    #[test]
    fn test_resolve_absolute_path() {
        let resolved = resolve_href(&base_url(), "/name/nm0000209/").unwrap();
        assert_eq!(resolved.as_str(), "https://www.imdb.com/name/nm0000209/");
    }

    #[test]
    fn test_resolve_absolute_url() {
        let resolved = resolve_href(&base_url(), "https://other.com/page").unwrap();
        assert_eq!(resolved.as_str(), "https://other.com/page");
    }

    #[test]
    fn test_resolve_strips_fragment() {
        let resolved = resolve_href(&base_url(), "/name/nm0000209/#filmography").unwrap();
        assert_eq!(resolved.as_str(), "https://www.imdb.com/name/nm0000209/");
    }

    #[test]
    fn test_skip_fragment_only() {
        assert!(resolve_href(&base_url(), "#top").is_none());
    }

    #[test]
    fn test_skip_empty() {
        assert!(resolve_href(&base_url(), "").is_none());
        assert!(resolve_href(&base_url(), "   ").is_none());
    }

    #[test]
    fn test_skip_special_schemes() {
        assert!(resolve_href(&base_url(), "javascript:void(0)").is_none());
        assert!(resolve_href(&base_url(), "mailto:test@example.com").is_none());
        assert!(resolve_href(&base_url(), "tel:+1234567890").is_none());
        assert!(resolve_href(&base_url(), "data:text/html,<h1>x</h1>").is_none());
    }
}
