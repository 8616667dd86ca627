//! Film page extractor
//!
//! The film page contributes exactly one follow-up URL: the full-credits
//! listing, derived from the credits anchor by path-append resolution.

use crate::extract::{first_match, ExtractError, Extraction, PageKind};
use crate::url::resolve_href;
use scraper::Html;
use url::Url;

/// Anchor linking the film page to its full credits listing
const CREDITS_ANCHOR: &str = r#"a[href*="fullcredits"]"#;

/// Extracts the full-credits link from a film page
///
/// Emits no credits. A film page without the credits anchor is structurally
/// malformed; the site layout has changed out from under the crawler.
///
/// # Arguments
///
/// * `document` - The parsed film page
/// * `base_url` - The film page URL, for resolving the anchor
///
/// # Returns
///
/// * `Ok(Extraction)` - Exactly one link tagged [`PageKind::Credits`]
/// * `Err(ExtractError::MalformedPage)` - The credits anchor is absent
pub fn extract_film(document: &Html, base_url: &Url) -> Result<Extraction, ExtractError> {
    let anchor = first_match(document, CREDITS_ANCHOR).ok_or(ExtractError::MalformedPage {
        selector: CREDITS_ANCHOR,
    })?;

    let href = anchor
        .value()
        .attr("href")
        .ok_or(ExtractError::MalformedPage {
            selector: CREDITS_ANCHOR,
        })?;

    let target = resolve_href(base_url, href).ok_or(ExtractError::MalformedPage {
        selector: CREDITS_ANCHOR,
    })?;

    Ok(Extraction {
        links: vec![(target, PageKind::Credits)],
        credits: Vec::new(),
    })
}
