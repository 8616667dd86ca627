//! Full-credits page extractor
//!
//! Walks the cast table and emits one actor-page link per cast member. The
//! cast-photo cell is the structural marker; rows without one (crew sections,
//! headings) are not cast entries and produce nothing.

use crate::extract::{ExtractError, Extraction, PageKind};
use crate::url::resolve_href;
use scraper::{Html, Selector};
use url::Url;

/// Anchor inside each cast member's photo cell
const CAST_LINKS: &str = "td.primary_photo a[href]";

/// Extracts actor-page links from a full-credits listing
///
/// Emits no credits. Zero matches is a valid result: a listing can
/// legitimately have no cast entries, and the run proceeds with whatever else
/// the frontier holds.
///
/// # Arguments
///
/// * `document` - The parsed credits page
/// * `base_url` - The credits page URL, for resolving actor links
///
/// # Returns
///
/// One link tagged [`PageKind::Actor`] per cast entry, in listing order.
pub fn extract_credits(document: &Html, base_url: &Url) -> Result<Extraction, ExtractError> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse(CAST_LINKS) {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(target) = resolve_href(base_url, href) {
                    links.push((target, PageKind::Actor));
                }
            }
        }
    }

    Ok(Extraction {
        links,
        credits: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://www.imdb.com/title/tt0111161/fullcredits/").unwrap()
    }

    #[test]
    fn test_extracts_actor_links_in_order() {
        let html = r#"<html><body><table class="cast_list">
            <tr>
                <td class="primary_photo"><a href="/name/nm0000209/"><img alt="Tim Robbins"></a></td>
                <td><a href="/name/nm0000209/">Tim Robbins</a></td>
            </tr>
            <tr>
                <td class="primary_photo"><a href="/name/nm0000151/"><img alt="Morgan Freeman"></a></td>
                <td><a href="/name/nm0000151/">Morgan Freeman</a></td>
            </tr>
        </table></body></html>"#;
        let document = Html::parse_document(html);

        let extraction = extract_credits(&document, &base_url()).unwrap();
        assert_eq!(extraction.links.len(), 2);
        assert_eq!(
            extraction.links[0].0.as_str(),
            "https://www.imdb.com/name/nm0000209/"
        );
        assert_eq!(
            extraction.links[1].0.as_str(),
            "https://www.imdb.com/name/nm0000151/"
        );
        assert!(extraction
            .links
            .iter()
            .all(|(_, kind)| *kind == PageKind::Actor));
    }

    #[test]
    fn test_ignores_links_outside_photo_cells() {
        // Name-column and crew links must not produce duplicates or extras
        let html = r#"<html><body><table>
            <tr>
                <td class="primary_photo"><a href="/name/nm0000209/"><img></a></td>
                <td class="character"><a href="/title/tt0111161/characters/nm0000209">Andy</a></td>
            </tr>
            <tr>
                <td><a href="/name/nm0001104/">Frank Darabont</a></td>
            </tr>
        </table></body></html>"#;
        let document = Html::parse_document(html);

        let extraction = extract_credits(&document, &base_url()).unwrap();
        assert_eq!(extraction.links.len(), 1);
        assert_eq!(
            extraction.links[0].0.as_str(),
            "https://www.imdb.com/name/nm0000209/"
        );
    }

    #[test]
    fn test_zero_cast_entries_is_not_an_error() {
        let html = r#"<html><body><p>No cast information available.</p></body></html>"#;
        let document = Html::parse_document(html);

        let extraction = extract_credits(&document, &base_url()).unwrap();
        assert!(extraction.links.is_empty());
        assert!(extraction.credits.is_empty());
    }

    #[test]
    fn test_unresolvable_hrefs_skipped() {
        let html = r#"<html><body><table>
            <tr><td class="primary_photo"><a href="javascript:void(0)">x</a></td></tr>
            <tr><td class="primary_photo"><a href="/name/nm0000209/">ok</a></td></tr>
        </table></body></html>"#;
        let document = Html::parse_document(html);

        let extraction = extract_credits(&document, &base_url()).unwrap();
        assert_eq!(extraction.links.len(), 1);
    }
}
