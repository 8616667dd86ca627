//! Actor page extractor
//!
//! The only record-producing stage: pairs the actor's name with every acting
//! credit on the page, preserving page order. Cross-actor ordering in the
//! final output depends on fetch completion order and is not guaranteed.

use crate::extract::{first_match, Credit, ExtractError, Extraction};
use scraper::{Html, Selector};

/// The actor's display name in the page header
const ACTOR_NAME: &str = "h1 span.itemprop";

/// Title links inside acting-credit filmography rows
const ACTING_CREDITS: &str = r#"div.filmo-row[id*="actor"] b a"#;

/// Extracts (actor, title) credits from an actor page
///
/// The name is the first match of the header selector; without it no credit
/// can be attributed, so its absence is a structural failure. Zero titles is
/// valid and yields zero credits: an actor can have an empty filmography.
///
/// # Returns
///
/// * `Ok(Extraction)` - One credit per acting title, page order preserved
/// * `Err(ExtractError::MissingField)` - No actor name on the page
pub fn extract_actor(document: &Html) -> Result<Extraction, ExtractError> {
    let actor = first_match(document, ACTOR_NAME)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(ExtractError::MissingField {
            selector: ACTOR_NAME,
        })?;

    let mut credits = Vec::new();

    if let Ok(selector) = Selector::parse(ACTING_CREDITS) {
        for element in document.select(&selector) {
            let title = element.text().collect::<String>().trim().to_string();
            if !title.is_empty() {
                credits.push(Credit {
                    actor: actor.clone(),
                    title,
                });
            }
        }
    }

    Ok(Extraction {
        links: Vec::new(),
        credits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor_page(name: &str, titles: &[&str]) -> String {
        let mut rows = String::new();
        for (i, title) in titles.iter().enumerate() {
            rows.push_str(&format!(
                r#"<div class="filmo-row odd" id="actor-tt{:07}"><b><a href="/title/tt{:07}/">{}</a></b> (1994)</div>"#,
                i, i, title
            ));
        }
        format!(
            r#"<html><body>
                <h1 class="header"><span class="itemprop">{}</span></h1>
                <div id="filmography">{}</div>
            </body></html>"#,
            name, rows
        )
    }

    #[test]
    fn test_one_credit_per_title_in_page_order() {
        let html = actor_page(
            "Tim Robbins",
            &["The Shawshank Redemption", "Mystic River"],
        );
        let document = Html::parse_document(&html);

        let extraction = extract_actor(&document).unwrap();
        assert_eq!(
            extraction.credits,
            vec![
                Credit {
                    actor: "Tim Robbins".to_string(),
                    title: "The Shawshank Redemption".to_string(),
                },
                Credit {
                    actor: "Tim Robbins".to_string(),
                    title: "Mystic River".to_string(),
                },
            ]
        );
        assert!(extraction.links.is_empty());
    }

    #[test]
    fn test_zero_titles_yields_zero_credits() {
        let html = actor_page("Tim Robbins", &[]);
        let document = Html::parse_document(&html);

        let extraction = extract_actor(&document).unwrap();
        assert!(extraction.credits.is_empty());
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let html = r#"<html><body>
            <div class="filmo-row" id="actor-tt0111161"><b><a href="/title/tt0111161/">The Shawshank Redemption</a></b></div>
        </body></html>"#;
        let document = Html::parse_document(html);

        let result = extract_actor(&document);
        assert!(matches!(result, Err(ExtractError::MissingField { .. })));
    }

    #[test]
    fn test_non_acting_rows_ignored() {
        // Producer and director rows carry different id prefixes
        let html = r#"<html><body>
            <h1><span class="itemprop">Clint Eastwood</span></h1>
            <div class="filmo-row odd" id="actor-tt0111162"><b><a href="/title/tt0111162/">In the Line of Fire</a></b></div>
            <div class="filmo-row even" id="director-tt0111163"><b><a href="/title/tt0111163/">Unforgiven</a></b></div>
            <div class="filmo-row odd" id="producer-tt0111164"><b><a href="/title/tt0111164/">Mystic River</a></b></div>
        </body></html>"#;
        let document = Html::parse_document(html);

        let extraction = extract_actor(&document).unwrap();
        assert_eq!(extraction.credits.len(), 1);
        assert_eq!(extraction.credits[0].title, "In the Line of Fire");
    }

    #[test]
    fn test_name_whitespace_trimmed() {
        let html = r#"<html><body>
            <h1><span class="itemprop">
                Tim Robbins
            </span></h1>
            <div class="filmo-row" id="actor-tt0105236"><b><a href="/title/tt0105236/">Reservoir Dogs</a></b></div>
        </body></html>"#;
        let document = Html::parse_document(html);

        let extraction = extract_actor(&document).unwrap();
        assert_eq!(extraction.credits[0].actor, "Tim Robbins");
    }

    #[test]
    fn test_whitespace_only_name_is_missing() {
        let html = r#"<html><body><h1><span class="itemprop">   </span></h1></body></html>"#;
        let document = Html::parse_document(html);

        assert!(matches!(
            extract_actor(&document),
            Err(ExtractError::MissingField { .. })
        ));
    }
}
