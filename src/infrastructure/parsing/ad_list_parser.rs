//! Listing page parser
//!
//! Selects every regular listing block and maps each one independently to
//! an [`AdRecord`]. A missing fragment is never an error — the field is
//! simply omitted. Selectors are compiled once at construction.
//!
//! The description block embeds two labeled sub-fields, "Lokacija:" and
//! "Stambena površina:". Both are independent substring scans over the
//! original block text, location first: location captures everything after
//! its label through the end of the block, size is truncated at the first
//! line break. When the size label follows the location label on the same
//! line, the location value therefore contains the size text too. The
//! description field is the block text with the literal
//! `Lokacija: <value>` substring removed — substring removal, not
//! positional, so a recurring value elsewhere in the text would be
//! stripped as well.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::domain::ad::{AdRecord, AdSet};

/// Origin prepended to the origin-relative hrefs the listing page uses.
pub const SITE_ORIGIN: &str = "https://www.njuskalo.hr";

const LOCATION_LABEL: &str = "Lokacija:";
const SIZE_LABEL: &str = "Stambena površina:";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid CSS selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("input could not be parsed as markup (empty document)")]
    EmptyDocument,
}

/// Parser for the Njuskalo listing page, selectors precompiled.
pub struct AdListParser {
    listing: Selector,
    title: Selector,
    description: Selector,
    price: Selector,
    link: Selector,
}

impl AdListParser {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            listing: compile("li.EntityList-item--Regular")?,
            title: compile("h3.entity-title")?,
            description: compile("div.entity-description-main")?,
            price: compile("strong.price--hrk")?,
            link: compile("a.link")?,
        })
    }

    /// Extract all listing blocks from the raw markup, in document order.
    pub fn extract(&self, raw_markup: &str) -> Result<AdSet, ParseError> {
        if raw_markup.trim().is_empty() {
            return Err(ParseError::EmptyDocument);
        }

        let document = Html::parse_document(raw_markup);
        let ads: AdSet = document
            .select(&self.listing)
            .map(|item| self.parse_listing(item))
            .collect();

        debug!("parsed {} listing blocks", ads.len());
        Ok(ads)
    }

    /// Map one listing block to a record, field by field.
    fn parse_listing(&self, item: ElementRef<'_>) -> AdRecord {
        let mut ad = AdRecord::default();

        if let Some(el) = item.select(&self.title).next() {
            ad.title = Some(text_of(el));
        }

        if let Some(el) = item.select(&self.description).next() {
            let text = text_of(el);

            if let Some(pos) = text.find(LOCATION_LABEL) {
                let location = text[pos + LOCATION_LABEL.len()..].trim().to_string();
                let stripped = text.replace(&format!("{LOCATION_LABEL} {location}"), "");
                ad.description = Some(stripped.trim().to_string());
                ad.location = Some(location);
            }

            if let Some(pos) = text.find(SIZE_LABEL) {
                let size = text[pos + SIZE_LABEL.len()..]
                    .split('\n')
                    .next()
                    .unwrap_or_default()
                    .trim();
                ad.size = Some(size.to_string());
            }
        }

        if let Some(el) = item.select(&self.price).next() {
            // The price element pads with non-breaking spaces.
            let price = el.text().collect::<String>().replace('\u{a0}', "");
            ad.price = Some(price.trim().to_string());
        }

        if let Some(href) = item
            .select(&self.link)
            .next()
            .and_then(|el| el.value().attr("href"))
        {
            ad.link = Some(format!("{SITE_ORIGIN}{href}"));
        }

        ad
    }
}

fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_LISTING: &str = r#"
        <html><body><ul>
          <li class="EntityList-item--Regular">
            <h3 class="entity-title"><a class="link" href="/nekretnine/stan-tresnjevka-123">Stan Trešnjevka</a></h3>
            <div class="entity-description-main">Stambena površina: 54 m2
Lokacija: Zagreb, Trešnjevka</div>
            <strong class="price--hrk">650&nbsp;&euro;/mj</strong>
          </li>
          <li class="EntityList-item--Regular">
            <h3 class="entity-title"><a class="link" href="/nekretnine/stan-centar-456">Stan centar</a></h3>
            <div class="entity-description-main">Lijep stan u centru</div>
          </li>
        </ul></body></html>
    "#;

    #[test]
    fn extracts_one_record_per_listing_block() {
        let parser = AdListParser::new().unwrap();
        let ads = parser.extract(FULL_LISTING).unwrap();
        assert_eq!(ads.len(), 2);
    }

    #[test]
    fn fully_populated_listing_maps_all_fields() {
        let parser = AdListParser::new().unwrap();
        let ads = parser.extract(FULL_LISTING).unwrap();

        let ad = &ads[0];
        assert_eq!(ad.title.as_deref(), Some("Stan Trešnjevka"));
        assert_eq!(ad.size.as_deref(), Some("54 m2"));
        assert_eq!(ad.location.as_deref(), Some("Zagreb, Trešnjevka"));
        assert_eq!(ad.price.as_deref(), Some("650€/mj"));
        assert_eq!(ad.description.as_deref(), Some("Stambena površina: 54 m2"));
        assert_eq!(
            ad.link.as_deref(),
            Some("https://www.njuskalo.hr/nekretnine/stan-tresnjevka-123")
        );
    }

    #[test]
    fn missing_fragments_omit_fields_without_error() {
        let parser = AdListParser::new().unwrap();
        let ads = parser.extract(FULL_LISTING).unwrap();

        let ad = &ads[1];
        assert_eq!(ad.title.as_deref(), Some("Stan centar"));
        assert_eq!(ad.size, None);
        assert_eq!(ad.location, None);
        assert_eq!(ad.price, None);
        // No labels in the block, so the description field stays absent too.
        assert_eq!(ad.description, None);
        assert!(ad.link.is_some());
    }

    #[test]
    fn non_listing_items_are_ignored() {
        let html = r#"
            <ul>
              <li class="EntityList-item--Banner">ad banner</li>
              <li class="EntityList-item--Regular">
                <h3 class="entity-title">Samo naslov</h3>
              </li>
            </ul>
        "#;
        let parser = AdListParser::new().unwrap();
        let ads = parser.extract(html).unwrap();
        assert_eq!(ads.len(), 1);
        assert_eq!(ads[0].title.as_deref(), Some("Samo naslov"));
    }

    #[test]
    fn location_scan_runs_over_the_original_text_and_captures_to_block_end() {
        // Size label on the same line as the location label: the location
        // value swallows it, and the size scan still finds its own label.
        let html = r#"
            <li class="EntityList-item--Regular">
              <div class="entity-description-main">Lokacija: Zagreb, Stambena površina: 50 m2</div>
            </li>
        "#;
        let parser = AdListParser::new().unwrap();
        let ads = parser.extract(html).unwrap();

        let ad = &ads[0];
        assert_eq!(
            ad.location.as_deref(),
            Some("Zagreb, Stambena površina: 50 m2")
        );
        assert_eq!(ad.size.as_deref(), Some("50 m2"));
        // The whole block was `Lokacija: <value>`, so nothing remains.
        assert_eq!(ad.description.as_deref(), Some(""));
    }

    #[test]
    fn size_is_truncated_at_the_first_line_break() {
        let html = "<li class=\"EntityList-item--Regular\">\
            <div class=\"entity-description-main\">Stambena površina: 75 m2\nNovogradnja</div>\
            </li>";
        let parser = AdListParser::new().unwrap();
        let ads = parser.extract(html).unwrap();
        assert_eq!(ads[0].size.as_deref(), Some("75 m2"));
    }

    #[test]
    fn empty_input_is_a_parse_failure() {
        let parser = AdListParser::new().unwrap();
        assert!(matches!(
            parser.extract("   \n  "),
            Err(ParseError::EmptyDocument)
        ));
    }

    #[test]
    fn page_without_listings_yields_empty_set() {
        let parser = AdListParser::new().unwrap();
        let ads = parser.extract("<html><body><p>nista</p></body></html>").unwrap();
        assert!(ads.is_empty());
    }
}
