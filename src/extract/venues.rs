use super::{first_attr, first_text, selector, Extracted};
use crate::constants::{EVENTS_LINK_SELECTOR, MAP_LINK_SELECTOR, VENUE_CARD_SELECTOR, VENUE_NAME_SELECTOR};
use crate::coords::decode_map_link;
use crate::error::{CrawlError, LinkError};
use crate::types::VenueDraft;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

static CARD: Lazy<Selector> = Lazy::new(|| selector(VENUE_CARD_SELECTOR));
static NAME: Lazy<Selector> = Lazy::new(|| selector(VENUE_NAME_SELECTOR));
static MAP_LINK: Lazy<Selector> = Lazy::new(|| selector(MAP_LINK_SELECTOR));
static EVENTS_LINK: Lazy<Selector> = Lazy::new(|| selector(EVENTS_LINK_SELECTOR));

/// Reads every venue card on a listing page, in document order.
///
/// A card whose map link cannot be decoded is skipped; a card without a name
/// is kept with an empty one. Events links are resolved against `base`.
pub fn extract_venues(markup: &str, base: &Url) -> Extracted<VenueDraft> {
    let document = Html::parse_document(markup);
    let mut out = Extracted::default();

    for (index, card) in document.select(&CARD).enumerate() {
        let name = first_text(&card, &NAME).unwrap_or_default();
        let link = first_attr(&card, &MAP_LINK, "href");

        let coords = match link.ok_or(LinkError::Absent).and_then(decode_map_link) {
            Ok(coords) => coords,
            Err(reason) => {
                let venue = if name.is_empty() {
                    format!("card #{} on {}", index + 1, base)
                } else {
                    name.clone()
                };
                warn!(%venue, %reason, "dropping venue with unusable map link");
                out.skipped.push(CrawlError::MalformedLink {
                    link: link.unwrap_or_default().to_string(),
                    venue,
                    reason,
                });
                continue;
            }
        };

        let events_link = first_attr(&card, &EVENTS_LINK, "href").and_then(|href| match base.join(href.trim()) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(venue = %name, href, error = %e, "ignoring unresolvable events link");
                None
            }
        });

        out.records.push(VenueDraft {
            name,
            coords,
            events_link,
        });
    }

    debug!(
        page = %base,
        venues = out.records.len(),
        skipped = out.skipped.len(),
        "extracted venues"
    );
    out
}
