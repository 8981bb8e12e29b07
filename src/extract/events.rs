use super::{first_attr, first_text, selector, Extracted};
use crate::constants::{EVENT_CARD_SELECTOR, EVENT_END_SELECTOR, EVENT_START_SELECTOR, EVENT_TITLE_SELECTOR};
use crate::error::CrawlError;
use crate::types::EventRecord;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

static CARD: Lazy<Selector> = Lazy::new(|| selector(EVENT_CARD_SELECTOR));
static TITLE: Lazy<Selector> = Lazy::new(|| selector(EVENT_TITLE_SELECTOR));
static START: Lazy<Selector> = Lazy::new(|| selector(EVENT_START_SELECTOR));
static END: Lazy<Selector> = Lazy::new(|| selector(EVENT_END_SELECTOR));

/// Reads every event card on a venue's events page, in document order.
///
/// The start date is required; a missing end date means a one-day event.
pub fn extract_events(markup: &str) -> Extracted<EventRecord> {
    let document = Html::parse_document(markup);
    let mut out = Extracted::default();

    for (index, card) in document.select(&CARD).enumerate() {
        match read_event(&card, index) {
            Ok(event) => out.records.push(event),
            Err(e) => {
                warn!(error = %e, "dropping event card");
                out.skipped.push(e);
            }
        }
    }

    debug!(events = out.records.len(), skipped = out.skipped.len(), "extracted events");
    out
}

fn read_event(card: &ElementRef, index: usize) -> Result<EventRecord, CrawlError> {
    let title = first_text(card, &TITLE).unwrap_or_default();
    let context = || {
        if title.is_empty() {
            format!("event card #{}", index + 1)
        } else {
            format!("event {title:?}")
        }
    };

    let starts = date_attr(card, &START).ok_or_else(|| CrawlError::MissingField {
        field: "startDate",
        context: context(),
    })?;
    let ends = match first_attr(card, &END, "content").or_else(|| first_attr(card, &END, "datetime")) {
        Some(raw) => parse_day(raw).ok_or_else(|| CrawlError::MissingField {
            field: "endDate",
            context: context(),
        })?,
        None => starts,
    };

    EventRecord::for_days(title.clone(), starts, ends).ok_or_else(|| CrawlError::InvalidDateRange {
        title: title.clone(),
        starts: starts.to_string(),
        ends: ends.to_string(),
    })
}

fn date_attr(card: &ElementRef, sel: &Selector) -> Option<NaiveDate> {
    first_attr(card, sel, "content")
        .or_else(|| first_attr(card, sel, "datetime"))
        .and_then(parse_day)
}

/// Accepts `2024-03-01`, an RFC 3339 timestamp, or `01/03/2024`.
fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let (Some(date), Some(rest)) = (raw.get(..10), raw.get(10..)) {
        if rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ') {
            if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                return Some(day);
            }
        }
    }
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS: &str = include_str!("../../tests/resources/events_page.html");

    #[test]
    fn reads_events_in_page_order() {
        let out = extract_events(EVENTS);
        let titles: Vec<&str> = out.records.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Amleto", "La Locandiera", "Serata unica"]);
    }

    #[test]
    fn normalizes_dates_to_day_bounds() {
        let out = extract_events(EVENTS);
        let amleto = &out.records[0];
        assert_eq!(amleto.starts_at.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(
            amleto.ends_at.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            "2024-03-10 23:59:59.999"
        );

        // Timestamp in the attribute only contributes its date.
        let locandiera = &out.records[1];
        assert_eq!(locandiera.starts_at.format("%Y-%m-%d").to_string(), "2024-04-05");
        assert_eq!(locandiera.ends_at.format("%Y-%m-%d").to_string(), "2024-04-07");
    }

    #[test]
    fn missing_end_date_means_single_day() {
        let out = extract_events(EVENTS);
        let serata = &out.records[2];
        assert_eq!(serata.starts_at.format("%Y-%m-%d").to_string(), "2024-05-18");
        assert_eq!(serata.ends_at.format("%Y-%m-%d").to_string(), "2024-05-18");
    }

    #[test]
    fn card_without_start_date_is_dropped_with_diagnostic() {
        let out = extract_events(EVENTS);
        assert_eq!(out.skipped.len(), 1);
        match &out.skipped[0] {
            CrawlError::MissingField { field, context } => {
                assert_eq!(*field, "startDate");
                assert_eq!(context, "event \"Prossimamente\"");
            }
            other => panic!("expected missing field, got {other:?}"),
        }
    }

    #[test]
    fn inverted_range_is_dropped() {
        let html = r#"
            <div id="mdb_lista"><article>
              <header><h1><span>Al contrario</span></h1></header>
              <meta itemprop="startDate" content="2024-06-10">
              <meta itemprop="endDate" content="2024-06-01">
            </article></div>"#;
        let out = extract_events(html);
        assert!(out.records.is_empty());
        assert!(matches!(out.skipped[0], CrawlError::InvalidDateRange { .. }));
    }

    #[test]
    fn accepts_italian_day_first_dates() {
        assert_eq!(parse_day("01/03/2024"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_day("2024-03-01T20:30:00+01:00"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_day("2024-03-01 20:30"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_day("domani"), None);
    }

    #[test]
    fn trailing_garbage_after_date_is_rejected() {
        assert_eq!(parse_day("2024-03-01garbage"), None);
        assert_eq!(parse_day("2024-03-01Z"), None);
    }
}
