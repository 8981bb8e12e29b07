use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Latitude/longitude pair. Serialized as a two-element array `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lng]
    }
}

/// One scheduled event, with its bounds widened to whole days in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl EventRecord {
    /// Builds a record spanning 00:00:00.000 of `start` to 23:59:59.999 of `end`.
    ///
    /// Returns `None` when `end` falls before `start`.
    pub fn for_days(title: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if end < start {
            return None;
        }
        let starts_at = start.and_hms_opt(0, 0, 0)?.and_utc();
        let ends_at = end.and_hms_milli_opt(23, 59, 59, 999)?.and_utc();
        Some(Self {
            title: title.into(),
            starts_at,
            ends_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueRecord {
    pub name: String,
    pub coords: Coordinate,
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

/// A venue as read from a listing page, before its events page is visited.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueDraft {
    pub name: String,
    pub coords: Coordinate,
    pub events_link: Option<Url>,
}

impl VenueDraft {
    pub fn into_record(self, events: Vec<EventRecord>) -> VenueRecord {
        VenueRecord {
            name: self.name,
            coords: self.coords,
            events,
        }
    }
}

/// The persisted shape of `venues.json`.
#[derive(Debug, Serialize)]
pub struct Document<'a> {
    pub venues: &'a [VenueRecord],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_record_covers_whole_days() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let event = EventRecord::for_days("Amleto", start, end).unwrap();

        assert_eq!(event.starts_at.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(
            event.ends_at.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            "2024-03-03T23:59:59.999"
        );
        assert!(event.starts_at <= event.ends_at);
    }

    #[test]
    fn event_record_rejects_inverted_range() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(EventRecord::for_days("Amleto", start, end).is_none());
    }

    #[test]
    fn venue_serializes_with_array_coords_and_camel_case_events() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let venue = VenueRecord {
            name: "Teatro Carcano".to_string(),
            coords: Coordinate::new(45.4557, 9.1979),
            events: vec![EventRecord::for_days("Amleto", day, day).unwrap()],
        };

        let json = serde_json::to_value(&venue).unwrap();
        assert_eq!(json["coords"], serde_json::json!([45.4557, 9.1979]));
        assert_eq!(json["events"][0]["startsAt"], "2024-03-01T00:00:00Z");
        assert_eq!(json["events"][0]["endsAt"], "2024-03-01T23:59:59.999Z");
    }
}
