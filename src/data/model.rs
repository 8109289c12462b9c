use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Event – one row of the feed
// ---------------------------------------------------------------------------

/// A single normalized seismic event (one row of the source feed).
///
/// Immutable once built; all derived fields (`short_place`, the date
/// components) are fixed at normalization time.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Opaque unique identifier. Uniqueness is assumed, not enforced.
    pub id: String,
    /// Origin time of the event (UTC).
    pub time: DateTime<Utc>,
    /// Degrees, signed.
    pub latitude: f64,
    /// Degrees, signed.
    pub longitude: f64,
    /// Kilometres; may be negative (above the reference datum).
    pub depth: f64,
    /// Unitless.
    pub magnitude: f64,
    /// Full free-text place description, e.g. "5 km NE of X, California".
    pub place: String,
    /// Trailing comma-separated segment of `place` ("California" above);
    /// equal to `place` when no comma is present.
    pub short_place: String,
    /// Free-text category, e.g. "earthquake", "quarry blast".
    pub event_type: String,
}

impl Event {
    /// Build an event from a raw feed row.
    ///
    /// The only hard failure is an unparseable timestamp. Numeric fields that
    /// fail to parse become `NaN` and the row is retained, matching the
    /// permissive behavior of the upstream feed consumers.
    pub fn from_raw(raw: RawRecord) -> Result<Event, NormalizeError> {
        let time = DateTime::parse_from_rfc3339(raw.time.trim())
            .map_err(|_| NormalizeError::BadTimestamp {
                id: raw.id.clone(),
                time: raw.time.clone(),
            })?
            .with_timezone(&Utc);

        let short_place = short_place(&raw.place);

        Ok(Event {
            id: raw.id,
            time,
            latitude: lenient_float(&raw.latitude),
            longitude: lenient_float(&raw.longitude),
            depth: lenient_float(&raw.depth),
            magnitude: lenient_float(&raw.mag),
            place: raw.place,
            short_place,
            event_type: raw.event_type,
        })
    }

    /// Four-digit year of the origin time (UTC calendar).
    pub fn year(&self) -> String {
        format!("{:04}", self.time.year())
    }

    /// Zero-padded month ("01".."12").
    pub fn month(&self) -> String {
        format!("{:02}", self.time.month())
    }

    /// Zero-padded day of month ("01".."31").
    pub fn day(&self) -> String {
        format!("{:02}", self.time.day())
    }
}

/// Extract the short place: the text after the last comma, trimmed.
pub fn short_place(place: &str) -> String {
    match place.rsplit_once(',') {
        Some((_, tail)) => tail.trim().to_string(),
        None => place.trim().to_string(),
    }
}

/// Parse a numeric feed field, keeping unparseable input as `NaN`.
fn lenient_float(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// RawRecord – unparsed string fields straight from the feed
// ---------------------------------------------------------------------------

/// One raw feed row before normalization. All fields are strings; the loader
/// fills them from CSV columns or JSON object members of the same names.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub id: String,
    pub time: String,
    pub latitude: String,
    pub longitude: String,
    pub depth: String,
    pub mag: String,
    pub place: String,
    pub event_type: String,
}

/// Normalization failure: the row cannot become a usable [`Event`].
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("record '{id}': unparseable timestamp '{time}'")]
    BadTimestamp { id: String, time: String },
}

// ---------------------------------------------------------------------------
// Facets – sorted distinct values per filterable dimension
// ---------------------------------------------------------------------------

/// A filterable categorical dimension of the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetDimension {
    Year,
    Month,
    Day,
    Place,
    Type,
}

/// Sorted distinct values observed for each facet dimension.
///
/// Always derived from the full record set, never from a filtered subset, so
/// selection controls list every value a user can pivot to regardless of the
/// other active filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    pub years: Vec<String>,
    pub months: Vec<String>,
    pub days: Vec<String>,
    pub places: Vec<String>,
    pub types: Vec<String>,
}

impl Facets {
    /// Scan the record set once and collect the distinct values per dimension.
    pub fn from_events(events: &[Event]) -> Self {
        fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
            // BTreeSet gives dedup + ascending order in one pass.
            values.collect::<BTreeSet<_>>().into_iter().collect()
        }

        Facets {
            years: distinct(events.iter().map(Event::year)),
            months: distinct(events.iter().map(Event::month)),
            days: distinct(events.iter().map(Event::day)),
            places: distinct(events.iter().map(|e| e.short_place.clone())),
            types: distinct(events.iter().map(|e| e.event_type.clone())),
        }
    }

    /// The value list for one dimension.
    pub fn values(&self, dimension: FacetDimension) -> &[String] {
        match dimension {
            FacetDimension::Year => &self.years,
            FacetDimension::Month => &self.months,
            FacetDimension::Day => &self.days,
            FacetDimension::Place => &self.places,
            FacetDimension::Type => &self.types,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded record set
// ---------------------------------------------------------------------------

/// The full record set with its precomputed facet index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// All events, in feed order.
    pub events: Vec<Event>,
    /// Facet value lists, computed once here and never on filter changes.
    pub facets: Facets,
}

impl Catalog {
    /// Build the catalog and its facet index from normalized events.
    pub fn from_events(events: Vec<Event>) -> Self {
        let facets = Facets::from_events(&events);
        Catalog { events, facets }
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) fn test_event(
    id: &str,
    time: &str,
    latitude: f64,
    longitude: f64,
    depth: f64,
    magnitude: f64,
    place: &str,
    event_type: &str,
) -> Event {
    Event {
        id: id.to_string(),
        time: DateTime::parse_from_rfc3339(time)
            .expect("fixture timestamp")
            .with_timezone(&Utc),
        latitude,
        longitude,
        depth,
        magnitude,
        place: place.to_string(),
        short_place: short_place(place),
        event_type: event_type.to_string(),
    }
}
