use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde_json::Value as JsonValue;

use super::model::{Catalog, Event, RawRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Feed column names, in canonical order.
const FEED_COLUMNS: [&str; 8] = [
    "id", "time", "latitude", "longitude", "depth", "mag", "place", "type",
];

/// Load an already-downloaded event feed from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row naming the feed columns (extra columns ignored)
/// * `.json` – top-level array of record objects with the same field names
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Normalize raw rows into a catalog, skipping rows the normalizer rejects.
///
/// Skips are logged per row and counted; feed rows with malformed numeric
/// fields are not skips — they come through with `NaN` fields (see
/// [`Event::from_raw`]).
fn normalize_rows(rows: Vec<RawRecord>) -> Catalog {
    let total = rows.len();
    let mut events = Vec::with_capacity(total);
    let mut skipped = 0usize;

    for raw in rows {
        match Event::from_raw(raw) {
            Ok(event) => events.push(event),
            Err(err) => {
                warn!("skipping feed row: {err}");
                skipped += 1;
            }
        }
    }

    info!("loaded {} of {total} feed rows ({skipped} skipped)", events.len());
    Catalog::from_events(events)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// The monthly feed ships as CSV with a header row. Columns are located by
/// name so the feed may carry extra columns (the USGS feed has a dozen more)
/// in any order.
fn load_csv(path: &Path) -> Result<Catalog> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut column_idx = [0usize; FEED_COLUMNS.len()];
    for (slot, name) in column_idx.iter_mut().zip(FEED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))?;
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |i: usize| record.get(column_idx[i]).unwrap_or("").to_string();

        rows.push(RawRecord {
            id: field(0),
            time: field(1),
            latitude: field(2),
            longitude: field(3),
            depth: field(4),
            mag: field(5),
            place: field(6),
            event_type: field(7),
        });
    }

    Ok(normalize_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "id": "nc75095651",
///     "time": "2024-05-04T03:02:01.500Z",
///     "latitude": 38.82,
///     "longitude": -122.84,
///     "depth": 1.96,
///     "mag": 0.67,
///     "place": "7 km NW of The Geysers, CA",
///     "type": "earthquake"
///   },
///   ...
/// ]
/// ```
///
/// Numeric fields may be JSON numbers or strings; both go through the same
/// lenient normalization as CSV fields.
fn load_json(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let field = |name: &str| json_field_to_string(obj.get(name));

        rows.push(RawRecord {
            id: field("id"),
            time: field("time"),
            latitude: field("latitude"),
            longitude: field("longitude"),
            depth: field("depth"),
            mag: field("mag"),
            place: field("place"),
            event_type: field("type"),
        });
    }

    Ok(normalize_rows(rows))
}

/// Flatten a JSON member to the raw string form the normalizer expects.
fn json_field_to_string(val: Option<&JsonValue>) -> String {
    match val {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::Bool(b)) => b.to_string(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
