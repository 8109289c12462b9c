use std::collections::BTreeMap;

use serde::Serialize;

use super::model::Event;

/// Number of histogram bins for numeric axes.
pub const HISTOGRAM_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Aggregation axis
// ---------------------------------------------------------------------------

/// The field a bar chart aggregates over: one numeric axis, or the special
/// categorical `Place` axis served by [`place_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationAxis {
    #[default]
    Place,
    Latitude,
    Longitude,
    Depth,
    Magnitude,
}

impl AggregationAxis {
    /// The event's value on this axis, or `None` for the categorical axis.
    pub fn numeric_value(self, event: &Event) -> Option<f64> {
        match self {
            AggregationAxis::Place => None,
            AggregationAxis::Latitude => Some(event.latitude),
            AggregationAxis::Longitude => Some(event.longitude),
            AggregationAxis::Depth => Some(event.depth),
            AggregationAxis::Magnitude => Some(event.magnitude),
        }
    }
}

// ---------------------------------------------------------------------------
// Grouped counts
// ---------------------------------------------------------------------------

/// One bar of an aggregate view: a label and how many events fall under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinCount {
    pub label: String,
    pub count: usize,
}

/// Count filtered events per short place, ordered by place name.
///
/// Only places present in the subset appear; a place filtered down to zero
/// matches is omitted rather than reported as a zero bar.
pub fn place_counts<'a>(filtered: impl Iterator<Item = &'a Event>) -> Vec<BinCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for event in filtered {
        *counts.entry(event.short_place.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| BinCount {
            label: label.to_string(),
            count,
        })
        .collect()
}

/// Bin the filtered subset's values on a numeric axis into
/// [`HISTOGRAM_BINS`] equal-width bins over `[min, max]`.
///
/// All bins are emitted, zero-count ones included, so chart axes stay stable
/// regardless of data sparsity. Labels are each bin's lower edge to two
/// decimal places. The maximum value is clamped into the last bin.
///
/// Non-finite values (rows whose field failed to parse) carry no position on
/// the axis and are excluded here, even though they still appear in the
/// filtered subset and in [`place_counts`].
///
/// Degenerate cases: no finite values yields an empty result; `min == max`
/// yields a single bin holding the full count.
pub fn binned_counts<'a>(
    filtered: impl Iterator<Item = &'a Event>,
    axis: AggregationAxis,
) -> Vec<BinCount> {
    let values: Vec<f64> = filtered
        .filter_map(|e| axis.numeric_value(e))
        .filter(|v| v.is_finite())
        .collect();

    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![BinCount {
            label: format!("{min:.2}"),
            count: values.len(),
        }];
    }

    let bin_size = (max - min) / HISTOGRAM_BINS as f64;
    let mut counts = [0usize; HISTOGRAM_BINS];
    for v in &values {
        let i = (((v - min) / bin_size) as usize).min(HISTOGRAM_BINS - 1);
        counts[i] += 1;
    }

    (0..HISTOGRAM_BINS)
        .map(|i| BinCount {
            label: format!("{:.2}", min + i as f64 * bin_size),
            count: counts[i],
        })
        .collect()
}
