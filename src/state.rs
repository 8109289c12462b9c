use log::debug;

use crate::data::aggregate::{binned_counts, place_counts, AggregationAxis, BinCount};
use crate::data::filter::{filtered_indices, FilterCriteria, FilterDimension};
use crate::data::model::{Catalog, Event, FacetDimension};

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// The engine's complete state: inputs plus cached derived views.
///
/// Inputs are the catalog, the filter criteria, and the aggregation axis.
/// Every mutator updates exactly one input and then recomputes all dependent
/// views synchronously before returning, so readers never observe a filtered
/// subset or aggregate derived from anything but the last committed inputs.
/// Facets live in the catalog and change only when the records do.
///
/// Single-threaded; callers sharing it across threads must hold one lock
/// around the whole struct per recompute cycle.
pub struct ViewState {
    /// Loaded record set (None until a feed is ingested).
    catalog: Option<Catalog>,

    /// Active filter constraints.
    criteria: FilterCriteria,

    /// Field the histogram aggregates over.
    axis: AggregationAxis,

    /// Indices of events passing the current criteria (cached, feed order).
    filtered: Vec<usize>,

    /// Per-place counts over the filtered subset (cached).
    place_counts: Vec<BinCount>,

    /// Histogram over the filtered subset for the current axis (cached;
    /// empty under the `Place` axis, which `place_counts` serves).
    binned_counts: Vec<BinCount>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            catalog: None,
            criteria: FilterCriteria::default(),
            axis: AggregationAxis::default(),
            filtered: Vec::new(),
            place_counts: Vec::new(),
            binned_counts: Vec::new(),
        }
    }
}

impl ViewState {
    /// Ingest a new record set. The only path that rebuilds facets.
    pub fn set_records(&mut self, events: Vec<Event>) {
        self.set_catalog(Catalog::from_events(events));
    }

    /// Ingest an already-built catalog (e.g. straight from the loader).
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = Some(catalog);
        self.recompute();
    }

    /// Set or clear (empty value) one filter constraint.
    pub fn set_filter(&mut self, dimension: FilterDimension, value: &str) {
        self.criteria.set(dimension, value);
        self.recompute();
    }

    /// Switch the histogram axis.
    pub fn set_aggregation_axis(&mut self, axis: AggregationAxis) {
        self.axis = axis;
        self.recompute();
    }

    /// Recompute every derived view from the current inputs.
    ///
    /// Full pass over the record set each time; no incremental diffing.
    fn recompute(&mut self) {
        let Some(catalog) = &self.catalog else {
            self.filtered.clear();
            self.place_counts.clear();
            self.binned_counts.clear();
            return;
        };

        self.filtered = filtered_indices(&catalog.events, &self.criteria);

        let subset = self.filtered.iter().map(|&i| &catalog.events[i]);
        self.place_counts = place_counts(subset.clone());
        self.binned_counts = binned_counts(subset, self.axis);

        debug!(
            "recomputed views: {}/{} events pass, {} places, {} bins",
            self.filtered.len(),
            catalog.len(),
            self.place_counts.len(),
            self.binned_counts.len()
        );
    }

    // ---- Read-side accessors ----

    /// Events passing the current criteria, in feed order.
    pub fn filtered_records(&self) -> impl Iterator<Item = &Event> {
        let events = self.catalog.as_ref().map(|c| c.events.as_slice()).unwrap_or(&[]);
        self.filtered.iter().map(move |&i| &events[i])
    }

    /// Sorted distinct values for one facet dimension, over the full record
    /// set (unaffected by active filters).
    pub fn facet_values(&self, dimension: FacetDimension) -> &[String] {
        self.catalog
            .as_ref()
            .map(|c| c.facets.values(dimension))
            .unwrap_or(&[])
    }

    /// Per-place counts over the filtered subset.
    pub fn place_counts(&self) -> &[BinCount] {
        &self.place_counts
    }

    /// Histogram bins over the filtered subset for the current axis.
    pub fn binned_counts(&self) -> &[BinCount] {
        &self.binned_counts
    }

    /// The active filter criteria.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The active aggregation axis.
    pub fn aggregation_axis(&self) -> AggregationAxis {
        self.axis
    }
}
