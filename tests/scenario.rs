//! End-to-end scenario: load a small feed, stack filters, and check every
//! derived view an interactive viewer would render.

use std::io::Write;

use pretty_assertions::assert_eq;
use quake_lens::{
    load_file, AggregationAxis, FacetDimension, FilterDimension, ViewState,
};

const FEED: &str = "\
id,time,latitude,longitude,depth,mag,place,type
a,2024-05-04T10:00:00Z,39.5,-119.8,10,5.0,\"10 km N of Reno, Nevada\",earthquake
b,2024-05-05T11:00:00Z,48.8,2.3,30,2.0,\"5 km S of Paris, France\",earthquake
c,2024-05-06T12:00:00Z,39.6,-119.7,5,6.5,\"Elsewhere, Nevada\",quarry blast
";

fn load_state() -> ViewState {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(FEED.as_bytes()).unwrap();

    let mut state = ViewState::default();
    state.set_catalog(load_file(file.path()).unwrap());
    state
}

fn filtered_ids(state: &ViewState) -> Vec<String> {
    state.filtered_records().map(|e| e.id.clone()).collect()
}

#[test]
fn stacked_filters_narrow_aggregates_but_not_facets() {
    let mut state = load_state();
    assert_eq!(filtered_ids(&state), vec!["a", "b", "c"]);

    // Minimum magnitude 3.0 keeps A and C; Paris drops out of the place
    // counts by filtering, not by facet removal.
    state.set_filter(FilterDimension::MinMagnitude, "3.0");
    assert_eq!(filtered_ids(&state), vec!["a", "c"]);
    let places: Vec<(&str, usize)> = state
        .place_counts()
        .iter()
        .map(|b| (b.label.as_str(), b.count))
        .collect();
    assert_eq!(places, vec![("Nevada", 2)]);

    // Add a type constraint on top: only C survives.
    state.set_filter(FilterDimension::Type, "quarry blast");
    assert_eq!(filtered_ids(&state), vec!["c"]);

    // The place facet still lists every short place from the full feed.
    assert_eq!(state.facet_values(FacetDimension::Place), ["France", "Nevada"]);
    assert_eq!(state.facet_values(FacetDimension::Type), ["earthquake", "quarry blast"]);
}

#[test]
fn histogram_follows_the_filtered_subset_and_axis() {
    let mut state = load_state();
    state.set_aggregation_axis(AggregationAxis::Depth);

    // Depths 5, 10, 30 → min 5, max 30, ten bins of width 2.5.
    let bins = state.binned_counts();
    assert_eq!(bins.len(), 10);
    assert_eq!(bins[0].label, "5.00");
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);

    // Narrow to one event: degenerate single-bin histogram.
    state.set_filter(FilterDimension::Place, "France");
    assert_eq!(
        state
            .binned_counts()
            .iter()
            .map(|b| (b.label.as_str(), b.count))
            .collect::<Vec<_>>(),
        vec![("30.00", 1)]
    );

    // Filter everything out: empty histogram, no division by zero.
    state.set_filter(FilterDimension::Type, "quarry blast");
    assert_eq!(filtered_ids(&state).len(), 0);
    assert!(state.binned_counts().is_empty());
    assert!(state.place_counts().is_empty());
}

#[test]
fn clearing_filters_restores_the_full_subset() {
    let mut state = load_state();
    state.set_filter(FilterDimension::Year, "2023");
    assert_eq!(filtered_ids(&state).len(), 0);

    state.set_filter(FilterDimension::Year, "");
    assert_eq!(filtered_ids(&state), vec!["a", "b", "c"]);
}
