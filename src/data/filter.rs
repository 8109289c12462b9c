use super::model::Event;

// ---------------------------------------------------------------------------
// Filter criteria: the conjunction of currently active constraints
// ---------------------------------------------------------------------------

/// One filterable dimension, as addressed by the single-setter API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    Year,
    Month,
    Day,
    Place,
    MinMagnitude,
    MinDepth,
    Type,
}

/// The active filter constraints, one optional value per dimension.
///
/// `None` means "no constraint on this dimension" — never "match empty
/// string". The numeric thresholds are held as the raw user input string;
/// see [`parse_optional_float`] for how they become bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact match against the event's four-digit year.
    pub year: Option<String>,
    /// Exact match against the zero-padded month.
    pub month: Option<String>,
    /// Exact match against the zero-padded day of month.
    pub day: Option<String>,
    /// Exact match against `short_place`.
    pub place: Option<String>,
    /// Inclusive lower bound on magnitude (raw string).
    pub min_magnitude: Option<String>,
    /// Inclusive lower bound on depth (raw string).
    pub min_depth: Option<String>,
    /// Exact match against `event_type`.
    pub event_type: Option<String>,
}

impl FilterCriteria {
    /// Set one dimension's constraint. An empty value clears it.
    pub fn set(&mut self, dimension: FilterDimension, value: &str) {
        let slot = match dimension {
            FilterDimension::Year => &mut self.year,
            FilterDimension::Month => &mut self.month,
            FilterDimension::Day => &mut self.day,
            FilterDimension::Place => &mut self.place,
            FilterDimension::MinMagnitude => &mut self.min_magnitude,
            FilterDimension::MinDepth => &mut self.min_depth,
            FilterDimension::Type => &mut self.event_type,
        };
        *slot = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
    }
}

/// Interpret an optional threshold string as a numeric bound.
///
/// Unset input and input that fails to parse both mean "no constraint";
/// invalid user input in a threshold box must never raise an error.
pub fn parse_optional_float(raw: Option<&String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// Whether one event passes every active constraint.
///
/// Total: returns `false` only by predicate logic, never by error. Date
/// components compare independently, so `day == "05"` matches the 5th of
/// every month and year unless those are also constrained. Threshold checks
/// on a `NaN` field fail, so rows with unparseable numerics drop out as soon
/// as the corresponding bound is active.
pub fn matches(event: &Event, criteria: &FilterCriteria) -> bool {
    if let Some(year) = &criteria.year {
        if event.year() != *year {
            return false;
        }
    }
    if let Some(month) = &criteria.month {
        if event.month() != *month {
            return false;
        }
    }
    if let Some(day) = &criteria.day {
        if event.day() != *day {
            return false;
        }
    }
    if let Some(place) = &criteria.place {
        if event.short_place != *place {
            return false;
        }
    }
    if let Some(min_mag) = parse_optional_float(criteria.min_magnitude.as_ref()) {
        if !(event.magnitude >= min_mag) {
            return false;
        }
    }
    if let Some(min_depth) = parse_optional_float(criteria.min_depth.as_ref()) {
        if !(event.depth >= min_depth) {
            return false;
        }
    }
    if let Some(event_type) = &criteria.event_type {
        if event.event_type != *event_type {
            return false;
        }
    }
    true
}

/// Indices of events passing all active criteria, in input order.
pub fn filtered_indices(events: &[Event], criteria: &FilterCriteria) -> Vec<usize> {
    events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches(e, criteria))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::{test_event, Event};

    fn sample() -> Vec<Event> {
        vec![
            test_event("a", "2024-05-04T10:00:00Z", 39.5, -119.8, 10.0, 5.0, "10 km N of Reno, Nevada", "earthquake"),
            test_event("b", "2024-06-05T11:00:00Z", 48.8, 2.3, 30.0, 2.0, "5 km S of Paris, France", "earthquake"),
            test_event("c", "2023-05-05T12:00:00Z", 39.6, -119.7, 5.0, 6.5, "Elsewhere, Nevada", "quarry blast"),
        ]
    }

    #[test]
    fn empty_criteria_match_everything() {
        let events = sample();
        assert_eq!(filtered_indices(&events, &FilterCriteria::default()), vec![0, 1, 2]);
    }

    #[test]
    fn date_components_compare_independently() {
        let events = sample();
        let mut criteria = FilterCriteria::default();
        // Day 05 matches the 5th of any month in any year.
        criteria.set(FilterDimension::Day, "05");
        assert_eq!(filtered_indices(&events, &criteria), vec![1, 2]);

        criteria.set(FilterDimension::Year, "2024");
        assert_eq!(filtered_indices(&events, &criteria), vec![1]);
    }

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        let events = sample();
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterDimension::MinMagnitude, "5.0");
        // mag 5.0 passes (inclusive), 2.0 fails, 6.5 passes.
        assert_eq!(filtered_indices(&events, &criteria), vec![0, 2]);
    }

    #[test]
    fn unparseable_threshold_means_no_constraint() {
        let events = sample();
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterDimension::MinMagnitude, "lots");
        assert_eq!(filtered_indices(&events, &criteria), vec![0, 1, 2]);
        assert_eq!(parse_optional_float(criteria.min_magnitude.as_ref()), None);
        assert_eq!(parse_optional_float(None), None);
    }

    #[test]
    fn nan_field_fails_active_threshold() {
        let mut events = sample();
        events[0].magnitude = f64::NAN;
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterDimension::MinMagnitude, "0.0");
        assert_eq!(filtered_indices(&events, &criteria), vec![1, 2]);
    }

    #[test]
    fn place_matches_short_place_exactly() {
        let events = sample();
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterDimension::Place, "Nevada");
        assert_eq!(filtered_indices(&events, &criteria), vec![0, 2]);
    }

    #[test]
    fn adding_constraints_never_grows_the_subset() {
        let events = sample();
        let mut narrow = FilterCriteria::default();
        narrow.set(FilterDimension::Type, "earthquake");
        let wide_result = filtered_indices(&events, &FilterCriteria::default());
        let narrow_result = filtered_indices(&events, &narrow);
        assert!(narrow_result.iter().all(|i| wide_result.contains(i)));

        let mut narrower = narrow.clone();
        narrower.set(FilterDimension::MinDepth, "20");
        let narrower_result = filtered_indices(&events, &narrower);
        assert!(narrower_result.iter().all(|i| narrow_result.contains(i)));
        assert_eq!(narrower_result, vec![1]);
    }

    #[test]
    fn setting_same_value_twice_is_idempotent() {
        let events = sample();
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterDimension::Type, "quarry blast");
        let first = filtered_indices(&events, &criteria);
        criteria.set(FilterDimension::Type, "quarry blast");
        assert_eq!(filtered_indices(&events, &criteria), first);
    }

    #[test]
    fn empty_value_clears_a_constraint() {
        let events = sample();
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterDimension::Place, "France");
        assert_eq!(filtered_indices(&events, &criteria), vec![1]);
        criteria.set(FilterDimension::Place, "");
        assert_eq!(criteria, FilterCriteria::default());
        assert_eq!(filtered_indices(&events, &criteria), vec![0, 1, 2]);
    }
}
