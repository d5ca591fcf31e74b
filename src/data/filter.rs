use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::CovidTable;

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Current sidebar selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Selected locations. Empty means nothing is shown.
    pub locations: BTreeSet<String>,
    /// Expected to be `[start, end]`; anything shorter disables date filtering.
    pub dates: Vec<NaiveDate>,
}

/// Non-fatal conditions the UI should surface next to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterWarning {
    /// Fewer than two dates were given; only the location filter was applied.
    IncompleteDateRange,
}

impl FilterWarning {
    pub fn message(&self) -> &'static str {
        match self {
            FilterWarning::IncompleteDateRange => "Please select both start and end dates",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub table: CovidTable,
    pub warning: Option<FilterWarning>,
}

/// Return the rows whose location is selected and whose date lies in
/// `[dates[0], dates[1]]` (inclusive).
///
/// With fewer than two dates the interval is ignored and
/// [`FilterWarning::IncompleteDateRange`] is reported.
pub fn apply_filter(table: &CovidTable, filters: &FilterState) -> FilterOutcome {
    let interval = match filters.dates.as_slice() {
        [start, end, ..] => Some((*start, *end)),
        _ => None,
    };

    let rows = table
        .iter()
        .filter(|obs| filters.locations.contains(&obs.location))
        .filter(|obs| match interval {
            Some((start, end)) => start <= obs.date && obs.date <= end,
            None => true,
        })
        .cloned()
        .collect();

    FilterOutcome {
        table: CovidTable::from_rows(rows),
        warning: interval
            .is_none()
            .then_some(FilterWarning::IncompleteDateRange),
    }
}

// ---------------------------------------------------------------------------
// Default selection
// ---------------------------------------------------------------------------

/// How the location multi-select is populated when a dataset is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Every `step`-th location among the first `limit` distinct ones.
    Strided { limit: usize, step: usize },
    /// The first `count` distinct locations.
    First { count: usize },
    /// Every location.
    All,
    /// An explicit list; names not present in the data are ignored.
    Named { locations: Vec<String> },
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::Strided { limit: 50, step: 10 }
    }
}

impl SelectionPolicy {
    /// Apply the policy to `locations` (distinct, in first-appearance order).
    pub fn select(&self, locations: &[String]) -> BTreeSet<String> {
        match self {
            SelectionPolicy::Strided { limit, step } => locations
                .iter()
                .take(*limit)
                .step_by((*step).max(1))
                .cloned()
                .collect(),
            SelectionPolicy::First { count } => locations.iter().take(*count).cloned().collect(),
            SelectionPolicy::All => locations.iter().cloned().collect(),
            SelectionPolicy::Named { locations: wanted } => locations
                .iter()
                .filter(|loc| wanted.contains(*loc))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{date, obs, two_countries};

    fn select(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_only_selected_locations_within_interval() {
        let table = two_countries();
        let filters = FilterState {
            locations: select(&["Countryland", "Otherland"]),
            dates: vec![date("2021-03-02"), date("2021-03-03")],
        };
        let out = apply_filter(&table, &filters);

        assert_eq!(out.warning, None);
        assert_eq!(out.table.len(), 3);
        for row in out.table.iter() {
            assert!(filters.locations.contains(&row.location));
            assert!(date("2021-03-02") <= row.date && row.date <= date("2021-03-03"));
        }
        // Nothing inside the selection was lost.
        let expected = table
            .iter()
            .filter(|o| o.date >= date("2021-03-02"))
            .count();
        assert_eq!(out.table.len(), expected);
    }

    #[test]
    fn interval_bounds_are_inclusive() {
        let table = two_countries();
        let filters = FilterState {
            locations: select(&["Countryland"]),
            dates: vec![date("2021-03-01"), date("2021-03-01")],
        };
        let out = apply_filter(&table, &filters);
        assert_eq!(out.table.len(), 1);
        assert_eq!(out.table.rows[0].total_cases, 10.0);
    }

    #[test]
    fn single_date_falls_back_to_location_only_with_warning() {
        let table = two_countries();
        let by_location = FilterState {
            locations: select(&["Otherland"]),
            dates: vec![],
        };
        let single = FilterState {
            dates: vec![date("2021-03-02")],
            ..by_location.clone()
        };

        let a = apply_filter(&table, &by_location);
        let b = apply_filter(&table, &single);
        assert_eq!(a.table, b.table);
        assert_eq!(b.table.len(), 2);
        assert_eq!(b.warning, Some(FilterWarning::IncompleteDateRange));
    }

    #[test]
    fn empty_or_unknown_selection_yields_empty_table() {
        let table = two_countries();
        let dates = vec![date("2021-03-01"), date("2021-03-03")];

        let none = FilterState {
            locations: BTreeSet::new(),
            dates: dates.clone(),
        };
        assert!(apply_filter(&table, &none).table.is_empty());

        let unknown = FilterState {
            locations: select(&["Atlantis"]),
            dates,
        };
        let out = apply_filter(&table, &unknown);
        assert!(out.table.is_empty());
        assert_eq!(out.warning, None);
    }

    #[test]
    fn reversed_interval_matches_nothing() {
        let table = two_countries();
        let filters = FilterState {
            locations: select(&["Countryland"]),
            dates: vec![date("2021-03-03"), date("2021-03-01")],
        };
        assert!(apply_filter(&table, &filters).table.is_empty());
    }

    #[test]
    fn countryland_full_range_scenario() {
        let table = two_countries();
        let (start, end) = table.date_bounds().unwrap();
        let filters = FilterState {
            locations: select(&["Countryland"]),
            dates: vec![start, end],
        };
        let out = apply_filter(&table, &filters);
        assert_eq!(out.table.len(), 3);
        assert!(out.table.iter().all(|o| o.location == "Countryland"));
    }

    #[test]
    fn strided_default_takes_every_tenth_of_first_fifty() {
        let locations: Vec<String> = (0..80).map(|i| format!("L{i:02}")).collect();
        let picked = SelectionPolicy::default().select(&locations);
        assert_eq!(picked, select(&["L00", "L10", "L20", "L30", "L40"]));
    }

    #[test]
    fn other_policies() {
        let table = CovidTable::from_rows(vec![
            obs("Alpha", "2021-01-01", 1.0, None),
            obs("Beta", "2021-01-01", 1.0, None),
            obs("Gamma", "2021-01-01", 1.0, None),
        ]);
        let locations = table.locations();

        assert_eq!(
            SelectionPolicy::First { count: 2 }.select(&locations),
            select(&["Alpha", "Beta"])
        );
        assert_eq!(SelectionPolicy::All.select(&locations).len(), 3);
        assert_eq!(
            SelectionPolicy::Named {
                locations: vec!["Gamma".into(), "Atlantis".into()]
            }
            .select(&locations),
            select(&["Gamma"])
        );
        // A zero step behaves like a step of one.
        assert_eq!(
            SelectionPolicy::Strided { limit: 2, step: 0 }.select(&locations),
            select(&["Alpha", "Beta"])
        );
    }
}
