use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::data::dashboard::{build_snapshot, DashboardSnapshot};
use crate::data::filter::{FilterState, SelectionPolicy};
use crate::data::model::CovidTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Trend,
    Explorer,
    Map,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Full loaded dataset (None until the loader has produced it).
    pub table: Option<Arc<CovidTable>>,

    /// Distinct locations in first-appearance order (multi-select options).
    pub locations: Vec<String>,

    /// Location selection plus the dates derived from the two pickers.
    pub filters: FilterState,

    /// Earliest / latest date in the dataset; pickers are clamped to it.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// Views for the current filters (cached until the next change).
    pub snapshot: Option<DashboardSnapshot>,

    pub color_map: Option<ColorMap>,
    pub active_tab: Tab,

    /// Text typed into the location search box.
    pub location_query: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            locations: Vec::new(),
            filters: FilterState::default(),
            date_bounds: None,
            start_date: None,
            end_date: None,
            snapshot: None,
            color_map: None,
            active_tab: Tab::Trend,
            location_query: String::new(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a loaded table: default selection, full date range, colours.
    pub fn set_table(&mut self, table: Arc<CovidTable>, policy: &SelectionPolicy) {
        self.locations = table.locations();
        self.filters.locations = policy.select(&self.locations);
        self.date_bounds = table.date_bounds();
        self.start_date = self.date_bounds.map(|(min, _)| min);
        self.end_date = self.date_bounds.map(|(_, max)| max);
        self.color_map = Some(ColorMap::new(&self.locations));

        log::info!(
            "Dataset ready: {} rows, {} locations, {} selected by default",
            table.len(),
            self.locations.len(),
            self.filters.locations.len()
        );

        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the snapshot after a filter change.
    pub fn refilter(&mut self) {
        self.filters.dates = [self.start_date, self.end_date]
            .into_iter()
            .flatten()
            .collect();
        if let Some(table) = &self.table {
            self.snapshot = Some(build_snapshot(table, &self.filters));
        }
    }

    /// Toggle a single location in the multi-select.
    pub fn toggle_location(&mut self, location: &str) {
        if !self.filters.locations.remove(location) {
            self.filters.locations.insert(location.to_string());
        }
        self.refilter();
    }

    /// Select every location.
    pub fn select_all(&mut self) {
        self.filters.locations = self.locations.iter().cloned().collect();
        self.refilter();
    }

    /// Deselect every location.
    pub fn select_none(&mut self) {
        self.filters.locations.clear();
        self.refilter();
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = Some(self.clamp_date(date));
        self.refilter();
    }

    /// `None` clears the end date, which disables date filtering.
    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.end_date = date.map(|d| self.clamp_date(d));
        self.refilter();
    }

    fn clamp_date(&self, date: NaiveDate) -> NaiveDate {
        match self.date_bounds {
            Some((min, max)) => date.clamp(min, max),
            None => date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::FilterWarning;
    use crate::data::model::fixtures::{date, two_countries};

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_table(Arc::new(two_countries()), &SelectionPolicy::All);
        state
    }

    #[test]
    fn loading_selects_by_policy_and_full_range() {
        let state = loaded();
        assert_eq!(state.filters.locations.len(), 2);
        assert_eq!(state.start_date, Some(date("2021-03-01")));
        assert_eq!(state.end_date, Some(date("2021-03-03")));
        let snap = state.snapshot.as_ref().unwrap();
        assert_eq!(snap.filtered.len(), 5);
        assert_eq!(snap.warning, None);
    }

    #[test]
    fn strided_default_on_a_small_dataset_picks_the_first_location() {
        let mut state = AppState::default();
        state.set_table(Arc::new(two_countries()), &SelectionPolicy::default());
        assert_eq!(
            state.filters.locations.iter().collect::<Vec<_>>(),
            vec!["Countryland"]
        );
    }

    #[test]
    fn clearing_the_end_date_triggers_the_fallback() {
        let mut state = loaded();
        state.set_start_date(date("2021-03-03"));
        assert_eq!(state.snapshot.as_ref().unwrap().filtered.len(), 1);

        state.set_end_date(None);
        let snap = state.snapshot.as_ref().unwrap();
        assert_eq!(snap.warning, Some(FilterWarning::IncompleteDateRange));
        assert_eq!(snap.filtered.len(), 5);
    }

    #[test]
    fn dates_are_clamped_to_the_dataset() {
        let mut state = loaded();
        state.set_start_date(date("2019-01-01"));
        state.set_end_date(Some(date("2030-01-01")));
        assert_eq!(state.start_date, Some(date("2021-03-01")));
        assert_eq!(state.end_date, Some(date("2021-03-03")));
    }

    #[test]
    fn toggling_and_bulk_selection() {
        let mut state = loaded();
        state.toggle_location("Otherland");
        assert_eq!(state.snapshot.as_ref().unwrap().filtered.len(), 3);
        state.toggle_location("Otherland");
        assert_eq!(state.snapshot.as_ref().unwrap().filtered.len(), 5);

        state.select_none();
        assert!(state.snapshot.as_ref().unwrap().filtered.is_empty());
        state.select_all();
        assert_eq!(state.filters.locations.len(), 2);
    }
}
