use super::filter::{apply_filter, FilterState, FilterWarning};
use super::metrics::SummaryMetrics;
use super::model::CovidTable;
use super::views::{
    latest_per_location, location_totals, trend_series, LocationTotals, MapPoint, TrendSeries,
};

/// Everything the views need for one filter state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Computed from the full table, never the filtered one.
    pub metrics: SummaryMetrics,
    pub filtered: CovidTable,
    pub warning: Option<FilterWarning>,
    pub trend: Vec<TrendSeries>,
    pub totals: Vec<LocationTotals>,
    pub map: Vec<MapPoint>,
}

/// Recompute every view from the loaded table and the current sidebar state.
pub fn build_snapshot(full: &CovidTable, filters: &FilterState) -> DashboardSnapshot {
    let metrics = SummaryMetrics::compute(full);
    let outcome = apply_filter(full, filters);
    log::debug!(
        "Filter kept {} of {} rows ({} locations selected)",
        outcome.table.len(),
        full.len(),
        filters.locations.len()
    );

    DashboardSnapshot {
        metrics,
        trend: trend_series(&outcome.table),
        totals: location_totals(&outcome.table),
        map: latest_per_location(&outcome.table),
        filtered: outcome.table,
        warning: outcome.warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::export::export_csv;
    use crate::data::model::fixtures::{date, two_countries};

    #[test]
    fn countryland_end_to_end() {
        let table = two_countries();
        let (start, end) = table.date_bounds().unwrap();
        let filters = FilterState {
            locations: ["Countryland".to_string()].into(),
            dates: vec![start, end],
        };

        let snap = build_snapshot(&table, &filters);
        assert_eq!(snap.warning, None);
        assert_eq!(snap.filtered.len(), 3);
        assert!(snap.filtered.iter().all(|o| o.location == "Countryland"));

        assert_eq!(snap.map.len(), 1);
        assert_eq!(snap.map[0].location, "Countryland");
        assert_eq!(snap.map[0].total_cases, 100.0);

        assert_eq!(snap.trend.len(), 1);
        assert_eq!(snap.trend[0].points.len(), 3);
        assert_eq!(snap.totals.len(), 1);

        let payload = export_csv(&snap.filtered).unwrap();
        assert_eq!(payload.data.lines().count(), 4);
    }

    #[test]
    fn metrics_ignore_the_filter() {
        let table = two_countries();
        let narrow = FilterState {
            locations: ["Otherland".to_string()].into(),
            dates: vec![date("2021-03-01"), date("2021-03-01")],
        };
        let wide = FilterState {
            locations: table.locations().into_iter().collect(),
            dates: vec![],
        };

        let a = build_snapshot(&table, &narrow);
        let b = build_snapshot(&table, &wide);
        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.metrics.global_cases, Some(100.0));
        assert_eq!(a.filtered.len(), 1);
        assert_eq!(b.warning, Some(FilterWarning::IncompleteDateRange));
    }

    #[test]
    fn empty_selection_produces_empty_views() {
        let snap = build_snapshot(&two_countries(), &FilterState::default());
        assert!(snap.filtered.is_empty());
        assert!(snap.trend.is_empty());
        assert!(snap.totals.is_empty());
        assert!(snap.map.is_empty());
        assert!(snap.metrics.global_cases.is_some());
    }
}
