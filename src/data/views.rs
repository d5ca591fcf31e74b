use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::model::{CovidTable, Observation};

// ---------------------------------------------------------------------------
// Trend view
// ---------------------------------------------------------------------------

/// `total_cases` over time for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub location: String,
    /// Sorted by date.
    pub points: Vec<(NaiveDate, f64)>,
}

/// One series per location, in order of first appearance.
pub fn trend_series(table: &CovidTable) -> Vec<TrendSeries> {
    let mut order: Vec<&str> = Vec::new();
    let mut points: HashMap<&str, Vec<(NaiveDate, f64)>> = HashMap::new();

    for obs in table.iter() {
        let entry = points.entry(obs.location.as_str()).or_insert_with(|| {
            order.push(obs.location.as_str());
            Vec::new()
        });
        entry.push((obs.date, obs.total_cases));
    }

    order
        .into_iter()
        .filter_map(|loc| {
            let mut pts = points.remove(loc)?;
            pts.sort_by_key(|(date, _)| *date);
            Some(TrendSeries {
                location: loc.to_string(),
                points: pts,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Deaths vs cases comparison
// ---------------------------------------------------------------------------

/// Per-location maxima for the grouped bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationTotals {
    pub location: String,
    pub max_deaths: Option<f64>,
    pub max_cases: f64,
}

/// Group by location (sorted by name) and take the max of each metric.
pub fn location_totals(table: &CovidTable) -> Vec<LocationTotals> {
    let mut groups: BTreeMap<&str, (Option<f64>, f64)> = BTreeMap::new();
    for obs in table.iter() {
        let (deaths, cases) = groups
            .entry(obs.location.as_str())
            .or_insert((None, f64::NEG_INFINITY));
        *cases = cases.max(obs.total_cases);
        if let Some(d) = obs.total_deaths {
            *deaths = Some(deaths.map_or(d, |cur| cur.max(d)));
        }
    }

    groups
        .into_iter()
        .map(|(location, (max_deaths, max_cases))| LocationTotals {
            location: location.to_string(),
            max_deaths,
            max_cases,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Map view
// ---------------------------------------------------------------------------

/// The latest record of one location, ready for the bubble map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub location: String,
    pub iso_code: String,
    pub date: NaiveDate,
    pub total_cases: f64,
    /// Natural log of `total_cases`; drives both marker size and color.
    pub magnitude: f64,
}

/// Natural log, floored at zero so that 0 and 1 cases share the smallest marker.
pub fn log_scale(cases: f64) -> f64 {
    cases.max(1.0).ln()
}

/// Exactly one point per location: its chronologically latest row.
/// On equal dates the row appearing later in the table wins. Sorted by location.
pub fn latest_per_location(table: &CovidTable) -> Vec<MapPoint> {
    let mut latest: BTreeMap<&str, &Observation> = BTreeMap::new();
    for obs in table.iter() {
        latest
            .entry(obs.location.as_str())
            .and_modify(|cur| {
                if obs.date >= cur.date {
                    *cur = obs;
                }
            })
            .or_insert(obs);
    }

    latest
        .into_values()
        .map(|obs| MapPoint {
            location: obs.location.clone(),
            iso_code: obs.iso_code.clone(),
            date: obs.date,
            total_cases: obs.total_cases,
            magnitude: log_scale(obs.total_cases),
        })
        .collect()
}
