use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

/// Columns kept from the source dataset, in output order.
pub const COLUMNS: [&str; 6] = [
    "date",
    "location",
    "total_cases",
    "total_deaths",
    "population",
    "iso_code",
];

// ---------------------------------------------------------------------------
// Observation – one (location, date) row
// ---------------------------------------------------------------------------

/// Cumulative COVID-19 statistics for one location on one date.
///
/// Field order matches [`COLUMNS`]; the CSV export relies on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub location: String,
    /// Always present: rows without it are dropped when the dataset is fetched.
    pub total_cases: f64,
    pub total_deaths: Option<f64>,
    pub population: Option<i64>,
    /// ISO 3166-1 alpha-3, or an `OWID_*` aggregate code.
    pub iso_code: String,
}

// ---------------------------------------------------------------------------
// CovidTable – the loaded dataset (or a filtered view of it)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CovidTable {
    pub rows: Vec<Observation>,
}

impl CovidTable {
    pub fn from_rows(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.rows.iter()
    }

    /// Distinct locations in order of first appearance.
    pub fn locations(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|obs| seen.insert(obs.location.as_str()))
            .map(|obs| obs.location.clone())
            .collect()
    }

    /// Earliest and latest date in the table.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|obs| obs.date).min()?;
        let max = self.rows.iter().map(|obs| obs.date).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub fn obs(location: &str, day: &str, cases: f64, deaths: Option<f64>) -> Observation {
        Observation {
            date: date(day),
            location: location.to_string(),
            total_cases: cases,
            total_deaths: deaths,
            population: Some(1_000_000),
            iso_code: location[..3].to_uppercase(),
        }
    }

    /// Countryland: cases 10, 50, 100 on three consecutive days.
    /// Otherland: cases 5, 20 on two days.
    pub fn two_countries() -> CovidTable {
        CovidTable::from_rows(vec![
            obs("Countryland", "2021-03-01", 10.0, Some(1.0)),
            obs("Otherland", "2021-03-01", 5.0, None),
            obs("Countryland", "2021-03-02", 50.0, Some(2.0)),
            obs("Otherland", "2021-03-02", 20.0, Some(1.0)),
            obs("Countryland", "2021-03-03", 100.0, Some(4.0)),
        ])
    }
}
