use std::io::Read;

use chrono::NaiveDate;

use super::error::{DataError, Result};
use super::model::{CovidTable, Observation};

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Something that can produce the raw CSV text of the dataset.
pub trait Fetch {
    fn fetch(&self) -> Result<String>;
}

/// Downloads over HTTP(S) with a blocking GET.
struct UrlFetcher<'a>(&'a str);

impl Fetch for UrlFetcher<'_> {
    fn fetch(&self) -> Result<String> {
        let response = reqwest::blocking::get(self.0)?.error_for_status()?;
        Ok(response.text()?)
    }
}

/// Reads a local file (`file://path` or a bare path).
struct FileFetcher<'a>(&'a str);

impl Fetch for FileFetcher<'_> {
    fn fetch(&self) -> Result<String> {
        Ok(std::fs::read_to_string(self.0)?)
    }
}

/// Retrieve the raw CSV text from `source`. Dispatch by scheme.
pub fn retrieve_csv(source: &str) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        UrlFetcher(source).fetch()
    } else if let Some(path) = source.strip_prefix("file://") {
        FileFetcher(path).fetch()
    } else if !source.contains("://") {
        FileFetcher(source).fetch()
    } else {
        Err(DataError::UnsupportedSource(source.to_string()))
    }
}

/// Fetch and clean the dataset in one step.
pub fn fetch_dataset(source: &str) -> Result<CovidTable> {
    log::info!("Fetching dataset from {source}");
    let text = retrieve_csv(source)?;
    log::debug!("Downloaded {} bytes", text.len());
    let table = parse_dataset(text.as_bytes())?;
    log::info!(
        "Parsed {} observations for {} locations",
        table.len(),
        table.locations().len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Positions of the kept columns in the source header.
struct ColumnIndex {
    date: usize,
    location: usize,
    total_cases: usize,
    total_deaths: usize,
    population: usize,
    iso_code: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(DataError::MissingColumn(name))
        };
        Ok(Self {
            date: find("date")?,
            location: find("location")?,
            total_cases: find("total_cases")?,
            total_deaths: find("total_deaths")?,
            population: find("population")?,
            iso_code: find("iso_code")?,
        })
    }
}

/// Parse OWID-shaped CSV, keeping only the dashboard columns.
///
/// Rows with a missing `total_cases` are dropped. Any other malformed field
/// aborts the parse.
pub fn parse_dataset(reader: impl Read) -> Result<CovidTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1.
        let line = row_no + 2;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let Some(total_cases) = parse_number(field(columns.total_cases), line, "total_cases")?
        else {
            dropped += 1;
            continue;
        };

        let date_text = field(columns.date);
        let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d").map_err(|_| {
            DataError::InvalidDate {
                row: line,
                value: date_text.to_string(),
            }
        })?;

        rows.push(Observation {
            date,
            location: field(columns.location).to_string(),
            total_cases,
            total_deaths: parse_number(field(columns.total_deaths), line, "total_deaths")?,
            population: parse_integer(field(columns.population), line, "population")?,
            iso_code: field(columns.iso_code).to_string(),
        });
    }

    log::debug!("Dropped {dropped} rows without total_cases");
    Ok(CovidTable::from_rows(rows))
}

/// Cell values read as missing, the same set pandas' `read_csv` treats as NA.
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn invalid_number(s: &str, row: usize, column: &'static str) -> DataError {
    DataError::InvalidNumber {
        row,
        column,
        value: s.to_string(),
    }
}

/// Missing tokens give `None`. Non-finite values are rejected.
pub(crate) fn parse_number(s: &str, row: usize, column: &'static str) -> Result<Option<f64>> {
    if MISSING_TOKENS.contains(&s) {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(invalid_number(s, row, column)),
    }
}

/// Integers may arrive as `"123"` or, from float-typed exports, `"123.0"`.
pub(crate) fn parse_integer(s: &str, row: usize, column: &'static str) -> Result<Option<i64>> {
    if let Ok(i) = s.parse::<i64>() {
        return Ok(Some(i));
    }
    let Some(value) = parse_number(s, row, column)? else {
        return Ok(None);
    };
    let rounded = value.round();
    if (i64::MIN as f64..i64::MAX as f64).contains(&rounded) {
        Ok(Some(rounded as i64))
    } else {
        Err(invalid_number(s, row, column))
    }
}
