use std::path::Path;

use rusqlite::{params, Connection};

use super::error::{DataError, Result};
use super::model::{CovidTable, Observation};

/// Storage format of the date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Stored row
// ---------------------------------------------------------------------------

/// A row as it sits in the cache: the date is still text.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub date: String,
    pub location: String,
    pub total_cases: f64,
    pub total_deaths: Option<f64>,
    pub population: Option<i64>,
    pub iso_code: String,
}

impl From<&Observation> for StoredRecord {
    fn from(obs: &Observation) -> Self {
        Self {
            date: obs.date.format(DATE_FORMAT).to_string(),
            location: obs.location.clone(),
            total_cases: obs.total_cases,
            total_deaths: obs.total_deaths,
            population: obs.population,
            iso_code: obs.iso_code.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// CacheStore
// ---------------------------------------------------------------------------

/// Local cache holding one relation with the cleaned dataset.
pub trait CacheStore {
    /// Replace the whole relation with `table`. Returns the number of rows written.
    fn store(&mut self, table: &CovidTable) -> Result<usize>;

    /// All rows of the relation, in insertion order.
    fn load(&self) -> Result<Vec<StoredRecord>>;
}

// ---------------------------------------------------------------------------
// SQLite implementation
// ---------------------------------------------------------------------------

pub struct SqliteStore {
    conn: Connection,
    table: String,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`, using relation `table`.
    pub fn open(path: impl AsRef<Path>, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        let conn = Connection::open(path.as_ref())?;
        log::debug!("Opened cache database {}", path.as_ref().display());
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }
}

impl CacheStore for SqliteStore {
    fn store(&mut self, table: &CovidTable) -> Result<usize> {
        let name = &self.table;
        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {name};
             CREATE TABLE {name} (
                 date         TEXT NOT NULL,
                 location     TEXT NOT NULL,
                 total_cases  REAL NOT NULL,
                 total_deaths REAL,
                 population   INTEGER,
                 iso_code     TEXT NOT NULL
             );"
        ))?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {name} (date, location, total_cases, total_deaths, population, iso_code)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
            ))?;
            for obs in table.iter() {
                let rec = StoredRecord::from(obs);
                stmt.execute(params![
                    rec.date,
                    rec.location,
                    rec.total_cases,
                    rec.total_deaths,
                    rec.population,
                    rec.iso_code,
                ])?;
            }
        }
        tx.commit()?;

        log::info!("Cached {} rows in table '{name}'", table.len());
        Ok(table.len())
    }

    fn load(&self) -> Result<Vec<StoredRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT date, location, total_cases, total_deaths, population, iso_code
             FROM {} ORDER BY rowid",
            self.table
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(StoredRecord {
                date: row.get(0)?,
                location: row.get(1)?,
                total_cases: row.get(2)?,
                total_deaths: row.get(3)?,
                population: row.get(4)?,
                iso_code: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

/// The relation name is interpolated into SQL, so only plain identifiers pass.
fn validate_table_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DataError::InvalidTableName(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// In-memory fake
// ---------------------------------------------------------------------------
