use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::error::{DataError, Result};
use super::model::{CovidTable, Observation};
use super::store::{CacheStore, StoredRecord, DATE_FORMAT};

// ---------------------------------------------------------------------------
// Session identity
// ---------------------------------------------------------------------------

/// Identifies one running dashboard session; memoized loads are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// A fresh, process-unique identifier.
    pub fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        SessionId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// DataLoader
// ---------------------------------------------------------------------------

/// Memoizing reader over a [`CacheStore`].
///
/// The first [`get`](Self::get) for a session queries the store and converts
/// the stored date text; later calls for that session share the result.
pub struct DataLoader<S: CacheStore> {
    store: S,
    memo: HashMap<SessionId, Arc<CovidTable>>,
}

impl<S: CacheStore> DataLoader<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            memo: HashMap::new(),
        }
    }

    /// The full table for `session`, loading it on first use.
    pub fn get(&mut self, session: SessionId) -> Result<Arc<CovidTable>> {
        if let Some(table) = self.memo.get(&session) {
            return Ok(Arc::clone(table));
        }

        let stored = self.store.load()?;
        let rows = stored
            .into_iter()
            .enumerate()
            .map(|(i, rec)| into_observation(rec, i + 1))
            .collect::<Result<Vec<_>>>()?;
        let table = Arc::new(CovidTable::from_rows(rows));
        log::info!("Loaded {} rows from cache for {session:?}", table.len());

        self.memo.insert(session, Arc::clone(&table));
        Ok(table)
    }

    /// Forget the memoized table for one session. Returns whether one existed.
    pub fn invalidate(&mut self, session: SessionId) -> bool {
        self.memo.remove(&session).is_some()
    }

    /// Replace the cached dataset and drop every memoized copy.
    pub fn refresh(&mut self, table: &CovidTable) -> Result<usize> {
        let written = self.store.store(table)?;
        self.memo.clear();
        Ok(written)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn into_observation(rec: StoredRecord, row: usize) -> Result<Observation> {
    let date = NaiveDate::parse_from_str(&rec.date, DATE_FORMAT).map_err(|_| {
        DataError::InvalidDate {
            row,
            value: rec.date.clone(),
        }
    })?;
    Ok(Observation {
        date,
        location: rec.location,
        total_cases: rec.total_cases,
        total_deaths: rec.total_deaths,
        population: rec.population,
        iso_code: rec.iso_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{date, obs, two_countries};
    use crate::data::store::memory::MemoryStore;
    use crate::data::store::SqliteStore;

    #[test]
    fn converts_stored_dates_back_to_dates() {
        let mut loader = DataLoader::new(MemoryStore::with_table(&two_countries()));
        let table = loader.get(SessionId::new()).unwrap();
        assert_eq!(*table, two_countries());
        assert_eq!(table.rows[4].date, date("2021-03-03"));
    }

    #[test]
    fn second_get_in_a_session_does_not_query_the_store() {
        let mut loader = DataLoader::new(MemoryStore::with_table(&two_countries()));
        let session = SessionId::new();

        let first = loader.get(session).unwrap();
        let second = loader.get(session).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.store().loads.get(), 1);

        // A different session has its own memo.
        loader.get(SessionId::new()).unwrap();
        assert_eq!(loader.store().loads.get(), 2);
    }

    #[test]
    fn invalidate_forces_a_reload() {
        let mut loader = DataLoader::new(MemoryStore::with_table(&two_countries()));
        let session = SessionId::new();

        assert!(!loader.invalidate(session));
        loader.get(session).unwrap();
        assert!(loader.invalidate(session));
        loader.get(session).unwrap();
        assert_eq!(loader.store().loads.get(), 2);
    }

    #[test]
    fn refresh_replaces_data_for_every_session() {
        let mut loader = DataLoader::new(MemoryStore::with_table(&two_countries()));
        let session = SessionId::new();
        assert_eq!(loader.get(session).unwrap().len(), 5);

        let newer = CovidTable::from_rows(vec![obs("Newland", "2022-01-01", 1.0, None)]);
        assert_eq!(loader.refresh(&newer).unwrap(), 1);
        assert_eq!(*loader.get(session).unwrap(), newer);
    }

    #[test]
    fn corrupt_stored_date_is_an_error() {
        let mut rec = StoredRecord::from(&obs("Countryland", "2021-03-01", 1.0, None));
        rec.date = "March 1st".to_string();
        let mut loader = DataLoader::new(MemoryStore::with_rows(vec![rec]));
        assert!(matches!(
            loader.get(SessionId::new()),
            Err(DataError::InvalidDate { row: 1, .. })
        ));
    }

    #[test]
    fn works_over_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SqliteStore::open(dir.path().join("cache.db"), "covid_data").unwrap();
        store.store(&two_countries()).unwrap();

        let mut loader = DataLoader::new(store);
        let table = loader.get(SessionId::new()).unwrap();
        assert_eq!(*table, two_countries());
    }
}
