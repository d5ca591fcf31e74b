/// Data layer: fetching, caching, filtering and view payloads.
///
/// Architecture:
/// ```text
///  owid-covid-data.csv (http / file)
///        │
///        ▼
///   ┌──────────┐
///   │ fetcher  │  keep 6 columns, drop rows without total_cases
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store   │  CacheStore: replace relation / load all rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  memoized per SessionId → Arc<CovidTable>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ dashboard │  metrics (full table) + filter → views, export
///   └───────────┘
/// ```

pub mod dashboard;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod store;
pub mod views;
