use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::SelectionPolicy;

/// Looked up in the working directory at start-up.
pub const CONFIG_FILE: &str = "dashboard.toml";

pub const DEFAULT_DATASET_URL: &str = "https://covid.ourworldindata.org/data/owid-covid-data.csv";

/// Dashboard settings. Every field is optional in the file.
///
/// ```toml
/// dataset_url = "file://sample_covid_data.csv"
/// database_path = "covid_dashboard.db"
/// table_name = "covid_data"
///
/// [default_selection]
/// kind = "named"
/// locations = ["Germany", "Japan"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// `http(s)://`, `file://` or a plain path.
    pub dataset_url: String,
    pub database_path: PathBuf,
    pub table_name: String,
    pub default_selection: SelectionPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            database_path: PathBuf::from("covid_dashboard.db"),
            table_name: "covid_data".to_string(),
            default_selection: SelectionPolicy::default(),
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config =
            Self::from_toml(&text).with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        assert_eq!(DashboardConfig::from_toml("").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let cfg = DashboardConfig::from_toml(
            r#"
            dataset_url = "file://sample_covid_data.csv"

            [default_selection]
            kind = "first"
            count = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.dataset_url, "file://sample_covid_data.csv");
        assert_eq!(cfg.table_name, "covid_data");
        assert_eq!(cfg.default_selection, SelectionPolicy::First { count: 3 });
    }

    #[test]
    fn named_selection_parses() {
        let cfg = DashboardConfig::from_toml(
            r#"
            [default_selection]
            kind = "named"
            locations = ["Germany", "Japan"]
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.default_selection,
            SelectionPolicy::Named {
                locations: vec!["Germany".into(), "Japan".into()]
            }
        );
    }

    #[test]
    fn unknown_policy_is_an_error() {
        assert!(DashboardConfig::from_toml("[default_selection]\nkind = \"random\"\n").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }
}
