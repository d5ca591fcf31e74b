use anyhow::{Context, Result};
use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::fetcher::fetch_dataset;
use crate::data::loader::{DataLoader, SessionId};
use crate::data::store::{CacheStore, SqliteStore};
use crate::state::AppState;
use crate::ui::panels::{self, MenuAction};

// ---------------------------------------------------------------------------
// Start-up pipeline: fetch → cache
// ---------------------------------------------------------------------------

/// Download the dataset and replace the local cache with it.
pub fn bootstrap(config: &DashboardConfig) -> Result<DataLoader<SqliteStore>> {
    let table = fetch_dataset(&config.dataset_url)
        .with_context(|| format!("fetching dataset from {}", config.dataset_url))?;

    let mut store = SqliteStore::open(&config.database_path, &config.table_name)
        .with_context(|| format!("opening cache {}", config.database_path.display()))?;
    store.store(&table).context("writing dataset to cache")?;

    Ok(DataLoader::new(store))
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CovidDashboardApp {
    pub state: AppState,
    config: DashboardConfig,
    loader: DataLoader<SqliteStore>,
    session: SessionId,
}

impl CovidDashboardApp {
    pub fn new(config: DashboardConfig, mut loader: DataLoader<SqliteStore>) -> Result<Self> {
        let session = SessionId::new();
        let table = loader.get(session).context("loading cached dataset")?;

        let mut state = AppState::default();
        state.set_table(table, &config.default_selection);

        Ok(Self {
            state,
            config,
            loader,
            session,
        })
    }

    /// Fetch the dataset again, replace the cache and drop memoized copies.
    /// Blocks the UI until done.
    fn reload(&mut self) -> Result<()> {
        let table = fetch_dataset(&self.config.dataset_url)
            .with_context(|| format!("fetching dataset from {}", self.config.dataset_url))?;
        let written = self
            .loader
            .refresh(&table)
            .context("writing dataset to cache")?;
        log::info!(
            "Reloaded {written} rows into '{}'",
            self.loader.store().table_name()
        );

        let loaded = self.loader.get(self.session).context("loading cached dataset")?;
        self.state.set_table(loaded, &self.config.default_selection);
        Ok(())
    }

    /// Re-read the cache for this session without downloading.
    fn reload_cache(&mut self) -> Result<()> {
        self.loader.invalidate(self.session);
        let loaded = self.loader.get(self.session).context("loading cached dataset")?;
        self.state.set_table(loaded, &self.config.default_selection);
        Ok(())
    }
}

impl eframe::App for CovidDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        let action = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui| panels::top_bar(ui, &self.state))
            .inner;

        let result = match action {
            Some(MenuAction::Reload) => self.reload(),
            Some(MenuAction::ReloadCache) => self.reload_cache(),
            None => Ok(()),
        };
        if let Err(e) = result {
            log::error!("Reload failed: {e:#}");
            self.state.status_message = Some(format!("Error: {e:#}"));
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics + views ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &mut self.state);
        });
    }
}
