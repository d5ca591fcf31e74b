use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::dashboard::DashboardSnapshot;
use crate::data::export::export_csv;
use crate::state::{AppState, Tab};
use crate::ui::{plot, table};

/// Actions the top bar asks the app to perform (they need the data loader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Download again and replace the cache.
    Reload,
    /// Drop the memoized table and re-read the cache.
    ReloadCache,
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState) -> Option<MenuAction> {
    let mut action = None;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload dataset").clicked() {
                action = Some(MenuAction::Reload);
                ui.close_menu();
            }
            if ui.button("Re-read cache").clicked() {
                action = Some(MenuAction::ReloadCache);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(snap)) = (&state.table, &state.snapshot) {
            ui.label(format!(
                "{} rows loaded, {} visible",
                table.len(),
                snap.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
    action
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Date range ----
    ui.strong("Date Range");
    if let Some(mut start) = state.start_date {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("From");
            if ui
                .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                .changed()
            {
                state.set_start_date(start);
            }
        });
    }
    ui.horizontal(|ui: &mut Ui| {
        ui.label("To");
        match state.end_date {
            Some(mut end) => {
                if ui
                    .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                    .changed()
                {
                    state.set_end_date(Some(end));
                }
                if ui.small_button("✖").on_hover_text("Clear end date").clicked() {
                    state.set_end_date(None);
                }
            }
            None => {
                if ui.small_button("Set end date").clicked() {
                    let max = state.date_bounds.map(|(_, max)| max);
                    state.set_end_date(max);
                }
            }
        }
    });
    ui.separator();

    // ---- Export ----
    if ui.button("Download Filtered Data").clicked() {
        if let Err(e) = export_filtered(state) {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
    ui.separator();

    // ---- Location multi-select ----
    let header_text = format!(
        "Countries  ({}/{})",
        state.filters.locations.len(),
        state.locations.len()
    );
    ui.strong(header_text);
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });
    ui.add(egui::TextEdit::singleline(&mut state.location_query).hint_text("Search…"));

    let query = state.location_query.to_lowercase();
    let mut toggled: Option<String> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for location in &state.locations {
                if !query.is_empty() && !location.to_lowercase().contains(&query) {
                    continue;
                }
                let mut checked = state.filters.locations.contains(location);
                let mut text = RichText::new(location);
                if let Some(cm) = &state.color_map {
                    text = text.color(cm.color_for(location));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(location.clone());
                }
            }
        });

    // Apply after the loop so the location list is not borrowed.
    if let Some(location) = toggled {
        state.toggle_location(&location);
    }
}

// ---------------------------------------------------------------------------
// Central panel – metrics + tabs
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("COVID-19 Analysis Dashboard");
    ui.label("Interactive analysis of global COVID-19 data");
    ui.add_space(6.0);

    // Taken out for the frame so the tabs can borrow `state` mutably.
    let Some(snapshot) = state.snapshot.take() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Loading dataset…");
        });
        return;
    };
    dashboard_body(ui, state, &snapshot);
    state.snapshot = Some(snapshot);
}

fn dashboard_body(ui: &mut Ui, state: &mut AppState, snapshot: &DashboardSnapshot) {
    // ---- Metrics row ----
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Global Cases", &snapshot.metrics.cases_label());
        metric(&mut cols[1], "Global Deaths", &snapshot.metrics.deaths_label());
        metric(
            &mut cols[2],
            "Global Fatality Rate",
            &snapshot.metrics.fatality_label(),
        );
    });
    ui.separator();

    if let Some(warning) = snapshot.warning {
        ui.label(RichText::new(warning.message()).color(Color32::from_rgb(230, 160, 40)));
    }

    // ---- Tabs ----
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.active_tab, Tab::Trend, "Trend Analysis");
        ui.selectable_value(&mut state.active_tab, Tab::Explorer, "Data Explorer");
        ui.selectable_value(&mut state.active_tab, Tab::Map, "Map of Cases");
    });
    ui.separator();

    match state.active_tab {
        Tab::Trend => plot::trend_view(ui, state, snapshot),
        Tab::Explorer => table::data_table(ui, &snapshot.filtered),
        Tab::Map => plot::map_view(ui, snapshot),
    }
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.label(label);
    ui.label(RichText::new(value).size(28.0).strong());
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Ask for a destination and write the filtered table there as CSV.
pub fn export_filtered(state: &AppState) -> Result<()> {
    let Some(snapshot) = &state.snapshot else {
        return Ok(());
    };
    let payload = export_csv(&snapshot.filtered).context("serializing filtered data")?;

    let target = rfd::FileDialog::new()
        .set_title("Download Filtered Data")
        .set_file_name(payload.file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = target {
        std::fs::write(&path, payload.data.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!(
            "Exported {} rows ({}) to {}",
            snapshot.filtered.len(),
            payload.mime,
            path.display()
        );
    }
    Ok(())
}
