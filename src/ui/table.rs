use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CovidTable, COLUMNS};
use crate::ui::plot::no_data;

/// Data explorer: every row that passes the current filters.
pub fn data_table(ui: &mut Ui, table: &CovidTable) {
    ui.heading("Data Explorer");
    ui.label(format!("{} rows", table.len()));
    if table.is_empty() {
        no_data(ui);
        return;
    }

    let row_height = ui.text_style_height(&eframe::egui::TextStyle::Body) + 4.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(80.0), COLUMNS.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, table.len(), |mut row| {
                let obs = &table.rows[row.index()];
                row.col(|ui| {
                    ui.label(obs.date.to_string());
                });
                row.col(|ui| {
                    ui.label(&obs.location);
                });
                row.col(|ui| {
                    ui.label(obs.total_cases.to_string());
                });
                row.col(|ui| {
                    ui.label(obs.total_deaths.map(|d| d.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(obs.population.map(|p| p.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(&obs.iso_code);
                });
            });
        });
}
