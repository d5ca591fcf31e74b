use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::color::{inferno, normalize};
use crate::data::dashboard::DashboardSnapshot;
use crate::data::metrics::format_count;
use crate::data::views::MapPoint;
use crate::geo::centroid;
use crate::state::AppState;

pub const NO_DATA: &str = "No data available for the selected filters";

/// Show the empty-state banner used by every view.
pub fn no_data(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(NO_DATA).color(Color32::from_rgb(230, 160, 40)));
    });
}

// -- Date axis helpers: days since 0001-01-01 --

fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn x_to_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Trend analysis tab
// ---------------------------------------------------------------------------

/// Total cases over time (one line per location) and deaths-vs-cases bars.
pub fn trend_view(ui: &mut Ui, state: &AppState, snapshot: &DashboardSnapshot) {
    if snapshot.filtered.is_empty() {
        no_data(ui);
        return;
    }

    let chart_height = (ui.available_height() / 2.0 - 30.0).max(160.0);

    ui.strong("Total Cases Over Time");
    Plot::new("trend_plot")
        .height(chart_height)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Total Cases")
        .x_axis_formatter(|mark, _range| x_to_label(mark.value))
        .label_formatter(|name, value| {
            let date = x_to_label(value.x);
            if name.is_empty() {
                date
            } else {
                format!("{name}\n{date}\n{} cases", format_count(value.y))
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &snapshot.trend {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(&series.location))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|&(date, cases)| [date_to_x(date), cases])
                    .collect();

                plot_ui.line(Line::new(points).name(&series.location).color(color).width(1.5));
            }
        });

    ui.add_space(8.0);
    ui.heading("Case Fatality Rate");
    comparison_chart(ui, snapshot);
}

/// Grouped bars: max total deaths and max total cases per location.
fn comparison_chart(ui: &mut Ui, snapshot: &DashboardSnapshot) {
    const BAR_WIDTH: f64 = 0.38;

    let names: Vec<String> = snapshot.totals.iter().map(|t| t.location.clone()).collect();

    let deaths: Vec<Bar> = snapshot
        .totals
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Bar::new(i as f64 - BAR_WIDTH / 2.0, t.max_deaths.unwrap_or(0.0))
                .width(BAR_WIDTH)
                .name(&t.location)
        })
        .collect();
    let cases: Vec<Bar> = snapshot
        .totals
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Bar::new(i as f64 + BAR_WIDTH / 2.0, t.max_cases)
                .width(BAR_WIDTH)
                .name(&t.location)
        })
        .collect();

    ui.label("Total Deaths vs Total Cases by Country");
    Plot::new("comparison_plot")
        .legend(Legend::default())
        .y_axis_label("Count")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(deaths)
                    .name("total_deaths")
                    .color(Color32::from_rgb(214, 39, 40)),
            );
            plot_ui.bar_chart(
                BarChart::new(cases)
                    .name("total_cases")
                    .color(Color32::from_rgb(31, 119, 180)),
            );
        });
}

// ---------------------------------------------------------------------------
// Map tab
// ---------------------------------------------------------------------------

/// Bubble map: one marker per location at its latest filtered date.
/// Marker size and colour follow ln(total_cases).
pub fn map_view(ui: &mut Ui, snapshot: &DashboardSnapshot) {
    // Aggregates such as "World" have no position; with nothing else there is no map.
    let placed = placed_points(&snapshot.map);
    let unplaced = snapshot.map.len() - placed.len();
    if placed.is_empty() {
        no_data(ui);
        return;
    }

    let min = placed
        .iter()
        .map(|(p, _)| p.magnitude)
        .fold(f64::INFINITY, f64::min);
    let max = placed
        .iter()
        .map(|(p, _)| p.magnitude)
        .fold(f64::NEG_INFINITY, f64::max);

    ui.strong("Global COVID-19 Cases Distribution");
    if unplaced > 0 {
        ui.label(format!(
            "{unplaced} selected location(s) have no map position (regional aggregates)"
        ));
    }

    Plot::new("map_plot")
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.1}°, {:.1}°", value.y, value.x)
            } else {
                name.to_string()
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for &(point, position) in &placed {
                let label = format!(
                    "{} ({})\n{}\n{} cases",
                    point.location,
                    point.iso_code,
                    point.date,
                    format_count(point.total_cases)
                );
                let color = inferno(normalize(point.magnitude, min, max));
                plot_ui.points(
                    Points::new(vec![position])
                        .name(label)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(2.0 + point.magnitude as f32 * 0.9)
                        .color(color),
                );
            }
        });
}

/// Map points that have a known position, paired with `[lon, lat]`.
fn placed_points(points: &[MapPoint]) -> Vec<(&MapPoint, [f64; 2])> {
    points
        .iter()
        .filter_map(|p| centroid(&p.iso_code).map(|pos| (p, pos)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::date;

    fn point(location: &str, iso_code: &str) -> MapPoint {
        MapPoint {
            location: location.to_string(),
            iso_code: iso_code.to_string(),
            date: date("2021-03-01"),
            total_cases: 100.0,
            magnitude: 100f64.ln(),
        }
    }

    #[test]
    fn aggregates_only_leave_nothing_to_place() {
        let points = vec![point("World", "OWID_WRL"), point("Europe", "OWID_EUR")];
        assert!(placed_points(&points).is_empty());
    }

    #[test]
    fn countries_are_placed_at_their_centroid() {
        let points = vec![point("World", "OWID_WRL"), point("France", "FRA")];
        let placed = placed_points(&points);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].0.location, "France");
        assert_eq!(Some(placed[0].1), centroid("FRA"));
    }
}
