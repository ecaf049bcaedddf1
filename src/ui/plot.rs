use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::ColorMap;
use crate::data::format::{UnitKind, format_value};
use crate::data::model::Record;
use crate::data::stats::split_on_gaps;
use crate::state::{AppState, ChartType};
use crate::view::DashboardView;

const TREND_COLOR: Color32 = Color32::from_rgb(30, 136, 229);

/// Warning shown in place of an empty chart.
pub fn no_data(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::from_rgb(255, 193, 7)));
}

// ---------------------------------------------------------------------------
// Tab 1: indicator trend
// ---------------------------------------------------------------------------

pub fn trend_plot(ui: &mut Ui, state: &AppState, view: &DashboardView) {
    let sel = &state.selection;
    let range = sel.year_range;
    ui.heading(format!(
        "Trend of {} ({}-{})",
        sel.indicator, range.start, range.end
    ));

    if view.indicator_series.is_empty() {
        no_data(
            ui,
            &format!(
                "No data available for {} in the selected year range.",
                sel.indicator
            ),
        );
        return;
    }

    let points: Vec<[f64; 2]> = view
        .indicator_series
        .iter()
        .map(|r| [r.year as f64, r.value])
        .collect();

    Plot::new("trend_plot")
        .height(500.0)
        .x_axis_label("Year")
        .y_axis_label(view.indicator_unit.axis_title())
        .allow_scroll(false)
        .show(ui, |plot_ui| match sel.chart_type {
            ChartType::Line => {
                for segment in split_on_gaps(&points) {
                    plot_ui.line(
                        Line::new(PlotPoints::from(segment.to_vec()))
                            .name(&sel.indicator)
                            .color(TREND_COLOR)
                            .width(2.0),
                    );
                }
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(3.0)
                        .color(TREND_COLOR),
                );
            }
            ChartType::Bar => {
                let bars = points
                    .iter()
                    .map(|&[year, value]| Bar::new(year, value).width(0.8))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&sel.indicator).color(TREND_COLOR));
            }
        });
}

// ---------------------------------------------------------------------------
// Tab 2: category comparison
// ---------------------------------------------------------------------------

pub fn comparison_plot(ui: &mut Ui, state: &AppState, view: &DashboardView) {
    let category = state.selection.category;
    ui.heading(format!("Comparison of {category} Indicators"));

    if view.category_rows.is_empty() {
        no_data(
            ui,
            &format!("No data available for {category} indicators in the selected year range."),
        );
        return;
    }

    let colors = ColorMap::new(category.indicators());
    let n = view.category_series.len().max(1);
    let bar_width = 0.8 / n as f64;

    Plot::new("comparison_plot")
        .height(600.0)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Value")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (name, points)) in view.category_series.iter().enumerate() {
                let color = colors.color_for(name);
                match state.selection.chart_type {
                    ChartType::Line => {
                        for segment in split_on_gaps(points) {
                            plot_ui.line(
                                Line::new(PlotPoints::from(segment.to_vec()))
                                    .name(name)
                                    .color(color)
                                    .width(1.5),
                            );
                        }
                        plot_ui.points(
                            Points::new(PlotPoints::from(points.clone()))
                                .name(name)
                                .radius(2.5)
                                .color(color),
                        );
                    }
                    ChartType::Bar => {
                        // Side-by-side bars centred on each year.
                        let offset = (i as f64 - (n as f64 - 1.0) / 2.0) * bar_width;
                        let bars = points
                            .iter()
                            .map(|&[year, value]| Bar::new(year + offset, value).width(bar_width))
                            .collect();
                        plot_ui.bar_chart(BarChart::new(bars).name(name).color(color));
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Tab 3: yearly snapshot
// ---------------------------------------------------------------------------

pub fn snapshot_plot(ui: &mut Ui, state: &AppState, view: &DashboardView) {
    let category = state.selection.category;
    let year = state.selection.snapshot_year;
    ui.heading(format!("Snapshot of {category} Indicators in {year}"));

    if view.snapshot.is_empty() {
        no_data(
            ui,
            &format!("No data available for {category} indicators in {year}."),
        );
        return;
    }

    let colors = ColorMap::new(category.indicators());

    Plot::new("snapshot_plot")
        .height(500.0)
        .legend(Legend::default())
        .x_axis_label("Value")
        .show_axes([true, false])
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, r) in view.snapshot.iter().enumerate() {
                let bar = Bar::new(i as f64, r.value)
                    .width(0.7)
                    .name(format!("{}: {}", r.indicator, format_value(r.value, &r.indicator)));
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .horizontal()
                        .name(&r.indicator)
                        .color(colors.color_for(&r.indicator)),
                );
            }
            // The value axis is the only one shown, so each bar carries its
            // own label just left of zero.
            for (y, label) in bar_labels(&view.snapshot) {
                plot_ui.text(
                    Text::new(PlotPoint::new(0.0, y), RichText::new(label).small())
                        .anchor(Align2::RIGHT_CENTER),
                );
            }
        });
}

/// Label and bar position for each snapshot row, in row order.
fn bar_labels(records: &[Record]) -> Vec<(f64, &str)> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, short_label(&r.indicator)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tab 4: radar overview
// ---------------------------------------------------------------------------

/// Polar position of spoke `k` of `n`, first spoke pointing up.
fn spoke(k: usize, n: usize, radius: f64) -> [f64; 2] {
    let angle = FRAC_PI_2 - TAU * k as f64 / n as f64;
    [radius * angle.cos(), radius * angle.sin()]
}

pub fn radar_plot(ui: &mut Ui, state: &AppState, view: &DashboardView) {
    let category = state.selection.category;
    let Some(year) = view.latest_year else {
        return;
    };
    if view.radar.is_empty() {
        return;
    }

    ui.label(
        RichText::new(format!(
            "Normalized Values of {category} Indicators in {year}"
        ))
        .strong(),
    );

    let n = view.radar.len();
    let colors = ColorMap::new(category.indicators());

    Plot::new("radar_plot")
        .height(450.0)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // Rings at 0.25 steps and one spoke per indicator.
            for ring in [0.25, 0.5, 0.75, 1.0] {
                let circle: Vec<[f64; 2]> = (0..=64).map(|k| spoke(k, 64, ring)).collect();
                plot_ui.line(
                    Line::new(PlotPoints::from(circle))
                        .color(Color32::DARK_GRAY)
                        .width(0.5),
                );
            }
            for k in 0..n {
                let spoke_line = vec![[0.0, 0.0], spoke(k, n, 1.0)];
                plot_ui.line(
                    Line::new(PlotPoints::from(spoke_line))
                        .color(Color32::DARK_GRAY)
                        .width(0.5),
                );
            }

            let outline: Vec<[f64; 2]> = view
                .radar
                .iter()
                .enumerate()
                .map(|(k, p)| spoke(k, n, p.normalized))
                .collect();
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(outline))
                    .name(year.to_string())
                    .fill_color(TREND_COLOR.gamma_multiply(0.3))
                    .stroke(Stroke::new(2.0, TREND_COLOR)),
            );

            for (k, p) in view.radar.iter().enumerate() {
                let [x, y] = spoke(k, n, p.normalized);
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[x, y]]))
                        .radius(4.0)
                        .name(format!(
                            "{}: {} (normalized {})",
                            p.indicator,
                            state.catalog.unit_of(&p.indicator).format(p.value),
                            UnitKind::Plain.format(p.normalized)
                        ))
                        .color(colors.color_for(&p.indicator)),
                );
                let [lx, ly] = spoke(k, n, 1.15);
                plot_ui.text(Text::new(
                    PlotPoint::new(lx, ly),
                    RichText::new(short_label(&p.indicator)).small(),
                ));
            }
        });

    ui.label(
        RichText::new("Note: Values are normalized (0-1) for better comparison in the radar chart.")
            .italics(),
    );
}

/// Axis label for a spoke: the indicator name up to its first parenthesis.
fn short_label(indicator: &str) -> &str {
    indicator
        .split_once(" (")
        .map(|(head, _)| head)
        .unwrap_or(indicator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_spoke_points_up() {
        let [x, y] = spoke(0, 4, 1.0);
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);

        let [x, y] = spoke(1, 4, 0.5);
        assert!((x - 0.5).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
    }

    #[test]
    fn labels_drop_parenthetical() {
        assert_eq!(short_label("Urban land area (sq. km)"), "Urban land area");
        assert_eq!(short_label("Urban population"), "Urban population");
    }

    #[test]
    fn snapshot_bars_are_labelled_in_order() {
        let rec = |indicator: &str| Record {
            country: "Sri Lanka".into(),
            indicator: indicator.into(),
            year: 2020,
            value: 1.0,
        };
        let rows = vec![rec("Urban land area (sq. km)"), rec("Urban population")];
        assert_eq!(
            bar_labels(&rows),
            vec![(0.0, "Urban land area"), (1.0, "Urban population")]
        );
    }
}
