use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;
use crate::ui::plot::{no_data, radar_plot};
use crate::view::{DashboardView, Metric};

const CARDS_PER_ROW: usize = 3;

// ---------------------------------------------------------------------------
// Tab 4: summary stats (KPI cards + radar)
// ---------------------------------------------------------------------------

pub fn summary_tab(ui: &mut Ui, state: &AppState, view: &DashboardView) {
    let category = state.selection.category;
    ui.heading(format!("Summary Statistics for {category} Indicators"));

    if view.metrics.is_empty() {
        let when = view
            .latest_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "the selected year range".to_string());
        no_data(
            ui,
            &format!("No data available for {category} indicators in {when}."),
        );
        return;
    }

    for row in view.metrics.chunks(CARDS_PER_ROW) {
        ui.columns(CARDS_PER_ROW, |cols| {
            for (col, metric) in cols.iter_mut().zip(row) {
                metric_card(col, metric);
            }
        });
        ui.add_space(8.0);
    }

    ui.separator();
    ui.heading(format!("Radar Chart Overview of {category} Indicators"));
    radar_plot(ui, state, view);
}

fn metric_card(ui: &mut Ui, metric: &Metric) {
    egui::Frame::group(ui.style())
        .corner_radius(5.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(&metric.indicator).small());
            ui.label(
                RichText::new(metric.value.as_deref().unwrap_or("No data"))
                    .size(24.0)
                    .strong(),
            );
            if let Some(delta) = &metric.delta {
                let color = if delta.starts_with('-') {
                    Color32::from_rgb(229, 57, 53)
                } else {
                    Color32::from_rgb(67, 160, 71)
                };
                let arrow = if delta.starts_with('-') { "↓" } else { "↑" };
                ui.label(RichText::new(format!("{arrow} {delta}")).color(color));
            }
        });
}
