use eframe::egui::{self, ScrollArea, Ui};

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, summary, table};
use crate::view::DashboardView;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct UrbanDashApp {
    pub state: AppState,
}

impl UrbanDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for UrbanDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        let view = DashboardView::compute(
            &self.state.data,
            &self.state.catalog,
            &self.state.selection,
        );

        // ---- Central panel: tabs, table, footer ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::header(ui, &self.state);
                    table::raw_preview(ui, &self.state);
                    ui.separator();

                    ui.horizontal(|ui: &mut Ui| {
                        for tab in Tab::ALL {
                            ui.selectable_value(&mut self.state.tab, tab, tab.title());
                        }
                        ui.separator();
                        ui.label(format!("{} observations in range", view.filtered.len()));
                    });
                    ui.separator();

                    match self.state.tab {
                        Tab::Trend => plot::trend_plot(ui, &self.state, &view),
                        Tab::Comparison => plot::comparison_plot(ui, &self.state, &view),
                        Tab::Snapshot => snapshot_tab(ui, &mut self.state, &view),
                        Tab::Summary => summary::summary_tab(ui, &self.state, &view),
                    }

                    ui.separator();
                    table::data_table(ui, &mut self.state, &view);
                    panels::footer(ui, &self.state);
                });
        });
    }
}

/// Snapshot year slider above the snapshot chart. The slider spans the whole
/// country range, not just the filtered one.
fn snapshot_tab(ui: &mut Ui, state: &mut AppState, view: &DashboardView) {
    let bounds = state.data.bounds();
    let mut year = state.selection.snapshot_year;
    if ui
        .add(
            egui::Slider::new(&mut year, bounds.start..=bounds.end)
                .text("Select Year for Snapshot"),
        )
        .changed()
    {
        let next = state.selection.clone().with_snapshot_year(&state.data, year);
        state.update(|_| next);
        // The chart below must reflect the new year this frame.
        let fresh = DashboardView::compute(&state.data, &state.catalog, &state.selection);
        plot::snapshot_plot(ui, state, &fresh);
        return;
    }
    plot::snapshot_plot(ui, state, view);
}
