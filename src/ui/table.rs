use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::{export_file_name, export_to_path};
use crate::data::model::Record;
use crate::state::AppState;
use crate::ui::plot::no_data;
use crate::view::DashboardView;

const ROW_HEIGHT: f32 = 18.0;

fn records_table(ui: &mut Ui, id: &str, rows: &[Record], with_country: bool) {
    ui.push_id(id, |ui: &mut Ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(320.0);
        if with_country {
            table = table.column(Column::auto());
        }
        table
            .column(Column::auto())
            .column(Column::remainder())
            .column(Column::auto())
            .header(20.0, |mut header| {
                if with_country {
                    header.col(|ui| {
                        ui.strong("Country Name");
                    });
                }
                header.col(|ui| {
                    ui.strong("Year");
                });
                header.col(|ui| {
                    ui.strong("Indicator Name");
                });
                header.col(|ui| {
                    ui.strong("Value");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let r = &rows[row.index()];
                    if with_country {
                        row.col(|ui| {
                            ui.label(&r.country);
                        });
                    }
                    row.col(|ui| {
                        ui.label(r.year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(&r.indicator);
                    });
                    row.col(|ui| {
                        ui.label(r.value.to_string());
                    });
                });
            });
    });
}

/// First rows of the file as loaded, before any filtering.
pub fn raw_preview(ui: &mut Ui, state: &AppState) {
    egui::CollapsingHeader::new("View Raw Data Structure")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            records_table(ui, "raw_preview", state.dataset.head(5), true);
        });
}

// ---------------------------------------------------------------------------
// Data table + CSV download
// ---------------------------------------------------------------------------

pub fn data_table(ui: &mut Ui, state: &mut AppState, view: &DashboardView) {
    ui.heading("Data Table");

    if view.table.is_empty() {
        no_data(ui, "No data available for the selected filters.");
        return;
    }

    egui::CollapsingHeader::new("View and Download Data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            records_table(ui, "data_table", &view.table, false);
            ui.add_space(6.0);
            if ui.button("Download Data as CSV").clicked() {
                save_table(state, &view.table);
            }
        });
}

fn save_table(state: &mut AppState, rows: &[Record]) {
    let sel = &state.selection;
    let file_name = export_file_name(state.data.country(), sel.category, sel.year_range);

    let Some(path) = rfd::FileDialog::new()
        .set_title("Download Data as CSV")
        .set_file_name(&file_name)
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    match export_to_path(&path, rows) {
        Ok(()) => state.status_message = None,
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
