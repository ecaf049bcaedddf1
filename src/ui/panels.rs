use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::category::Category;
use crate::state::{AppState, ChartType};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Category ----
            ui.strong("Select Category");
            let current = state.selection.category;
            egui::ComboBox::from_id_salt("category")
                .selected_text(current.name())
                .show_ui(ui, |ui: &mut Ui| {
                    for category in Category::ALL {
                        if ui
                            .selectable_label(current == category, category.name())
                            .clicked()
                        {
                            state.update(|s| s.with_category(category));
                        }
                    }
                });
            ui.add_space(6.0);

            // ---- Indicator (within category) ----
            ui.strong("Select Indicator");
            let category = state.selection.category;
            let selected = state.selection.indicator.clone();
            egui::ComboBox::from_id_salt("indicator")
                .selected_text(&selected)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for &name in category.indicators() {
                        if ui.selectable_label(selected == name, name).clicked() {
                            state.update(|s| s.with_indicator(name));
                        }
                    }
                });
            ui.add_space(6.0);

            // ---- Year range ----
            ui.strong("Select Year Range");
            let bounds = state.data.bounds();
            let mut start = state.selection.year_range.start;
            let mut end = state.selection.year_range.end;
            let start_changed = ui
                .add(egui::Slider::new(&mut start, bounds.start..=bounds.end).text("from"))
                .changed();
            let end_changed = ui
                .add(egui::Slider::new(&mut end, bounds.start..=bounds.end).text("to"))
                .changed();
            if start_changed || end_changed {
                let data = &state.data;
                let next = state.selection.clone().with_year_range(data, start, end);
                state.update(|_| next);
            }
            ui.add_space(6.0);

            // ---- Indicator search ----
            ui.strong("Search Indicator");
            let mut text = state.search_text.clone();
            if ui.text_edit_singleline(&mut text).changed() {
                state.set_search_text(text);
            }
            if state.search_missed() {
                ui.label(
                    RichText::new("No indicators found matching your search.")
                        .color(Color32::from_rgb(255, 193, 7)),
                );
            } else if !state.search_results.is_empty() {
                ui.label("Search Results");
                let results = state.search_results.clone();
                for name in &results {
                    let is_selected = state.selection.indicator == *name;
                    if ui.selectable_label(is_selected, name).clicked() {
                        let next = state
                            .selection
                            .clone()
                            .with_search_pick(&state.catalog, name);
                        state.update(|_| next);
                    }
                }
            }
            ui.add_space(6.0);

            // ---- Chart type ----
            ui.strong("Chart Type");
            let mut chart_type = state.selection.chart_type;
            ui.horizontal(|ui: &mut Ui| {
                ui.radio_value(&mut chart_type, ChartType::Line, "Line");
                ui.radio_value(&mut chart_type, ChartType::Bar, "Bar");
            });
            state.update(|s| s.with_chart_type(chart_type));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} rows, {} indicators",
            state.data.country(),
            state.data.records().len(),
            state.data.indicators().len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Header / footer
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, state: &AppState) {
    let bounds = state.data.bounds();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(format!("Urban Development Dashboard: {}", state.data.country()))
                .size(32.0)
                .color(Color32::from_rgb(30, 136, 229)),
        );
        ui.label(
            RichText::new(format!(
                "Explore trends in urban indicators across categories (Population, Area, Infrastructure) from {} to {}",
                bounds.start, bounds.end
            ))
            .size(16.0),
        );
    });
    ui.add_space(12.0);
}

pub fn footer(ui: &mut Ui, state: &AppState) {
    let bounds = state.data.bounds();
    ui.add_space(40.0);
    ui.separator();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new("Data Limitations and Notes:").strong());
        ui.label(
            RichText::new(format!(
                "This dashboard presents urban development indicators for {} from {} to {}. \
                 Some indicators may have missing data for certain years. \
                 All data is sourced from official statistics and international development databases.",
                state.data.country(),
                bounds.start,
                bounds.end
            ))
            .small()
            .color(Color32::GRAY),
        );
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open indicator data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
