use crate::data::category::{Catalog, Category};
use crate::data::filter::{filter_by_year_range, search_indicators};
use crate::data::model::{CountryData, IndicatorDataset, YearRange};
use crate::data::stats::latest_year;

// ---------------------------------------------------------------------------
// Selection – what the user has picked
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Trend,
    Comparison,
    Snapshot,
    Summary,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Trend, Tab::Comparison, Tab::Snapshot, Tab::Summary];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Trend => "Indicator Trend",
            Tab::Comparison => "Category Comparison",
            Tab::Snapshot => "Yearly Snapshot",
            Tab::Summary => "Summary Stats",
        }
    }
}

/// The complete filter selection. Every transition returns a new value;
/// nothing else in the UI carries hidden selection state.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub category: Category,
    pub indicator: String,
    pub year_range: YearRange,
    pub chart_type: ChartType,
    pub snapshot_year: i32,
}

impl Selection {
    /// First category, its first indicator, the full year range.
    pub fn initial(data: &CountryData) -> Self {
        let category = Category::ALL[0];
        let bounds = data.bounds();
        Selection {
            category,
            indicator: first_indicator(category),
            year_range: bounds,
            chart_type: ChartType::Line,
            snapshot_year: bounds.end,
        }
    }

    /// Switch category; the indicator resets to the category's first entry
    /// unless it already belongs there.
    pub fn with_category(self, category: Category) -> Self {
        let indicator = if category.indicators().contains(&self.indicator.as_str()) {
            self.indicator
        } else {
            first_indicator(category)
        };
        Selection {
            category,
            indicator,
            ..self
        }
    }

    pub fn with_indicator(self, indicator: &str) -> Self {
        Selection {
            indicator: indicator.to_string(),
            ..self
        }
    }

    /// Pick an indicator from search results; the category follows it when
    /// the catalog knows the indicator.
    pub fn with_search_pick(self, catalog: &Catalog, indicator: &str) -> Self {
        let category = catalog.resolve_category(indicator, self.category);
        Selection {
            category,
            indicator: indicator.to_string(),
            ..self
        }
    }

    /// Change the year range. The snapshot year jumps to the latest year
    /// with data inside the new range.
    pub fn with_year_range(self, data: &CountryData, start: i32, end: i32) -> Self {
        let year_range = YearRange::new(start, end).clamp_to(data.bounds());
        if year_range == self.year_range {
            return self;
        }
        let snapshot_year = latest_year(&filter_by_year_range(data.records(), year_range))
            .unwrap_or(year_range.end);
        Selection {
            year_range,
            snapshot_year,
            ..self
        }
    }

    pub fn with_chart_type(self, chart_type: ChartType) -> Self {
        Selection { chart_type, ..self }
    }

    pub fn with_snapshot_year(self, data: &CountryData, year: i32) -> Self {
        let bounds = data.bounds();
        Selection {
            snapshot_year: year.clamp(bounds.start, bounds.end),
            ..self
        }
    }
}

fn first_indicator(category: Category) -> String {
    category
        .indicators()
        .first()
        .map(|s| s.to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub catalog: Catalog,

    /// Everything loaded from the file, all countries.
    pub dataset: IndicatorDataset,

    /// The selected country's rows.
    pub data: CountryData,

    pub selection: Selection,

    /// Free-text indicator search and its current matches.
    pub search_text: String,
    pub search_results: Vec<String>,

    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: IndicatorDataset, data: CountryData) -> Self {
        let selection = Selection::initial(&data);
        Self {
            catalog: Catalog::new(),
            dataset,
            data,
            selection,
            search_text: String::new(),
            search_results: Vec::new(),
            tab: Tab::Trend,
            status_message: None,
        }
    }

    /// Replace the dataset, keeping the current country.
    ///
    /// The old data stays in place if the new file has no rows for it.
    pub fn set_dataset(&mut self, dataset: IndicatorDataset) {
        match CountryData::new(&dataset, self.data.country()) {
            Ok(data) => {
                self.selection = Selection::initial(&data);
                self.data = data;
                self.dataset = dataset;
                self.refresh_search();
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Rejected dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Apply a selection transition.
    pub fn update(&mut self, f: impl FnOnce(Selection) -> Selection) {
        let next = f(self.selection.clone());
        if next != self.selection {
            log::debug!("Selection changed: {next:?}");
            self.selection = next;
        }
    }

    pub fn set_search_text(&mut self, text: String) {
        self.search_text = text;
        self.refresh_search();
    }

    /// Recompute matches. When the current indicator is not among them, the
    /// first match becomes the selected indicator and its category follows.
    fn refresh_search(&mut self) {
        self.search_results = search_indicators(self.data.indicators(), self.search_text.trim());
        let Some(first) = self.search_results.first() else {
            return;
        };
        if self.search_results.contains(&self.selection.indicator) {
            return;
        }
        let next = self
            .selection
            .clone()
            .with_search_pick(&self.catalog, first);
        self.update(|_| next);
    }

    /// Whether the search box holds text that matched nothing.
    pub fn search_missed(&self) -> bool {
        !self.search_text.trim().is_empty() && self.search_results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn data() -> CountryData {
        let rows = [1960, 1970, 1980]
            .into_iter()
            .map(|year| Record {
                country: "Sri Lanka".into(),
                indicator: "Urban population".into(),
                year,
                value: 1.0,
            })
            .chain(std::iter::once(Record {
                country: "Sri Lanka".into(),
                indicator: "Rainfall (mm)".into(),
                year: 1970,
                value: 2.0,
            }))
            .collect();
        CountryData::new(&IndicatorDataset::from_records(rows), "Sri Lanka").unwrap()
    }

    #[test]
    fn initial_selection_covers_all_years() {
        let sel = Selection::initial(&data());
        assert_eq!(sel.category, Category::Population);
        assert_eq!(sel.indicator, Category::Population.indicators()[0]);
        assert_eq!(sel.year_range, YearRange::new(1960, 1980));
        assert_eq!(sel.snapshot_year, 1980);
        assert_eq!(sel.chart_type, ChartType::Line);
    }

    #[test]
    fn category_change_resets_indicator() {
        let sel = Selection::initial(&data()).with_category(Category::Area);
        assert_eq!(sel.indicator, "Urban land area (sq. km)");

        let kept = Selection::initial(&data())
            .with_indicator("Urban population")
            .with_category(Category::Population);
        assert_eq!(kept.indicator, "Urban population");
    }

    #[test]
    fn year_controls_are_clamped() {
        let d = data();
        let sel = Selection::initial(&d)
            .with_year_range(&d, 1900, 2100)
            .with_snapshot_year(&d, 1950);
        assert_eq!(sel.year_range, YearRange::new(1960, 1980));
        assert_eq!(sel.snapshot_year, 1960);

        let reversed = sel.with_year_range(&d, 1975, 1965);
        assert_eq!(reversed.year_range, YearRange::new(1965, 1975));
        // Latest year with data in 1965..=1975 is 1970.
        assert_eq!(reversed.snapshot_year, 1970);
    }

    #[test]
    fn search_pick_moves_category() {
        let catalog = Catalog::new();
        let sel = Selection::initial(&data()).with_search_pick(
            &catalog,
            "PM2.5 air pollution, mean annual exposure (micrograms per cubic meter)",
        );
        assert_eq!(sel.category, Category::Infrastructure);

        let unknown = sel.with_search_pick(&catalog, "Rainfall (mm)");
        assert_eq!(unknown.category, Category::Infrastructure);
        assert_eq!(unknown.indicator, "Rainfall (mm)");
    }

    #[test]
    fn search_results_follow_text() {
        let d = data();
        let mut state = AppState::new(IndicatorDataset::default(), d);
        state.set_search_text("rain".into());
        assert_eq!(state.search_results, vec!["Rainfall (mm)".to_string()]);
        assert!(!state.search_missed());

        state.set_search_text("snow".into());
        assert!(state.search_missed());

        state.set_search_text(String::new());
        assert!(!state.search_missed());
    }

    #[test]
    fn matching_search_selects_first_result() {
        const PM25: &str = "PM2.5 air pollution, mean annual exposure (micrograms per cubic meter)";
        let rows = vec![
            Record {
                country: "Sri Lanka".into(),
                indicator: "Urban population".into(),
                year: 2000,
                value: 1.0,
            },
            Record {
                country: "Sri Lanka".into(),
                indicator: PM25.into(),
                year: 2000,
                value: 30.0,
            },
        ];
        let d = CountryData::new(&IndicatorDataset::from_records(rows), "Sri Lanka").unwrap();
        let mut state = AppState::new(IndicatorDataset::default(), d);

        state.set_search_text("pm2.5".into());
        assert_eq!(state.selection.indicator, PM25);
        assert_eq!(state.selection.category, Category::Infrastructure);

        // A miss leaves the previous pick in place.
        state.set_search_text("snow".into());
        assert_eq!(state.selection.indicator, PM25);
        assert_eq!(state.selection.category, Category::Infrastructure);

        // Current indicator already among the matches: nothing moves.
        state.update(|s| s.with_category(Category::Population).with_indicator("Urban population"));
        state.set_search_text("urban".into());
        assert_eq!(state.selection.indicator, "Urban population");
        assert_eq!(state.selection.category, Category::Population);
    }

    #[test]
    fn foreign_dataset_is_rejected() {
        let mut state = AppState::new(IndicatorDataset::default(), data());
        state.set_dataset(IndicatorDataset::from_records(vec![Record {
            country: "India".into(),
            indicator: "Urban population".into(),
            year: 2000,
            value: 1.0,
        }]));
        assert_eq!(state.data.country(), "Sri Lanka");
        assert!(state.status_message.is_some());
    }
}
