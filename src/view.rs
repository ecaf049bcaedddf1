use crate::data::category::Catalog;
use crate::data::filter::{
    filter_by_category, filter_by_indicator, filter_by_year, filter_by_year_range,
};
use crate::data::format::UnitKind;
use crate::data::model::{CountryData, Record};
use crate::data::stats::{
    NormalizedPoint, latest_year, normalize, pivot_by_indicator, value_at, year_over_year,
};
use crate::state::Selection;

// ---------------------------------------------------------------------------
// Metric card
// ---------------------------------------------------------------------------

/// One KPI in the summary grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub indicator: String,
    /// `None` renders as "No data".
    pub value: Option<String>,
    /// Omitted when the previous year has no observation.
    pub delta: Option<String>,
}

// ---------------------------------------------------------------------------
// DashboardView – every derived subset for one frame
// ---------------------------------------------------------------------------

/// Derived, display-ready subsets for the current selection.
///
/// Recomputed from scratch whenever the selection changes.
#[derive(Debug, Clone)]
pub struct DashboardView {
    /// Country rows inside the selected year range.
    pub filtered: Vec<Record>,
    /// Selected indicator, ascending by year.
    pub indicator_series: Vec<Record>,
    pub indicator_unit: UnitKind,
    /// Category indicators inside the range, pivoted per indicator.
    pub category_series: Vec<(String, Vec<[f64; 2]>)>,
    /// Category rows inside the range, unpivoted (grouped bars).
    pub category_rows: Vec<Record>,
    /// Category rows at the snapshot year, ascending by value.
    pub snapshot: Vec<Record>,
    /// Latest year of `filtered`; `None` when the range holds no rows.
    pub latest_year: Option<i32>,
    pub metrics: Vec<Metric>,
    pub radar: Vec<NormalizedPoint>,
    /// Category rows sorted by (indicator, year) for the table and export.
    pub table: Vec<Record>,
}

impl DashboardView {
    pub fn compute(data: &CountryData, catalog: &Catalog, sel: &Selection) -> Self {
        let indicators = sel.category.indicators();

        let filtered = filter_by_year_range(data.records(), sel.year_range);
        let indicator_series = filter_by_indicator(&filtered, &sel.indicator);
        let category_rows = filter_by_category(&filtered, indicators);
        let category_series = pivot_by_indicator(&category_rows, indicators);

        let mut snapshot = filter_by_year(&category_rows, sel.snapshot_year);
        snapshot.sort_by(|a, b| a.value.total_cmp(&b.value));

        let latest = latest_year(&filtered);
        let summary = latest
            .map(|y| filter_by_year(&category_rows, y))
            .unwrap_or_default();

        let metrics = match latest {
            Some(year) if !summary.is_empty() => indicators
                .iter()
                .map(|&name| {
                    let unit = catalog.unit_of(name);
                    Metric {
                        indicator: name.to_string(),
                        value: value_at(&summary, name, year).map(|v| unit.format(v)),
                        delta: year_over_year(&filtered, name, year, unit).map(|d| d.formatted),
                    }
                })
                .collect(),
            _ => Vec::new(),
        };

        let radar = normalize(&summary);

        let mut table = category_rows.clone();
        table.sort_by(|a, b| a.indicator.cmp(&b.indicator).then(a.year.cmp(&b.year)));

        DashboardView {
            indicator_unit: catalog.unit_of(&sel.indicator),
            filtered,
            indicator_series,
            category_series,
            category_rows,
            snapshot,
            latest_year: latest,
            metrics,
            radar,
            table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::category::Category;
    use crate::data::model::IndicatorDataset;

    const SHARE: &str = "Urban population (% of total population)";
    const COUNT: &str = "Urban population";
    const AREA: &str = "Urban land area (sq. km)";

    fn rec(indicator: &str, year: i32, value: f64) -> Record {
        Record {
            country: "Sri Lanka".into(),
            indicator: indicator.into(),
            year,
            value,
        }
    }

    fn data() -> CountryData {
        let ds = IndicatorDataset::from_records(vec![
            rec(COUNT, 2020, 3_000_000.0),
            rec(COUNT, 2021, 3_100_000.0),
            rec(SHARE, 2019, 18.0),
            rec(SHARE, 2021, 18.5),
            rec(AREA, 2021, 900.0),
            rec(COUNT, 2022, 3_200_000.0),
        ]);
        CountryData::new(&ds, "Sri Lanka").unwrap()
    }

    fn selection(d: &CountryData) -> Selection {
        Selection::initial(d)
            .with_indicator(COUNT)
            .with_year_range(d, 2019, 2021)
            .with_snapshot_year(d, 2021)
    }

    #[test]
    fn subsets_follow_selection() {
        let d = data();
        let v = DashboardView::compute(&d, &Catalog::new(), &selection(&d));

        assert_eq!(v.filtered.len(), 5);
        assert_eq!(v.indicator_series.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2020, 2021]);
        assert_eq!(v.indicator_unit, UnitKind::Count);
        // Area rows are not in the Population category.
        assert!(v.category_rows.iter().all(|r| r.indicator != AREA));
        assert_eq!(v.latest_year, Some(2021));
        // Snapshot ascending by value.
        let snap: Vec<f64> = v.snapshot.iter().map(|r| r.value).collect();
        assert_eq!(snap, vec![18.5, 3_100_000.0]);
    }

    #[test]
    fn metrics_cover_every_category_indicator() {
        let d = data();
        let v = DashboardView::compute(&d, &Catalog::new(), &selection(&d));

        assert_eq!(v.metrics.len(), Category::Population.indicators().len());

        let count = v.metrics.iter().find(|m| m.indicator == COUNT).unwrap();
        assert_eq!(count.value.as_deref(), Some("3,100,000"));
        assert_eq!(count.delta.as_deref(), Some("100000.00"));

        // 2020 missing for the share: value present, delta omitted.
        let share = v.metrics.iter().find(|m| m.indicator == SHARE).unwrap();
        assert_eq!(share.value.as_deref(), Some("18.50%"));
        assert_eq!(share.delta, None);

        let absent = v
            .metrics
            .iter()
            .find(|m| m.indicator == "Population in largest city")
            .unwrap();
        assert_eq!(absent.value, None);
    }

    #[test]
    fn radar_is_normalized_over_latest_year() {
        let d = data();
        let v = DashboardView::compute(&d, &Catalog::new(), &selection(&d));
        assert_eq!(v.radar.len(), 2);
        let mut n: Vec<f64> = v.radar.iter().map(|p| p.normalized).collect();
        n.sort_by(f64::total_cmp);
        assert_eq!(n, vec![0.0, 1.0]);
    }

    #[test]
    fn table_sorted_by_indicator_then_year() {
        let d = data();
        let v = DashboardView::compute(&d, &Catalog::new(), &selection(&d));
        let keys: Vec<(&str, i32)> = v
            .table
            .iter()
            .map(|r| (r.indicator.as_str(), r.year))
            .collect();
        assert_eq!(
            keys,
            vec![(COUNT, 2020), (COUNT, 2021), (SHARE, 2019), (SHARE, 2021)]
        );
    }

    #[test]
    fn empty_category_yields_empty_views() {
        let d = data();
        let sel = selection(&d).with_category(Category::Infrastructure);
        let v = DashboardView::compute(&d, &Catalog::new(), &sel);
        assert!(v.category_rows.is_empty());
        assert!(v.snapshot.is_empty());
        assert!(v.metrics.is_empty());
        assert!(v.radar.is_empty());
        assert!(v.table.is_empty());
    }
}
