use std::collections::BTreeMap;

use super::format::UnitKind;
use super::model::Record;

/// Latest year present in `records`, if any.
pub fn latest_year(records: &[Record]) -> Option<i32> {
    records.iter().map(|r| r.year).max()
}

/// First value recorded for `indicator` in `year`.
pub fn value_at(records: &[Record], indicator: &str, year: i32) -> Option<f64> {
    records
        .iter()
        .find(|r| r.year == year && r.indicator == indicator)
        .map(|r| r.value)
}

// ---------------------------------------------------------------------------
// Year-over-year delta
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    pub value: f64,
    pub formatted: String,
}

/// Change of `indicator` between `year - 1` and `year`.
///
/// `None` when either year has no observation; gaps are never interpolated.
pub fn year_over_year(
    records: &[Record],
    indicator: &str,
    year: i32,
    unit: UnitKind,
) -> Option<Delta> {
    let current = value_at(records, indicator, year)?;
    let prior = value_at(records, indicator, year - 1)?;
    let value = current - prior;
    Some(Delta {
        value,
        formatted: unit.format_delta(value),
    })
}

// ---------------------------------------------------------------------------
// Min-max normalization
// ---------------------------------------------------------------------------

/// Value assigned to every point when the subset has no spread.
pub const FLAT_NORMALIZED: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPoint {
    pub indicator: String,
    pub value: f64,
    pub normalized: f64,
}

/// Rescale each record's value into `[0, 1]` across the subset.
pub fn normalize(records: &[Record]) -> Vec<NormalizedPoint> {
    let min = records.iter().map(|r| r.value).fold(f64::INFINITY, f64::min);
    let max = records.iter().map(|r| r.value).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    records
        .iter()
        .map(|r| NormalizedPoint {
            indicator: r.indicator.clone(),
            value: r.value,
            normalized: if range > 0.0 {
                (r.value - min) / range
            } else {
                FLAT_NORMALIZED
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pivot
// ---------------------------------------------------------------------------

/// Per-indicator `[year, value]` series, averaging duplicate years.
///
/// Series come back in the order of `indicators`; those without rows are
/// left out.
pub fn pivot_by_indicator(records: &[Record], indicators: &[&str]) -> Vec<(String, Vec<[f64; 2]>)> {
    let mut cells: BTreeMap<(&str, i32), (f64, usize)> = BTreeMap::new();
    for r in records {
        let cell = cells.entry((r.indicator.as_str(), r.year)).or_insert((0.0, 0));
        cell.0 += r.value;
        cell.1 += 1;
    }

    indicators
        .iter()
        .filter_map(|&name| {
            let points: Vec<[f64; 2]> = cells
                .range((name, i32::MIN)..=(name, i32::MAX))
                .map(|(&(_, year), &(sum, n))| [year as f64, sum / n as f64])
                .collect();
            (!points.is_empty()).then(|| (name.to_string(), points))
        })
        .collect()
}

/// Break a year-sorted series wherever consecutive points are more than one
/// year apart, so a line never bridges missing years.
pub fn split_on_gaps(points: &[[f64; 2]]) -> Vec<&[[f64; 2]]> {
    points.chunk_by(|a, b| b[0] - a[0] <= 1.0).collect()
}
