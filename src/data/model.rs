use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::SchemaError;

pub const COUNTRY_COLUMN: &str = "Country Name";
pub const INDICATOR_COLUMN: &str = "Indicator Name";
pub const YEAR_COLUMN: &str = "Year";
pub const VALUE_COLUMN: &str = "Value";

// ---------------------------------------------------------------------------
// Record – one observation
// ---------------------------------------------------------------------------

/// A single (country, indicator, year) observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Country Name")]
    pub country: String,
    #[serde(rename = "Indicator Name")]
    pub indicator: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Value")]
    pub value: f64,
}

// ---------------------------------------------------------------------------
// YearRange – inclusive bounds
// ---------------------------------------------------------------------------

/// Inclusive year interval. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Clamp both bounds into `bounds`.
    pub fn clamp_to(self, bounds: YearRange) -> Self {
        YearRange::new(
            self.start.clamp(bounds.start, bounds.end),
            self.end.clamp(bounds.start, bounds.end),
        )
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

// ---------------------------------------------------------------------------
// IndicatorDataset – the raw loaded table
// ---------------------------------------------------------------------------

/// The full parsed table, all countries included. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct IndicatorDataset {
    records: Vec<Record>,
    countries: BTreeSet<String>,
}

impl IndicatorDataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let countries = records.iter().map(|r| r.country.clone()).collect();
        IndicatorDataset { records, countries }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sorted set of distinct country names.
    pub fn countries(&self) -> &BTreeSet<String> {
        &self.countries
    }

    /// First `n` rows, in file order.
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CountryData – the data-access object every query runs against
// ---------------------------------------------------------------------------

/// Rows for one country plus the bounds derived from them.
///
/// Built once after loading and passed by reference to the query layer.
#[derive(Debug, Clone)]
pub struct CountryData {
    country: String,
    records: Vec<Record>,
    bounds: YearRange,
    /// Distinct indicator names in first-appearance order.
    indicators: Vec<String>,
}

impl CountryData {
    pub fn new(dataset: &IndicatorDataset, country: &str) -> Result<Self, SchemaError> {
        let records = super::filter::filter_by_country(dataset.records(), country);

        let (min, max) = records
            .iter()
            .fold(None, |acc: Option<(i32, i32)>, r| match acc {
                None => Some((r.year, r.year)),
                Some((lo, hi)) => Some((lo.min(r.year), hi.max(r.year))),
            })
            .ok_or_else(|| SchemaError::UnknownCountry(country.to_string()))?;

        let mut indicators: Vec<String> = Vec::new();
        for r in &records {
            if !indicators.contains(&r.indicator) {
                indicators.push(r.indicator.clone());
            }
        }

        Ok(CountryData {
            country: country.to_string(),
            records,
            bounds: YearRange::new(min, max),
            indicators,
        })
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Smallest and largest year present for this country.
    pub fn bounds(&self) -> YearRange {
        self.bounds
    }

    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }
}
