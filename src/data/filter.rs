use super::model::{Record, YearRange};

// ---------------------------------------------------------------------------
// Row filters
// ---------------------------------------------------------------------------
//
// Every filter borrows its input and returns a fresh Vec, keeping the
// original row order unless noted. An empty result is a normal outcome.

/// Rows whose country equals `country`.
pub fn filter_by_country(records: &[Record], country: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.country == country)
        .cloned()
        .collect()
}

/// Rows with `range.start <= year <= range.end`.
pub fn filter_by_year_range(records: &[Record], range: YearRange) -> Vec<Record> {
    records
        .iter()
        .filter(|r| range.contains(r.year))
        .cloned()
        .collect()
}

/// Time series for one indicator, sorted ascending by year (stable).
pub fn filter_by_indicator(records: &[Record], indicator: &str) -> Vec<Record> {
    let mut series: Vec<Record> = records
        .iter()
        .filter(|r| r.indicator == indicator)
        .cloned()
        .collect();
    series.sort_by_key(|r| r.year);
    series
}

/// Rows whose indicator is one of `indicators`.
pub fn filter_by_category(records: &[Record], indicators: &[&str]) -> Vec<Record> {
    records
        .iter()
        .filter(|r| indicators.contains(&r.indicator.as_str()))
        .cloned()
        .collect()
}

/// Rows for exactly one year.
pub fn filter_by_year(records: &[Record], year: i32) -> Vec<Record> {
    records.iter().filter(|r| r.year == year).cloned().collect()
}

// ---------------------------------------------------------------------------
// Indicator search
// ---------------------------------------------------------------------------

/// Case-insensitive substring match over indicator names.
///
/// An empty needle matches nothing: the search box is inactive while empty.
pub fn search_indicators(names: &[String], needle: &str) -> Vec<String> {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    names
        .iter()
        .filter(|n| n.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(indicator: &str, year: i32, value: f64) -> Record {
        Record {
            country: "Sri Lanka".into(),
            indicator: indicator.into(),
            year,
            value,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            rec("Urban population", 1965, 3.0),
            rec("Urban population", 1960, 1.0),
            rec("Urban land area (sq. km)", 1960, 10.0),
            rec("Urban population", 1962, 2.0),
            rec("Urban land area (sq. km)", 1970, 11.0),
        ]
    }

    #[test]
    fn year_range_is_inclusive_and_idempotent() {
        let records = sample();
        let range = YearRange::new(1960, 1965);
        let once = filter_by_year_range(&records, range);

        assert_eq!(once.len(), 4);
        assert!(once.iter().all(|r| (1960..=1965).contains(&r.year)));

        let twice = filter_by_year_range(&once, range);
        assert_eq!(once, twice);
        // Source untouched.
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn indicator_series_is_sorted_by_year() {
        let series = filter_by_indicator(&sample(), "Urban population");
        let years: Vec<i32> = series.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1960, 1962, 1965]);
    }

    #[test]
    fn category_filter_keeps_order() {
        let out = filter_by_category(&sample(), &["Urban land area (sq. km)"]);
        let years: Vec<i32> = out.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1960, 1970]);
    }

    #[test]
    fn empty_results_are_not_errors() {
        assert!(filter_by_year(&sample(), 1999).is_empty());
        assert!(filter_by_indicator(&sample(), "nope").is_empty());
        assert!(filter_by_category(&sample(), &[]).is_empty());
        assert!(filter_by_country(&sample(), "India").is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let names = vec![
            "Urban population".to_string(),
            "PM2.5 air pollution, mean annual exposure (micrograms per cubic meter)".to_string(),
        ];
        assert_eq!(search_indicators(&names, "URBAN"), vec!["Urban population".to_string()]);
        assert_eq!(search_indicators(&names, "pm2.5").len(), 1);
        assert!(search_indicators(&names, "rainfall").is_empty());
        assert!(search_indicators(&names, "").is_empty());
    }
}
