// ---------------------------------------------------------------------------
// UnitKind – how an indicator's values are displayed
// ---------------------------------------------------------------------------

/// Display unit of an indicator, decided once from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Percentage,
    Area,
    RatePer100k,
    Concentration,
    /// Unit-less series; values of 1000 or more get thousands separators.
    Count,
    /// Bare two-decimal number.
    Plain,
}

impl UnitKind {
    /// Classify an indicator name. First match wins, in this order:
    /// `%`, `sq. km`, `per 100,000`, `micrograms`.
    pub fn classify(indicator: &str) -> Self {
        if indicator.contains('%') {
            UnitKind::Percentage
        } else if indicator.contains("sq. km") {
            UnitKind::Area
        } else if indicator.contains("per 100,000") {
            UnitKind::RatePer100k
        } else if indicator.contains("micrograms") {
            UnitKind::Concentration
        } else {
            UnitKind::Count
        }
    }

    /// Format a value of this unit for display.
    pub fn format(self, value: f64) -> String {
        match self {
            UnitKind::Percentage => format!("{value:.2}%"),
            UnitKind::Area => format!("{value:.2} km²"),
            UnitKind::RatePer100k => format!("{value:.2} per 100k"),
            UnitKind::Concentration => format!("{value:.2} μg/m³"),
            UnitKind::Count if value >= 1000.0 => with_thousands(value),
            UnitKind::Count | UnitKind::Plain => format!("{value:.2}"),
        }
    }

    /// Format a year-over-year change. Only percentages keep their suffix.
    pub fn format_delta(self, delta: f64) -> String {
        match self {
            UnitKind::Percentage => format!("{delta:.2}%"),
            _ => format!("{delta:.2}"),
        }
    }

    /// Y-axis title for a trend chart of this unit.
    pub fn axis_title(self) -> &'static str {
        match self {
            UnitKind::Percentage => "Percentage (%)",
            UnitKind::Area => "Area (sq. km)",
            _ => "Value",
        }
    }
}

/// Format a value for an indicator by name.
pub fn format_value(value: f64, indicator: &str) -> String {
    UnitKind::classify(indicator).format(value)
}

/// Round to an integer and group digits in threes: `1500000.4` → `1,500,000`.
fn with_thousands(value: f64) -> String {
    let digits = format!("{value:.0}");
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.as_str()),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{sign}{out}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_has_two_decimals() {
        assert_eq!(format_value(0.0, "Urban population (% of total population)"), "0.00%");
        assert_eq!(format_value(18.456, "Urban population growth (annual %)"), "18.46%");
    }

    #[test]
    fn large_counts_get_separators() {
        assert_eq!(format_value(1_500_000.0, "Urban population"), "1,500,000");
        assert_eq!(format_value(1000.0, "Urban population"), "1,000");
        assert_eq!(format_value(999.5, "Population in largest city"), "999.50");
    }

    #[test]
    fn unit_suffixes() {
        assert_eq!(
            format_value(
                12.3456,
                "PM2.5 air pollution, mean annual exposure (micrograms per cubic meter)"
            ),
            "12.35 μg/m³"
        );
        assert_eq!(format_value(250.0, "Urban land area (sq. km)"), "250.00 km²");
        assert_eq!(
            format_value(
                11.2,
                "Mortality caused by road traffic injury (per 100,000 population)"
            ),
            "11.20 per 100k"
        );
    }

    #[test]
    fn percent_wins_over_later_matches() {
        // Contains both "%" and "sq. km"-style wording; "%" is checked first.
        assert_eq!(
            UnitKind::classify(
                "Urban land area where elevation is below 5 meters (% of total land area)"
            ),
            UnitKind::Percentage
        );
        assert_eq!(
            UnitKind::classify("Population density (people per sq. km of land area)"),
            UnitKind::Area
        );
    }

    #[test]
    fn deltas_keep_only_percent_suffix() {
        assert_eq!(UnitKind::Percentage.format_delta(-0.5), "-0.50%");
        assert_eq!(UnitKind::Area.format_delta(3.0), "3.00");
        assert_eq!(UnitKind::Count.format_delta(12345.0), "12345.00");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(with_thousands(1234567.0), "1,234,567");
        assert_eq!(with_thousands(-1234.0), "-1,234");
        assert_eq!(with_thousands(100.0), "100");
        assert_eq!(with_thousands(999_999.6), "1,000,000");
    }
}
