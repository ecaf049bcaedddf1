use std::collections::HashMap;
use std::fmt;

use super::format::UnitKind;

// ---------------------------------------------------------------------------
// Category – fixed indicator groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Population,
    Area,
    Infrastructure,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 3] = [Category::Population, Category::Area, Category::Infrastructure];

    pub fn name(self) -> &'static str {
        match self {
            Category::Population => "Population",
            Category::Area => "Area",
            Category::Infrastructure => "Infrastructure",
        }
    }

    /// Indicator names belonging to this category, in display order.
    pub fn indicators(self) -> &'static [&'static str] {
        match self {
            Category::Population => &[
                "Population density (people per sq. km of land area)",
                "Population in largest city",
                "Population in the largest city (% of urban population)",
                "Urban population",
                "Urban population (% of total population)",
                "Urban population growth (annual %)",
                "Urban population living in areas where elevation is below 5 meters (% of total population)",
            ],
            Category::Area => &[
                "Urban land area (sq. km)",
                "Urban land area where elevation is below 5 meters (% of total land area)",
                "Urban land area where elevation is below 5 meters (sq. km)",
            ],
            Category::Infrastructure => &[
                "Access to electricity, urban (% of urban population)",
                "Mortality caused by road traffic injury (per 100,000 population)",
                "PM2.5 air pollution, mean annual exposure (micrograms per cubic meter)",
                "PM2.5 air pollution, population exposed to levels exceeding WHO guideline value (% of total)",
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// Catalog – indicator → (category, unit) index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorInfo {
    pub category: Category,
    pub unit: UnitKind,
}

/// Reverse index over the static category table, built once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    index: HashMap<&'static str, IndicatorInfo>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        let mut index = HashMap::new();
        for category in Category::ALL {
            for &name in category.indicators() {
                let info = IndicatorInfo {
                    category,
                    unit: UnitKind::classify(name),
                };
                let previous = index.insert(name, info);
                debug_assert!(previous.is_none(), "indicator listed twice: {name}");
            }
        }
        Catalog { index }
    }

    pub fn info(&self, indicator: &str) -> Option<IndicatorInfo> {
        self.index.get(indicator).copied()
    }

    pub fn category_of(&self, indicator: &str) -> Option<Category> {
        self.info(indicator).map(|i| i.category)
    }

    /// Unit of an indicator. Names outside the table are classified on the fly.
    pub fn unit_of(&self, indicator: &str) -> UnitKind {
        self.info(indicator)
            .map(|i| i.unit)
            .unwrap_or_else(|| UnitKind::classify(indicator))
    }

    /// Category of `indicator`, or `current` when the table does not list it.
    pub fn resolve_category(&self, indicator: &str, current: Category) -> Category {
        match self.category_of(indicator) {
            Some(c) => c,
            None => {
                log::warn!(
                    "Indicator '{indicator}' is not in the category table; keeping category {current}"
                );
                current
            }
        }
    }
}
