/// Data layer: core types, loading, categorization, and queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → IndicatorDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ CountryData  │  one country's rows, year bounds
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  filter   │ ──▶ │  stats    │  latest value, delta, normalization
///   └──────────┘     └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  filtered rows → CSV
///   └──────────┘
/// ```

pub mod category;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod loader;
pub mod model;
pub mod stats;
