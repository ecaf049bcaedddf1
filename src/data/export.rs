use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::model::{Record, YearRange};

/// One row of the exported table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Indicator Name")]
    pub indicator: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

impl From<&Record> for ExportRow {
    fn from(r: &Record) -> Self {
        ExportRow {
            year: r.year,
            indicator: r.indicator.clone(),
            value: r.value,
        }
    }
}

/// `sri_lanka_Population_indicators_1960-2023.csv`
pub fn export_file_name(country: &str, category: Category, range: YearRange) -> String {
    let country = country.to_lowercase().replace(' ', "_");
    format!(
        "{country}_{}_indicators_{}-{}.csv",
        category.name(),
        range.start,
        range.end
    )
}

/// Serialize `rows` as UTF-8 CSV with a `Year,Indicator Name,Value` header.
pub fn write_csv<W: Write>(writer: W, rows: &[Record]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for r in rows {
        wtr.serialize(ExportRow::from(r))
            .context("writing CSV row")?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

pub fn export_to_path(path: &Path, rows: &[Record]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, rows)?;
    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}
