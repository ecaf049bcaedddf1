use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::SchemaError;
use super::model::{
    COUNTRY_COLUMN, INDICATOR_COLUMN, IndicatorDataset, Record, VALUE_COLUMN, YEAR_COLUMN,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an indicator table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Country Name`, `Indicator Name`, `Year`, `Value`
/// * `.json`    – `[{ "Country Name": ..., "Indicator Name": ..., "Year": ..., "Value": ... }, ...]`
/// * `.parquet` – columns of the same names
///
/// Rows with an empty value are skipped; anything else malformed is an error.
pub fn load_file(path: &Path) -> Result<IndicatorDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            read_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::info!(
        "Loaded {} rows for {} countries from {}",
        dataset.len(),
        dataset.countries().len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Long-format CSV, one observation per row. Extra columns are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<IndicatorDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(SchemaError::MissingColumn(name))
    };
    let country_idx = column(COUNTRY_COLUMN)?;
    let indicator_idx = column(INDICATOR_COLUMN)?;
    let year_idx = column(YEAR_COLUMN)?;
    let value_idx = column(VALUE_COLUMN)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

        let raw_value = cell(value_idx);
        if raw_value.is_empty() {
            skipped += 1;
            continue;
        }

        let country = required_text(cell(country_idx), row_no, COUNTRY_COLUMN)?;
        let indicator = required_text(cell(indicator_idx), row_no, INDICATOR_COLUMN)?;
        let year = parse_year(cell(year_idx), row_no)?;
        let value = raw_value
            .parse::<f64>()
            .map_err(|_| SchemaError::InvalidValue {
                row: row_no,
                raw: raw_value.to_string(),
            })?;

        records.push(Record {
            country,
            indicator,
            year,
            value,
        });
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} CSV rows with an empty value");
    }
    Ok(IndicatorDataset::from_records(records))
}

fn required_text(s: &str, row: usize, column: &'static str) -> Result<String, SchemaError> {
    if s.is_empty() {
        return Err(SchemaError::EmptyCell { row, column });
    }
    Ok(s.to_string())
}

/// Accept `1960` as well as `1960.0` (pandas writes float years when the
/// column ever held a NaN).
fn parse_year(s: &str, row: usize) -> Result<i32, SchemaError> {
    let invalid = || SchemaError::InvalidYear {
        row,
        raw: s.to_string(),
    };
    if let Ok(y) = s.parse::<i32>() {
        return Ok(y);
    }
    let f = s.parse::<f64>().map_err(|_| invalid())?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Ok(f as i32)
    } else {
        Err(invalid())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Country Name": "Sri Lanka", "Indicator Name": "Urban population",
///     "Year": 1960, "Value": 1620000.0 },
///   ...
/// ]
/// ```
pub fn read_json(text: &str) -> Result<IndicatorDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let field = |name: &'static str| obj.get(name).ok_or(SchemaError::MissingColumn(name));

        let value = match field(VALUE_COLUMN)? {
            JsonValue::Null => continue,
            v => v.as_f64().ok_or_else(|| SchemaError::InvalidValue {
                row: i,
                raw: v.to_string(),
            })?,
        };

        let text_field = |name: &'static str| -> Result<String, SchemaError> {
            let s = field(name)?.as_str().unwrap_or("");
            required_text(s.trim(), i, name)
        };

        let year = match field(YEAR_COLUMN)? {
            JsonValue::String(s) => parse_year(s.trim(), i)?,
            v => parse_year(&v.to_string(), i)?,
        };

        records.push(Record {
            country: text_field(COUNTRY_COLUMN)?,
            indicator: text_field(INDICATOR_COLUMN)?,
            year,
            value,
        });
    }

    Ok(IndicatorDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the four long-format columns.
///
/// `Year` may be Int32, Int64 or a whole-numbered float; `Value` Float32 or
/// Float64. Rows with a null value are skipped.
fn load_parquet(path: &Path) -> Result<IndicatorDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &'static str| {
            schema
                .index_of(name)
                .map(|i| batch.column(i))
                .map_err(|_| SchemaError::MissingColumn(name))
        };
        let country_col = column(COUNTRY_COLUMN)?;
        let indicator_col = column(INDICATOR_COLUMN)?;
        let year_col = column(YEAR_COLUMN)?;
        let value_col = column(VALUE_COLUMN)?;

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row;
            let Some(value) = extract_f64(value_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{VALUE_COLUMN}'"))?
            else {
                continue;
            };
            let country = extract_string(country_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COUNTRY_COLUMN}'"))?;
            let indicator = extract_string(indicator_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{INDICATOR_COLUMN}'"))?;
            let year = extract_year(year_col, row, row_no)?;

            records.push(Record {
                country: required_text(country.trim(), row_no, COUNTRY_COLUMN)?,
                indicator: required_text(indicator.trim(), row_no, INDICATOR_COLUMN)?,
                year,
                value,
            });
        }
        row_offset += batch.num_rows();
    }

    Ok(IndicatorDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected a string column, got {other:?}"),
    }
}

/// `None` for a null cell.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let v = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(Some(v))
}

fn extract_year(col: &Arc<dyn Array>, row: usize, row_no: usize) -> Result<i32> {
    let raw = extract_f64(col, row)
        .with_context(|| format!("Row {row_no}: failed to read '{YEAR_COLUMN}'"))?
        .ok_or(SchemaError::EmptyCell {
            row: row_no,
            column: YEAR_COLUMN,
        })?;
    Ok(parse_year(&raw.to_string(), row_no)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Country Name,Country Code,Indicator Name,Year,Value
Sri Lanka,LKA,Urban population,1960,1620000
Sri Lanka,LKA,\"Access to electricity, urban (% of urban population)\",1961,55.5
Sri Lanka,LKA,Urban population,1961,
India,IND,Urban population,1960.0,80000000
";

    #[test]
    fn csv_parses_and_skips_empty_values() {
        let ds = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        let r = &ds.records()[1];
        assert_eq!(r.indicator, "Access to electricity, urban (% of urban population)");
        assert_eq!(r.year, 1961);
        assert_eq!(r.value, 55.5);
        assert_eq!(ds.records()[2].year, 1960);
    }

    #[test]
    fn csv_missing_column_is_a_schema_error() {
        let err = read_csv("Country Name,Indicator Name,Value\nA,B,1\n".as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::MissingColumn(YEAR_COLUMN))
        );
    }

    #[test]
    fn csv_bad_cells_are_reported_not_coerced() {
        let bad_year = "Country Name,Indicator Name,Year,Value\nA,B,19x0,1\n";
        let err = read_csv(bad_year.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SchemaError>(),
            Some(SchemaError::InvalidYear { row: 0, .. })
        ));

        let bad_value = "Country Name,Indicator Name,Year,Value\nA,B,1960,lots\n";
        let err = read_csv(bad_value.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SchemaError>(),
            Some(SchemaError::InvalidValue { row: 0, .. })
        ));
    }

    #[test]
    fn json_records_load() {
        let text = r#"[
            {"Country Name": "Sri Lanka", "Indicator Name": "Urban population", "Year": 1960, "Value": 10.5},
            {"Country Name": "Sri Lanka", "Indicator Name": "Urban population", "Year": "1961", "Value": null},
            {"Country Name": "Sri Lanka", "Indicator Name": "Urban land area (sq. km)", "Year": 1962.0, "Value": 3}
        ]"#;
        let ds = read_json(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].year, 1962);
        assert_eq!(ds.records()[1].value, 3.0);
    }

    #[test]
    fn json_missing_field_is_a_schema_error() {
        let err = read_json(r#"[{"Country Name": "A", "Year": 1, "Value": 1}]"#).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::MissingColumn(INDICATOR_COLUMN))
        );
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        assert!(load_file(Path::new("data.xlsx")).is_err());
    }

    // -- Parquet --

    use arrow::array::ArrayRef;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    /// Write `columns` to a fresh parquet file under the temp dir.
    fn write_parquet(file_name: &str, columns: Vec<(&str, ArrayRef)>) -> std::path::PathBuf {
        let schema = Arc::new(Schema::new(
            columns
                .iter()
                .map(|(name, arr)| Field::new(*name, arr.data_type().clone(), true))
                .collect::<Vec<_>>(),
        ));
        let batch = RecordBatch::try_new(
            schema.clone(),
            columns.into_iter().map(|(_, arr)| arr).collect(),
        )
        .unwrap();

        let path = std::env::temp_dir().join(format!("{}_{file_name}", std::process::id()));
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn parquet_loads_int64_years_and_skips_null_values() {
        let name = "Urban population";
        let path = write_parquet(
            "urban_int64_years.parquet",
            vec![
                (
                    COUNTRY_COLUMN,
                    Arc::new(StringArray::from(vec!["Sri Lanka", "Sri Lanka"])) as ArrayRef,
                ),
                (
                    INDICATOR_COLUMN,
                    Arc::new(StringArray::from(vec![name, name])) as ArrayRef,
                ),
                (YEAR_COLUMN, Arc::new(Int64Array::from(vec![1960, 1961])) as ArrayRef),
                (
                    VALUE_COLUMN,
                    Arc::new(Float64Array::from(vec![Some(1.5), None])) as ArrayRef,
                ),
            ],
        );

        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 1);
        let r = &ds.records()[0];
        assert_eq!(r.country, "Sri Lanka");
        assert_eq!(r.indicator, "Urban population");
        assert_eq!(r.year, 1960);
        assert_eq!(r.value, 1.5);
    }

    #[test]
    fn parquet_missing_column_is_a_schema_error() {
        let path = write_parquet(
            "urban_no_value.parquet",
            vec![
                (COUNTRY_COLUMN, Arc::new(StringArray::from(vec!["Sri Lanka"])) as ArrayRef),
                (
                    INDICATOR_COLUMN,
                    Arc::new(StringArray::from(vec!["Urban population"])) as ArrayRef,
                ),
                (YEAR_COLUMN, Arc::new(Int32Array::from(vec![1960])) as ArrayRef),
            ],
        );

        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::MissingColumn(VALUE_COLUMN))
        );
    }
}
