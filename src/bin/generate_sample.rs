use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform noise in `[-amplitude, amplitude]`.
    fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

/// How a synthetic series evolves and which years it is reported for.
struct Series {
    name: &'static str,
    start: f64,
    /// Compound growth per year.
    growth: f64,
    noise: f64,
    first_year: i32,
    /// Report every `step` years (1 = annual).
    step: i32,
}

const SERIES: &[Series] = &[
    Series {
        name: "Population density (people per sq. km of land area)",
        start: 158.0,
        growth: 0.012,
        noise: 0.5,
        first_year: 1961,
        step: 1,
    },
    Series {
        name: "Population in largest city",
        start: 510_000.0,
        growth: 0.009,
        noise: 2_000.0,
        first_year: 1960,
        step: 1,
    },
    Series {
        name: "Population in the largest city (% of urban population)",
        start: 24.0,
        growth: -0.004,
        noise: 0.05,
        first_year: 1960,
        step: 1,
    },
    Series {
        name: "Urban population",
        start: 1_620_000.0,
        growth: 0.011,
        noise: 5_000.0,
        first_year: 1960,
        step: 1,
    },
    Series {
        name: "Urban population (% of total population)",
        start: 16.4,
        growth: 0.002,
        noise: 0.02,
        first_year: 1960,
        step: 1,
    },
    Series {
        name: "Urban population growth (annual %)",
        start: 3.2,
        growth: -0.02,
        noise: 0.2,
        first_year: 1961,
        step: 1,
    },
    Series {
        name: "Urban population living in areas where elevation is below 5 meters (% of total population)",
        start: 2.1,
        growth: 0.003,
        noise: 0.01,
        first_year: 1990,
        step: 10,
    },
    Series {
        name: "Urban land area (sq. km)",
        start: 1_150.0,
        growth: 0.015,
        noise: 10.0,
        first_year: 1990,
        step: 10,
    },
    Series {
        name: "Urban land area where elevation is below 5 meters (% of total land area)",
        start: 0.4,
        growth: 0.01,
        noise: 0.005,
        first_year: 1990,
        step: 10,
    },
    Series {
        name: "Urban land area where elevation is below 5 meters (sq. km)",
        start: 210.0,
        growth: 0.012,
        noise: 2.0,
        first_year: 1990,
        step: 10,
    },
    Series {
        name: "Access to electricity, urban (% of urban population)",
        start: 72.0,
        growth: 0.012,
        noise: 0.4,
        first_year: 1991,
        step: 1,
    },
    Series {
        name: "Mortality caused by road traffic injury (per 100,000 population)",
        start: 14.0,
        growth: 0.0,
        noise: 0.3,
        first_year: 2000,
        step: 5,
    },
    Series {
        name: "PM2.5 air pollution, mean annual exposure (micrograms per cubic meter)",
        start: 32.0,
        growth: -0.01,
        noise: 0.8,
        first_year: 1990,
        step: 5,
    },
    Series {
        name: "PM2.5 air pollution, population exposed to levels exceeding WHO guideline value (% of total)",
        start: 100.0,
        growth: 0.0,
        noise: 0.0,
        first_year: 1990,
        step: 5,
    },
];

const FIRST_YEAR: i32 = 1960;
const LAST_YEAR: i32 = 2023;

struct Row {
    country: &'static str,
    indicator: &'static str,
    year: i32,
    value: f64,
}

fn generate(country: &'static str, scale: f64, rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for s in SERIES {
        for year in (s.first_year..=LAST_YEAR).step_by(s.step as usize) {
            let t = (year - s.first_year) as f64;
            let value = s.start * scale * (1.0 + s.growth).powf(t) + rng.jitter(s.noise * scale);
            // Percentages stay within [0, 100].
            let value = if s.name.contains('%') {
                value.clamp(0.0, 100.0)
            } else {
                value.max(0.0)
            };
            rows.push(Row {
                country,
                indicator: s.name,
                year,
                value,
            });
        }
    }
    rows
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).context("creating CSV")?;
    wtr.write_record(["Country Name", "Indicator Name", "Year", "Value"])?;
    for r in rows {
        wtr.write_record([
            r.country.to_string(),
            r.indicator.to_string(),
            r.year.to_string(),
            r.value.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Country Name", DataType::Utf8, false),
        Field::new("Indicator Name", DataType::Utf8, false),
        Field::new("Year", DataType::Int32, false),
        Field::new("Value", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(rows.iter().map(|r| r.country).collect::<Vec<_>>())),
            Arc::new(StringArray::from(rows.iter().map(|r| r.indicator).collect::<Vec<_>>())),
            Arc::new(Int32Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.value).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut rows = generate("Sri Lanka", 1.0, &mut rng);
    // A second country so the country filter has something to drop.
    rows.extend(generate("Maldives", 0.05, &mut rng));

    write_csv("cleaned_urban_data.csv", &rows)?;
    write_parquet("cleaned_urban_data.parquet", &rows)?;

    println!(
        "Wrote {} rows ({} indicators, {FIRST_YEAR}-{LAST_YEAR}) to cleaned_urban_data.csv and cleaned_urban_data.parquet",
        rows.len(),
        SERIES.len()
    );
    Ok(())
}
