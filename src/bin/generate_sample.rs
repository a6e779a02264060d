use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use statrs::distribution::Normal;

const COUNTRIES: [&str; 20] = [
    "Argentina", "Australia", "Brazil", "Canada", "China", "Egypt", "France", "Germany", "India",
    "Indonesia", "Italy", "Japan", "Mexico", "Russia", "Saudi Arabia", "South Africa",
    "South Korea", "Spain", "Turkey", "USA",
];
const YEARS: std::ops::RangeInclusive<i64> = 2000..=2024;

/// One synthetic record of the global water consumption dataset.
#[derive(Debug, Clone, Serialize)]
struct WaterRecord {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Year")]
    year: i64,
    #[serde(rename = "Total Water Consumption (Billion m3)")]
    total: f64,
    #[serde(rename = "Per Capita Water Use (L/Day)")]
    per_capita: f64,
    #[serde(rename = "Agricultural Water Use (%)")]
    agricultural: f64,
    #[serde(rename = "Industrial Water Use (%)")]
    industrial: f64,
    #[serde(rename = "Household Water Use (%)")]
    household: f64,
    #[serde(rename = "Rainfall Impact (mm)")]
    rainfall: Option<f64>,
    #[serde(rename = "Groundwater Depletion Rate (%)")]
    depletion: f64,
    #[serde(rename = "Water Scarcity Level")]
    scarcity: String,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn scarcity_level(depletion: f64) -> &'static str {
    match depletion {
        d if d < 1.5 => "Low",
        d if d < 3.0 => "Moderate",
        d if d < 4.5 => "High",
        _ => "Critical",
    }
}

fn generate(rng: &mut StdRng) -> Result<Vec<WaterRecord>> {
    let per_capita = Normal::new(250.0, 60.0)?;
    let rainfall = Normal::new(1200.0, 450.0)?;
    let depletion = Normal::new(2.8, 1.2)?;

    let mut records = Vec::new();
    for country in COUNTRIES {
        let scale: f64 = rng.gen_range(20.0..900.0);
        for year in YEARS {
            let agricultural: f64 = rng.gen_range(40.0..80.0);
            let industrial: f64 = rng.gen_range(5.0..(95.0 - agricultural));
            let d = depletion.sample(rng).clamp(0.1, 6.0);
            records.push(WaterRecord {
                country: country.to_string(),
                year,
                total: round2(scale * rng.gen_range(0.8..1.2)),
                per_capita: round2(per_capita.sample(rng)),
                agricultural: round2(agricultural),
                industrial: round2(industrial),
                household: round2(100.0 - agricultural - industrial),
                rainfall: Some(round2(rainfall.sample(rng).max(50.0))),
                depletion: round2(d),
                scarcity: scarcity_level(d).to_string(),
            });
        }
    }

    // a few incomplete and repeated rows for the cleaning step to remove
    for i in [7, 131, 402] {
        records[i].rainfall = None;
    }
    for i in [3, 250, 499] {
        records.push(records[i].clone());
    }
    Ok(records)
}

fn write_csv(path: &Path, records: &[WaterRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for record in records {
        writer.serialize(record).context("writing CSV record")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, records: &[WaterRecord]) -> Result<()> {
    let floats = |pick: fn(&WaterRecord) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(records.iter().map(pick).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Country", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("Total Water Consumption (Billion m3)", DataType::Float64, false),
        Field::new("Per Capita Water Use (L/Day)", DataType::Float64, false),
        Field::new("Agricultural Water Use (%)", DataType::Float64, false),
        Field::new("Industrial Water Use (%)", DataType::Float64, false),
        Field::new("Household Water Use (%)", DataType::Float64, false),
        Field::new("Rainfall Impact (mm)", DataType::Float64, true),
        Field::new("Groundwater Depletion Rate (%)", DataType::Float64, false),
        Field::new("Water Scarcity Level", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.country.as_str()),
        )),
        Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.year))),
        floats(|r| r.total),
        floats(|r| r.per_capita),
        floats(|r| r.agricultural),
        floats(|r| r.industrial),
        floats(|r| r.household),
        Arc::new(Float64Array::from(
            records.iter().map(|r| r.rainfall).collect::<Vec<_>>(),
        )),
        floats(|r| r.depletion),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.scarcity.as_str()),
        )),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet file")?;
    Ok(())
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data.csv"));

    let mut rng = StdRng::seed_from_u64(42);
    let records = generate(&mut rng)?;

    let is_parquet = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&output_path, &records)?;
    } else {
        write_csv(&output_path, &records)?;
    }

    println!(
        "Wrote {} records ({} countries x {} years, plus repeats) to {}",
        records.len(),
        COUNTRIES.len(),
        YEARS.count(),
        output_path.display()
    );
    Ok(())
}
