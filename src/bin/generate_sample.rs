use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

/// (category, flights, max payload kg, success probability)
const BOOSTER_ERAS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 5, 700.0, 0.2),
    ("v1.1", 15, 4500.0, 0.35),
    ("FT", 24, 9600.0, 0.7),
    ("B4", 11, 7000.0, 0.55),
    ("B5", 1, 3700.0, 1.0),
];

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

/// Seeded SplitMix64 stream, so every run writes the same launch table.
struct LaunchRng(u64);

impl LaunchRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate_rows(rng: &mut LaunchRng) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut flight_number = 1;

    for &(category, flights, max_payload, p_success) in &BOOSTER_ERAS {
        for serial in 0..flights {
            // Early boosters never flew from the Vandenberg or 39A pads.
            let site = if category == "v1.0" {
                SITES[0]
            } else {
                rng.pick(&SITES)
            };
            let payload = (rng.next_f64() * max_payload).round();
            let class = i64::from(rng.next_f64() < p_success);

            rows.push(Row {
                flight_number,
                launch_site: site.to_string(),
                class,
                payload_mass_kg: payload,
                booster_version: format!("F9 {category} B{:04}", 1000 + serial),
                booster_version_category: category.to_string(),
            });
            flight_number += 1;
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.launch_site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.booster_version))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| &r.booster_version_category),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = LaunchRng(42);
    let rows = generate_rows(&mut rng);

    write_csv(&rows, "sample_launches.csv")?;
    write_parquet(&rows, "sample_launches.parquet")?;

    let successes = rows.iter().filter(|r| r.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to sample_launches.csv and sample_launches.parquet",
        rows.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_table() {
        let a = generate_rows(&mut LaunchRng(42));
        let b = generate_rows(&mut LaunchRng(42));
        let total: usize = BOOSTER_ERAS.iter().map(|era| era.1).sum();
        assert_eq!(a.len(), total);
        assert!(a.iter().zip(&b).all(|(x, y)| {
            x.launch_site == y.launch_site
                && x.payload_mass_kg == y.payload_mass_kg
                && x.class == y.class
        }));
    }

    #[test]
    fn test_rows_are_valid_launches() {
        let rows = generate_rows(&mut LaunchRng(7));
        for row in &rows {
            assert!(SITES.contains(&row.launch_site.as_str()));
            assert!(row.class == 0 || row.class == 1);
            assert!(row.payload_mass_kg >= 0.0 && row.payload_mass_kg <= 9600.0);
        }
        assert!(rows
            .iter()
            .filter(|r| r.booster_version_category == "v1.0")
            .all(|r| r.launch_site == SITES[0]));
    }

    #[test]
    fn test_unit_interval() {
        let mut rng = LaunchRng(1);
        assert!((0..1000).map(|_| rng.next_f64()).all(|v| (0.0..1.0).contains(&v)));
    }
}
