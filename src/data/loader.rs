use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{LaunchDataset, LaunchRecord, Outcome, columns};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the launch columns (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per launch field
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
/// Only the four launch columns are read; the rest (flight number, full
/// booster version, ...) is ignored.
fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for required in columns::ALL {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut records = Vec::new();
    let mut raw = csv::StringRecord::new();
    while reader.read_record(&mut raw).context("reading CSV record")? {
        // 1-based file line, header included, matching the csv crate's own errors.
        let line = raw.position().map_or(0, |p| p.line());
        let record: LaunchRecord = raw
            .deserialize(Some(&headers))
            .with_context(|| format!("CSV line {line}"))?;
        record
            .validate()
            .with_context(|| format!("CSV line {line}"))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 1,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if !row.is_object() {
            bail!("Row {i} is not a JSON object");
        }
        let record: LaunchRecord =
            serde_json::from_value(row.clone()).with_context(|| format!("Row {i}"))?;
        record.validate().with_context(|| format!("Row {i}"))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema:
/// - `Launch Site`, `Booster Version Category`: Utf8 or LargeUtf8
/// - `Payload Mass (kg)`: Float64, Float32, Int64 or Int32
/// - `class`: Int64, Int32, Float64/Float32 (integral values), Boolean or Utf8
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = column(&batch, columns::LAUNCH_SITE)?;
        let payload_col = column(&batch, columns::PAYLOAD_MASS_KG)?;
        let class_col = column(&batch, columns::CLASS)?;
        let booster_col = column(&batch, columns::BOOSTER_VERSION_CATEGORY)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let launch_site = extract_string(site_col, row).with_context(|| {
                format!("Row {row_no}: failed to read '{}'", columns::LAUNCH_SITE)
            })?;
            let payload = extract_f64(payload_col, row).with_context(|| {
                format!("Row {row_no}: failed to read '{}'", columns::PAYLOAD_MASS_KG)
            })?;
            let outcome = extract_outcome(class_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{}'", columns::CLASS))?;
            let booster = extract_string(booster_col, row).with_context(|| {
                format!(
                    "Row {row_no}: failed to read '{}'",
                    columns::BOOSTER_VERSION_CATEGORY
                )
            })?;

            let record = LaunchRecord::new(launch_site, payload, outcome, booster)
                .with_context(|| format!("Row {row_no}"))?;
            records.push(record);
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'b>(batch: &'b RecordBatch, name: &str) -> Result<&'b ArrayRef> {
    batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))
}

fn downcast<T: Array + 'static>(col: &ArrayRef) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array for {:?}", col.data_type()))
}

fn extract_string(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

fn extract_f64(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let value = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row),
        DataType::Float32 => downcast::<Float32Array>(col)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row) as f64,
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row) as f64,
        other => bail!("Expected numeric column, got {other:?}"),
    };
    Ok(value)
}

fn extract_outcome(col: &ArrayRef, row: usize) -> Result<Outcome> {
    if col.is_null(row) {
        bail!("null value");
    }
    let outcome = match col.data_type() {
        DataType::Boolean => Outcome::from(downcast::<BooleanArray>(col)?.value(row)),
        DataType::Int64 => Outcome::try_from(downcast::<Int64Array>(col)?.value(row))?,
        DataType::Int32 => Outcome::try_from(i64::from(downcast::<Int32Array>(col)?.value(row)))?,
        DataType::Float64 => Outcome::from_class_f64(downcast::<Float64Array>(col)?.value(row))?,
        DataType::Float32 => {
            Outcome::from_class_f64(f64::from(downcast::<Float32Array>(col)?.value(row)))?
        }
        DataType::Utf8 | DataType::LargeUtf8 => extract_string(col, row)?.parse::<Outcome>()?,
        other => bail!("Expected integer or boolean column, got {other:?}"),
    };
    Ok(outcome)
}
