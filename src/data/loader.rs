use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{EmploymentDataset, Metric, Observation, Value};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the employment outlook table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the original `employment_outlook.csv` layout (recommended)
/// * `.json`    – `[{ "Occupation": …, "Metric": …, "Year": …, "Value": … }, …]`
/// * `.parquet` – flat columns of the same four names
///
/// Every format produces the same dataset; a row with a metric label outside
/// the vocabulary fails the load, since nothing downstream could chart it.
pub fn load_file(path: &Path) -> Result<EmploymentDataset> {
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

/// CSV layout: a header row naming `Occupation`, `Metric`, `Year`, `Value`
/// (in any column order), one observation per record.
fn load_csv(path: &Path) -> Result<EmploymentDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let occupation_idx = headers
        .iter()
        .position(|h| h == "Occupation")
        .context("CSV missing 'Occupation' column")?;
    let metric_idx = headers
        .iter()
        .position(|h| h == "Metric")
        .context("CSV missing 'Metric' column")?;
    let year_idx = headers
        .iter()
        .position(|h| h == "Year")
        .context("CSV missing 'Year' column")?;
    let value_idx = headers
        .iter()
        .position(|h| h == "Value")
        .context("CSV missing 'Value' column")?;

    let mut observations = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let occupation = record.get(occupation_idx).unwrap_or("").to_string();
        let metric = Metric::parse(record.get(metric_idx).unwrap_or(""))
            .with_context(|| format!("CSV row {row_no}"))?;
        let year = parse_year(record.get(year_idx).unwrap_or(""), row_no)?;
        let value = Value::parse(record.get(value_idx).unwrap_or(""));

        observations.push(Observation {
            occupation,
            metric,
            year,
            value,
        });
    }

    Ok(EmploymentDataset::from_observations(observations))
}

fn parse_year(s: &str, row: usize) -> Result<i32> {
    s.trim()
        .parse::<i32>()
        .with_context(|| format!("Row {row}: '{s}' is not a year"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Occupation": "Registered Nurses", "Metric": "Employment",
///     "Year": 2020, "Value": 294000 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<EmploymentDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut observations = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let occupation = obj
            .get("Occupation")
            .and_then(|v| v.as_str())
            .with_context(|| format!("Row {i}: missing or invalid 'Occupation'"))?
            .to_string();
        let metric_label = obj
            .get("Metric")
            .and_then(|v| v.as_str())
            .with_context(|| format!("Row {i}: missing or invalid 'Metric'"))?;
        let metric = Metric::parse(metric_label).with_context(|| format!("Row {i}"))?;
        let year = obj
            .get("Year")
            .and_then(|v| v.as_i64())
            .with_context(|| format!("Row {i}: missing or invalid 'Year'"))?
            as i32;
        let value = json_to_value(obj.get("Value"));

        observations.push(Observation {
            occupation,
            metric,
            year,
            value,
        });
    }

    Ok(EmploymentDataset::from_observations(observations))
}

fn json_to_value(val: Option<&JsonValue>) -> Value {
    match val {
        Some(JsonValue::Number(n)) => match n.as_f64() {
            Some(v) => number_or_blank(v),
            None => Value::Text(n.to_string()),
        },
        Some(JsonValue::String(s)) => Value::parse(s),
        Some(JsonValue::Bool(b)) => Value::Text(b.to_string()),
        Some(JsonValue::Null) | None => Value::Text(String::new()),
        Some(other) => Value::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat `Occupation`, `Metric`, `Year`, `Value`
/// columns. `Value` may be Utf8 (mixed numeric/text, as the sample
/// generator writes it) or a plain numeric column.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<EmploymentDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut observations = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let occupation_idx = schema
            .index_of("Occupation")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'Occupation' column"))?;
        let metric_idx = schema
            .index_of("Metric")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'Metric' column"))?;
        let year_idx = schema
            .index_of("Year")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'Year' column"))?;
        let value_idx = schema
            .index_of("Value")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'Value' column"))?;

        let occupation_col = batch.column(occupation_idx);
        let metric_col = batch.column(metric_idx);
        let year_col = batch.column(year_idx);
        let value_col = batch.column(value_idx);

        for row in 0..batch.num_rows() {
            let occupation = extract_string(occupation_col, row)
                .with_context(|| format!("Row {row}: failed to read 'Occupation'"))?;
            let metric_label = extract_string(metric_col, row)
                .with_context(|| format!("Row {row}: failed to read 'Metric'"))?;
            let metric =
                Metric::parse(&metric_label).with_context(|| format!("Row {row}"))?;
            let year = extract_year(year_col, row)
                .with_context(|| format!("Row {row}: failed to read 'Year'"))?;
            let value = extract_value(value_col, row);

            observations.push(Observation {
                occupation,
                metric,
                year,
                value,
            });
        }
    }

    Ok(EmploymentDataset::from_observations(observations))
}

// -- Parquet / Arrow helpers --

/// Extract a string cell from a Utf8 or LargeUtf8 column.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(arr.value(row).to_string())
        }
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

/// Extract a year from an Int32 or Int64 column.
fn extract_year(col: &Arc<dyn Array>, row: usize) -> Result<i32> {
    if col.is_null(row) {
        bail!("null value in year column");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row))
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row) as i32)
        }
        other => bail!("Expected integer year column, got {other:?}"),
    }
}

/// Extract a `Value` cell from whatever column type the writer chose.
/// Nulls become blank text (they coerce to zero where the views allow it).
fn extract_value(col: &Arc<dyn Array>, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Text(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => {
            if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
                Value::parse(arr.value(row))
            } else {
                Value::Text(String::new())
            }
        }
        DataType::LargeUtf8 => Value::parse(col.as_string::<i64>().value(row)),
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            number_or_blank(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            number_or_blank(arr.value(row) as f64)
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Value::Number(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Value::Number(arr.value(row) as f64)
        }
        _ => Value::Text(format!("{:?}", col.data_type())),
    }
}

/// NaN and infinities carry no chartable number; keep them as blank text so
/// the state view coerces them to zero and the means skip them.
fn number_or_blank(v: f64) -> Value {
    if v.is_finite() {
        Value::Number(v)
    } else {
        Value::Text(String::new())
    }
}
