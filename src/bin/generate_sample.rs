//! Write a deterministic synthetic `employment_outlook.csv` (or `.parquet`
//! with `--parquet`) covering the full metric vocabulary, for demos and for
//! exercising the loader by hand.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Row {
    occupation: &'static str,
    metric: String,
    year: i32,
    value: String,
}

struct Profile {
    occupation: &'static str,
    /// Employment level in 2011, thousands.
    base_level: f64,
    /// Annual growth of the historical series.
    annual_growth: f64,
    rating: &'static str,
    projected_growth_pct: f64,
    male_share: f64,
    full_time_share: f64,
}

const PROFILES: [Profile; 5] = [
    Profile {
        occupation: "Primary School Teachers",
        base_level: 141.3,
        annual_growth: 0.016,
        rating: "Strong",
        projected_growth_pct: 7.4,
        male_share: 18.2,
        full_time_share: 74.9,
    },
    Profile {
        occupation: "Middle School Teachers",
        base_level: 19.8,
        annual_growth: 0.011,
        rating: "Moderate",
        projected_growth_pct: 4.1,
        male_share: 31.6,
        full_time_share: 81.3,
    },
    Profile {
        occupation: "Special Education Teachers",
        base_level: 22.4,
        annual_growth: 0.024,
        rating: "Very Strong",
        projected_growth_pct: 11.2,
        male_share: 14.8,
        full_time_share: 70.2,
    },
    Profile {
        occupation: "Registered Nurses",
        base_level: 257.6,
        annual_growth: 0.029,
        rating: "Very Strong",
        projected_growth_pct: 13.9,
        male_share: 11.9,
        full_time_share: 52.7,
    },
    Profile {
        occupation: "Structural Steel and Welding Trades Workers",
        base_level: 62.1,
        annual_growth: -0.004,
        rating: "Decline",
        projected_growth_pct: -2.3,
        male_share: 98.1,
        full_time_share: 93.4,
    },
];

const AGE_LABELS: [&str; 8] = [
    "Age 15 - 19",
    "Age 20 - 24",
    "Age 25 - 34",
    "Age 35 - 44",
    "Age 45 - 54",
    "Age 55 - 59",
    "Age 60 - 64",
    "Age 65 +",
];

// Rough national age-profile weights, reshaped per occupation with noise.
const AGE_WEIGHTS: [f64; 8] = [2.0, 9.0, 24.0, 25.0, 22.0, 9.0, 6.0, 3.0];

const STATE_LABELS: [&str; 8] = [
    "NSW (%)",
    "VIC (%)",
    "QLD (%)",
    "SA (%)",
    "WA (%)",
    "TAS (%)",
    "NT (%)",
    "ACT (%)",
];

// Population-ish state weights, reshaped per occupation with noise.
const STATE_WEIGHTS: [f64; 8] = [31.0, 26.0, 20.0, 7.0, 10.0, 2.0, 1.0, 3.0];

fn fmt1(v: f64) -> String {
    format!("{:.1}", v)
}

/// Scale noisy weights so the shares sum to 100, one decimal place.
fn shares(weights: &[f64], rng: &mut SimpleRng) -> Vec<f64> {
    let noisy: Vec<f64> = weights
        .iter()
        .map(|&w| (w + rng.gauss(0.0, w * 0.2)).max(0.1))
        .collect();
    let total: f64 = noisy.iter().sum();
    noisy.iter().map(|&w| w / total * 100.0).collect()
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();

    for profile in &PROFILES {
        let occupation = profile.occupation;

        // Historical employment levels, 2011-2021 (thousands).
        let mut level = profile.base_level;
        for year in 2011..=2021 {
            let observed = level * (1.0 + rng.gauss(0.0, 0.008));
            rows.push(Row {
                occupation,
                metric: "Employment".to_string(),
                year,
                value: fmt1(observed),
            });
            level *= 1.0 + profile.annual_growth;
        }

        // Five-year projection from the rating's growth figure.
        let projected = level * (1.0 + profile.projected_growth_pct / 100.0);
        rows.push(Row {
            occupation,
            metric: "Projected Employment level".to_string(),
            year: 2026,
            value: fmt1(projected),
        });
        rows.push(Row {
            occupation,
            metric: "Future Growth Rating".to_string(),
            year: 2021,
            value: profile.rating.to_string(),
        });
        rows.push(Row {
            occupation,
            metric: "Projected Employment Growth (%)".to_string(),
            year: 2021,
            value: fmt1(profile.projected_growth_pct),
        });

        for (label, share) in AGE_LABELS.iter().zip(shares(&AGE_WEIGHTS, rng)) {
            rows.push(Row {
                occupation,
                metric: (*label).to_string(),
                year: 2021,
                value: fmt1(share),
            });
        }

        let male = (profile.male_share + rng.gauss(0.0, 0.5)).clamp(0.0, 100.0);
        rows.push(Row {
            occupation,
            metric: "Male Share".to_string(),
            year: 2021,
            value: fmt1(male),
        });
        rows.push(Row {
            occupation,
            metric: "Female Share".to_string(),
            year: 2021,
            value: fmt1(100.0 - male),
        });

        let full_time = (profile.full_time_share + rng.gauss(0.0, 0.5)).clamp(0.0, 100.0);
        rows.push(Row {
            occupation,
            metric: "Full-time Share".to_string(),
            year: 2021,
            value: fmt1(full_time),
        });
        rows.push(Row {
            occupation,
            metric: "Part-time Share".to_string(),
            year: 2021,
            value: fmt1(100.0 - full_time),
        });

        for (i, (label, share)) in STATE_LABELS
            .iter()
            .zip(shares(&STATE_WEIGHTS, rng))
            .enumerate()
        {
            // Small jurisdictions are sometimes suppressed in the source
            // tables; mimic that so the zero-coercion path gets exercised.
            let value = if i >= 6 && rng.next_f64() < 0.3 {
                "N/A".to_string()
            } else {
                fmt1(share)
            };
            rows.push(Row {
                occupation,
                metric: (*label).to_string(),
                year: 2021,
                value,
            });
        }
    }

    rows
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating output file")?;
    writer
        .write_record(["Occupation", "Metric", "Year", "Value"])
        .context("writing header")?;
    for row in rows {
        let year = row.year.to_string();
        writer
            .write_record([
                row.occupation,
                row.metric.as_str(),
                year.as_str(),
                row.value.as_str(),
            ])
            .context("writing row")?;
    }
    writer.flush().context("flushing output")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Occupation", DataType::Utf8, false),
        Field::new("Metric", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("Value", DataType::Utf8, false),
    ]));

    let occupation_array =
        StringArray::from(rows.iter().map(|r| r.occupation).collect::<Vec<_>>());
    let metric_array =
        StringArray::from(rows.iter().map(|r| r.metric.as_str()).collect::<Vec<_>>());
    let year_array = Int64Array::from(rows.iter().map(|r| r.year as i64).collect::<Vec<_>>());
    let value_array =
        StringArray::from(rows.iter().map(|r| r.value.as_str()).collect::<Vec<_>>());

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(occupation_array),
            Arc::new(metric_array),
            Arc::new(year_array),
            Arc::new(value_array),
        ],
    )
    .context("creating record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let parquet = std::env::args().any(|a| a == "--parquet");
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    let path = if parquet {
        let path = "employment_outlook.parquet";
        write_parquet(&rows, path)?;
        path
    } else {
        let path = "employment_outlook.csv";
        write_csv(&rows, path)?;
        path
    };

    println!(
        "Wrote {} observations for {} occupations to {path}",
        rows.len(),
        PROFILES.len()
    );
    Ok(())
}
