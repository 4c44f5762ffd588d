use palette::Srgb;
use serde::Serialize;

use crate::color::series_color;
use crate::data::filter::Subset;
use crate::data::model::{AgeBand, Metric};

// ---------------------------------------------------------------------------
// Age profile (% share)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeShare {
    /// Serialized as the chart category label, e.g. `Age 15 - 19`.
    pub band: AgeBand,
    pub value: f64,
}

/// One occupation's bar segments in the stacked age profile chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeProfile {
    pub occupation: String,
    #[serde(serialize_with = "crate::color::serialize_hex")]
    pub color: Srgb<u8>,
    /// Shares in the fixed bucket display order; buckets missing from the
    /// data are simply absent.
    pub shares: Vec<AgeShare>,
}

/// Build the age profile for the subset.
///
/// Occupations are enumerated from the age rows only (an occupation with no
/// age data takes no palette slot here), and each profile's buckets are
/// forced into the fixed display order regardless of file row order.
pub fn age_distribution(subset: &Subset) -> Vec<AgeProfile> {
    let mut order: Vec<&str> = Vec::new();
    for obs in subset.rows() {
        if matches!(obs.metric, Metric::Age(_)) && !order.contains(&obs.occupation.as_str()) {
            order.push(obs.occupation.as_str());
        }
    }

    order
        .into_iter()
        .enumerate()
        .map(|(idx, occupation)| {
            let mut shares: Vec<AgeShare> = subset
                .rows()
                .filter(|obs| obs.occupation == occupation)
                .filter_map(|obs| match obs.metric {
                    Metric::Age(band) => {
                        obs.value.as_number().map(|value| AgeShare { band, value })
                    }
                    _ => None,
                })
                .collect();
            shares.sort_by_key(|share| share.band);

            AgeProfile {
                occupation: occupation.to_string(),
                color: series_color(idx),
                shares,
            }
        })
        .collect()
}
