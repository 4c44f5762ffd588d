use palette::Srgb;
use serde::Serialize;

use crate::color::{FEMALE_COLOR, MALE_COLOR, series_color};
use crate::data::filter::Subset;
use crate::data::model::Metric;

// ---------------------------------------------------------------------------
// Donut splits (mean-by-metric)
// ---------------------------------------------------------------------------

/// One slice of a donut chart: a metric label and its mean share.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareSlice {
    /// Metric label, e.g. `Male Share`.
    pub metric: &'static str,
    pub value: f64,
    #[serde(serialize_with = "crate::color::serialize_hex")]
    pub color: Srgb<u8>,
}

/// Mean `Male Share` / `Female Share` across every row of the subset.
///
/// With several occupations selected this is a mean of per-occupation
/// shares, deliberately unweighted by occupation size. Slices come out in
/// metric-label order (Female before Male) with positional palette colors.
pub fn gender_split(subset: &Subset) -> Vec<ShareSlice> {
    mean_by_metric(subset, &[Metric::FemaleShare, Metric::MaleShare])
}

/// Mean `Full-time Share` / `Part-time Share`, same aggregation as
/// [`gender_split`].
pub fn employment_type_split(subset: &Subset) -> Vec<ShareSlice> {
    mean_by_metric(subset, &[Metric::FullTimeShare, Metric::PartTimeShare])
}

/// Mean of the numeric values of each listed metric, in list order. The
/// list order is the ascending label order the original groupby produced.
/// Metrics with no numeric rows contribute no slice.
fn mean_by_metric(subset: &Subset, metrics: &[Metric]) -> Vec<ShareSlice> {
    metrics
        .iter()
        .filter_map(|&metric| {
            let values: Vec<f64> = subset
                .rows()
                .filter(|obs| obs.metric == metric)
                .filter_map(|obs| obs.value.as_number())
                .collect();
            if values.is_empty() {
                return None;
            }
            Some((metric.label(), values.iter().sum::<f64>() / values.len() as f64))
        })
        .enumerate()
        .map(|(idx, (metric, value))| ShareSlice {
            metric,
            value,
            color: series_color(idx),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Gender by occupation (paired bars, no aggregation)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupationShare {
    pub occupation: String,
    pub value: f64,
}

/// One bar series of the grouped gender chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderBarSeries {
    /// Legend label, `Male Share` or `Female Share`.
    pub label: &'static str,
    #[serde(serialize_with = "crate::color::serialize_hex")]
    pub color: Srgb<u8>,
    pub bars: Vec<OccupationShare>,
}

/// The raw per-occupation gender shares, unaveraged: one bar per matching
/// row, in row order, Male series first, with the fixed gender colors.
pub fn gender_by_occupation(subset: &Subset) -> Vec<GenderBarSeries> {
    let series = |metric: Metric, color: Srgb<u8>| GenderBarSeries {
        label: metric.label(),
        color,
        bars: subset
            .rows()
            .filter(|obs| obs.metric == metric)
            .filter_map(|obs| {
                obs.value.as_number().map(|value| OccupationShare {
                    occupation: obs.occupation.clone(),
                    value,
                })
            })
            .collect(),
    };

    vec![
        series(Metric::MaleShare, MALE_COLOR),
        series(Metric::FemaleShare, FEMALE_COLOR),
    ]
}
