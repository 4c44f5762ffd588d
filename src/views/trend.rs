use palette::Srgb;
use serde::Serialize;

use crate::color::{growth_rating_color, series_color};
use crate::data::filter::Subset;
use crate::data::model::Metric;

// ---------------------------------------------------------------------------
// Employment trend (2011-2026)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

/// One line of the trend chart: solid for history, dashed for the forecast
/// continuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub occupation: String,
    /// Legend label: the occupation, with ` (Forecast)` appended on the
    /// continuation series.
    pub label: String,
    pub forecast: bool,
    #[serde(serialize_with = "crate::color::serialize_hex")]
    pub color: Srgb<u8>,
    pub points: Vec<TrendPoint>,
}

/// Build the trend series for the subset.
///
/// Every occupation gets a historical series (kept even when it has no
/// employment rows, so palette positions stay aligned with the other
/// charts). Occupations with forecast figures get a second, forecast-tagged
/// series whose points restate the historical ones so the dashed line
/// visually continues from the last solid point.
pub fn trend_series(subset: &Subset) -> Vec<TrendSeries> {
    let mut series = Vec::new();

    for (idx, occupation) in subset.occupations().into_iter().enumerate() {
        let color = series_color(idx);

        let historical = points_for(subset, occupation, Metric::Employment);
        series.push(TrendSeries {
            occupation: occupation.to_string(),
            label: occupation.to_string(),
            forecast: false,
            color,
            points: historical.clone(),
        });

        let forecast = points_for(subset, occupation, Metric::ProjectedEmployment);
        if !forecast.is_empty() {
            let mut points = historical;
            points.extend(forecast);
            series.push(TrendSeries {
                occupation: occupation.to_string(),
                label: format!("{occupation} (Forecast)"),
                forecast: true,
                color,
                points,
            });
        }
    }

    series
}

fn points_for(subset: &Subset, occupation: &str, metric: Metric) -> Vec<TrendPoint> {
    subset
        .rows()
        .filter(|obs| obs.occupation == occupation && obs.metric == metric)
        .filter_map(|obs| {
            obs.value.as_number().map(|value| TrendPoint {
                year: obs.year,
                value,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Forecast metrics table
// ---------------------------------------------------------------------------

/// One row of the forecast metrics table next to the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastMetricsRow {
    pub occupation: String,
    /// Rating text exactly as the dataset spells it.
    pub rating: String,
    #[serde(serialize_with = "crate::color::serialize_hex")]
    pub rating_color: Srgb<u8>,
    /// `Projected Employment Growth (%)` when the dataset has it.
    pub projected_growth_pct: Option<f64>,
}

/// First `Future Growth Rating` value for the occupation, with its display
/// color. Unrecognised rating strings keep the default color; an occupation
/// without a rating row yields `None`.
pub fn growth_rating_lookup(subset: &Subset, occupation: &str) -> Option<(String, Srgb<u8>)> {
    let rating = subset
        .rows()
        .find(|obs| obs.occupation == occupation && obs.metric == Metric::FutureGrowthRating)?
        .value
        .to_string();
    let color = growth_rating_color(&rating);
    Some((rating, color))
}

/// Table rows for every occupation in the subset that has a rating;
/// occupations without one are omitted, matching the dashboard table.
pub fn forecast_metrics(subset: &Subset) -> Vec<ForecastMetricsRow> {
    subset
        .occupations()
        .into_iter()
        .filter_map(|occupation| {
            let (rating, rating_color) = growth_rating_lookup(subset, occupation)?;
            let projected_growth_pct = subset
                .rows()
                .find(|obs| {
                    obs.occupation == occupation && obs.metric == Metric::ProjectedGrowthPct
                })
                .and_then(|obs| obs.value.as_number());
            Some(ForecastMetricsRow {
                occupation: occupation.to_string(),
                rating,
                rating_color,
                projected_growth_pct,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{DEFAULT_RATING_COLOR, SERIES_PALETTE};
    use crate::data::filter::{Selection, filter_by_occupation};
    use crate::data::model::{EmploymentDataset, Observation, Value};

    fn obs(occupation: &str, metric: Metric, year: i32, value: f64) -> Observation {
        Observation {
            occupation: occupation.to_string(),
            metric,
            year,
            value: Value::Number(value),
        }
    }

    fn obs_text(occupation: &str, metric: Metric, year: i32, value: &str) -> Observation {
        Observation {
            occupation: occupation.to_string(),
            metric,
            year,
            value: Value::Text(value.to_string()),
        }
    }

    #[test]
    fn forecast_series_continues_from_the_last_historical_point() {
        let ds = EmploymentDataset::from_observations(vec![
            obs("Nurse", Metric::Employment, 2020, 1000.0),
            obs("Nurse", Metric::ProjectedEmployment, 2025, 1200.0),
        ]);
        let subset = filter_by_occupation(&ds, &Selection::new());
        let series = trend_series(&subset);

        assert_eq!(series.len(), 2);

        assert_eq!(series[0].label, "Nurse");
        assert!(!series[0].forecast);
        assert_eq!(
            series[0].points,
            vec![TrendPoint {
                year: 2020,
                value: 1000.0
            }]
        );

        assert_eq!(series[1].label, "Nurse (Forecast)");
        assert!(series[1].forecast);
        assert_eq!(
            series[1].points,
            vec![
                TrendPoint {
                    year: 2020,
                    value: 1000.0
                },
                TrendPoint {
                    year: 2025,
                    value: 1200.0
                },
            ]
        );
        // Continuation keeps the occupation's color.
        assert_eq!(series[1].color, series[0].color);
    }

    #[test]
    fn occupations_without_forecast_rows_get_history_only() {
        let ds = EmploymentDataset::from_observations(vec![
            obs("Bakers", Metric::Employment, 2019, 30.0),
            obs("Bakers", Metric::Employment, 2020, 31.0),
        ]);
        let subset = filter_by_occupation(&ds, &Selection::new());
        let series = trend_series(&subset);

        assert_eq!(series.len(), 1);
        assert!(!series[0].forecast);
        assert_eq!(series[0].points.len(), 2);
    }

    #[test]
    fn colors_are_assigned_by_subset_position() {
        let ds = EmploymentDataset::from_observations(vec![
            obs("First", Metric::Employment, 2020, 1.0),
            obs("Second", Metric::Employment, 2020, 2.0),
        ]);

        let all = filter_by_occupation(&ds, &Selection::new());
        let series = trend_series(&all);
        assert_eq!(series[0].color, SERIES_PALETTE[0]);
        assert_eq!(series[1].color, SERIES_PALETTE[1]);

        // Narrowing the selection moves the survivor to the first slot.
        let only_second: Selection = ["Second".to_string()].into_iter().collect();
        let narrowed = filter_by_occupation(&ds, &only_second);
        let series = trend_series(&narrowed);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].occupation, "Second");
        assert_eq!(series[0].color, SERIES_PALETTE[0]);
    }

    #[test]
    fn occupations_with_no_employment_rows_still_hold_a_palette_slot() {
        let ds = EmploymentDataset::from_observations(vec![
            obs("SharesOnly", Metric::MaleShare, 2021, 60.0),
            obs("Tracked", Metric::Employment, 2020, 5.0),
        ]);
        let subset = filter_by_occupation(&ds, &Selection::new());
        let series = trend_series(&subset);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].occupation, "SharesOnly");
        assert!(series[0].points.is_empty());
        assert_eq!(series[1].occupation, "Tracked");
        assert_eq!(series[1].color, SERIES_PALETTE[1]);
    }

    #[test]
    fn rating_lookup_defaults_unknown_strings_to_black() {
        let ds = EmploymentDataset::from_observations(vec![
            obs_text("Nurse", Metric::FutureGrowthRating, 2021, "Excellent"),
            obs_text("Baker", Metric::FutureGrowthRating, 2021, "Decline"),
        ]);
        let subset = filter_by_occupation(&ds, &Selection::new());

        let (rating, color) = growth_rating_lookup(&subset, "Nurse").unwrap();
        assert_eq!(rating, "Excellent");
        assert_eq!(color, DEFAULT_RATING_COLOR);

        let (_, decline_color) = growth_rating_lookup(&subset, "Baker").unwrap();
        assert_ne!(decline_color, DEFAULT_RATING_COLOR);

        assert!(growth_rating_lookup(&subset, "Plumber").is_none());
    }

    #[test]
    fn forecast_metrics_skips_unrated_occupations() {
        let ds = EmploymentDataset::from_observations(vec![
            obs("Unrated", Metric::Employment, 2020, 1.0),
            obs_text("Rated", Metric::FutureGrowthRating, 2021, "Strong"),
            obs("Rated", Metric::ProjectedGrowthPct, 2021, 8.4),
            obs_text("NoPct", Metric::FutureGrowthRating, 2021, "Stable"),
        ]);
        let subset = filter_by_occupation(&ds, &Selection::new());
        let rows = forecast_metrics(&subset);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].occupation, "Rated");
        assert_eq!(rows[0].rating, "Strong");
        assert_eq!(rows[0].projected_growth_pct, Some(8.4));
        assert_eq!(rows[1].occupation, "NoPct");
        assert_eq!(rows[1].projected_growth_pct, None);
    }
}
