use std::ops::RangeInclusive;

use serde::Serialize;

use crate::data::filter::{Selection, filter_by_occupation};
use crate::data::model::EmploymentDataset;
use crate::views::age::{age_distribution, AgeProfile};
use crate::views::shares::{
    employment_type_split, gender_by_occupation, gender_split, GenderBarSeries, ShareSlice,
};
use crate::views::state::{state_distribution, StateShare};
use crate::views::trend::{forecast_metrics, trend_series, ForecastMetricsRow, TrendSeries};

// ---------------------------------------------------------------------------
// Dashboard snapshot: every view, for one selection
// ---------------------------------------------------------------------------

/// The complete set of renderable records for one selection. This is the
/// collaborator boundary: plain data, colors as hex strings, no rendering
/// concern on this side of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// All occupation names in the dataset, in encounter order (the
    /// dropdown options of the UI).
    pub occupations: Vec<String>,
    pub trend: Vec<TrendSeries>,
    pub forecast_metrics: Vec<ForecastMetricsRow>,
    pub age_profile: Vec<AgeProfile>,
    pub gender_split: Vec<ShareSlice>,
    pub employment_type_split: Vec<ShareSlice>,
    pub gender_by_occupation: Vec<GenderBarSeries>,
    pub state_distribution: Vec<StateShare>,
}

/// Recompute every view for the selection. Pure and stateless: each call
/// filters and aggregates from scratch, so two rapid selection changes
/// cannot interfere.
pub fn render_snapshot(dataset: &EmploymentDataset, selection: &Selection) -> DashboardSnapshot {
    snapshot_for(dataset, selection, None)
}

/// [`render_snapshot`] restricted to an inclusive year range before any
/// view runs.
pub fn render_snapshot_for_years(
    dataset: &EmploymentDataset,
    selection: &Selection,
    years: RangeInclusive<i32>,
) -> DashboardSnapshot {
    snapshot_for(dataset, selection, Some(years))
}

fn snapshot_for(
    dataset: &EmploymentDataset,
    selection: &Selection,
    years: Option<RangeInclusive<i32>>,
) -> DashboardSnapshot {
    let mut subset = filter_by_occupation(dataset, selection);
    if let Some(years) = years {
        subset = subset.filter_years(years);
    }

    DashboardSnapshot {
        occupations: dataset.occupations.clone(),
        trend: trend_series(&subset),
        forecast_metrics: forecast_metrics(&subset),
        age_profile: age_distribution(&subset),
        gender_split: gender_split(&subset),
        employment_type_split: employment_type_split(&subset),
        gender_by_occupation: gender_by_occupation(&subset),
        state_distribution: state_distribution(&subset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AgeBand, Metric, Observation, State, Value};

    fn obs(occupation: &str, metric: Metric, year: i32, value: Value) -> Observation {
        Observation {
            occupation: occupation.to_string(),
            metric,
            year,
            value,
        }
    }

    fn nurse_dataset() -> EmploymentDataset {
        EmploymentDataset::from_observations(vec![
            obs("Nurses", Metric::Employment, 2020, Value::Number(1000.0)),
            obs(
                "Nurses",
                Metric::ProjectedEmployment,
                2025,
                Value::Number(1200.0),
            ),
            obs(
                "Nurses",
                Metric::FutureGrowthRating,
                2021,
                Value::Text("Very Strong".to_string()),
            ),
            obs(
                "Nurses",
                Metric::Age(AgeBand::Age25To34),
                2021,
                Value::Number(24.0),
            ),
            obs("Nurses", Metric::MaleShare, 2021, Value::Number(12.0)),
            obs("Nurses", Metric::FemaleShare, 2021, Value::Number(88.0)),
            obs(
                "Nurses",
                Metric::StateShare(State::Vic),
                2021,
                Value::Number(26.0),
            ),
            obs("Welders", Metric::Employment, 2020, Value::Number(90.0)),
        ])
    }

    #[test]
    fn snapshot_bundles_every_view() {
        let ds = nurse_dataset();
        let snapshot = render_snapshot(&ds, &Selection::new());

        assert_eq!(snapshot.occupations, vec!["Nurses", "Welders"]);
        // Historical Nurses + forecast continuation + historical Welders.
        assert_eq!(snapshot.trend.len(), 3);
        assert_eq!(snapshot.forecast_metrics.len(), 1);
        assert_eq!(snapshot.age_profile.len(), 1);
        assert_eq!(snapshot.gender_split.len(), 2);
        assert!(snapshot.employment_type_split.is_empty());
        assert_eq!(snapshot.gender_by_occupation.len(), 2);
        assert_eq!(snapshot.state_distribution.len(), 1);
        assert_eq!(snapshot.state_distribution[0].state, "Victoria");
    }

    #[test]
    fn occupation_options_ignore_the_selection() {
        let ds = nurse_dataset();
        let only_welders: Selection = ["Welders".to_string()].into_iter().collect();
        let snapshot = render_snapshot(&ds, &only_welders);

        // The dropdown always lists the whole dataset.
        assert_eq!(snapshot.occupations, vec!["Nurses", "Welders"]);
        assert_eq!(snapshot.trend.len(), 1);
        assert_eq!(snapshot.trend[0].occupation, "Welders");
        assert!(snapshot.state_distribution.is_empty());
    }

    #[test]
    fn year_restriction_applies_before_every_view() {
        let ds = nurse_dataset();
        let snapshot = render_snapshot_for_years(&ds, &Selection::new(), 2021..=2026);

        // 2020 employment rows fall away; the 2025 forecast survives, and
        // the forecast series has nothing historical left to restate.
        let forecast: Vec<&TrendSeries> =
            snapshot.trend.iter().filter(|s| s.forecast).collect();
        assert_eq!(forecast.len(), 1);
        assert_eq!(forecast[0].points.len(), 1);
        assert_eq!(forecast[0].points[0].year, 2025);
        assert_eq!(snapshot.gender_split.len(), 2);
    }

    #[test]
    fn snapshot_serializes_with_hex_colors() {
        let ds = nurse_dataset();
        let snapshot = render_snapshot(&ds, &Selection::new());
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["trend"][0]["color"], "#636efa");
        assert_eq!(json["age_profile"][0]["shares"][0]["band"], "Age 25 - 34");
        assert_eq!(json["state_distribution"][0]["metric"], "VIC (%)");
    }
}
