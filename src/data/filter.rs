use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use super::model::{EmploymentDataset, Observation};

// ---------------------------------------------------------------------------
// Selection: which occupations the user picked
// ---------------------------------------------------------------------------

/// The set of occupation names chosen in the UI. An empty selection means
/// "all occupations" (the dashboard's default view), not "none".
pub type Selection = BTreeSet<String>;

// ---------------------------------------------------------------------------
// Subset: a row-order view of the dataset after filtering
// ---------------------------------------------------------------------------

/// Indices of rows that pass the occupation filter, in dataset row order.
///
/// Views never see the dataset directly; they consume a `Subset` so that
/// encounter order (and with it palette position) survives every step.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    dataset: &'a EmploymentDataset,
    indices: Vec<usize>,
}

impl<'a> Subset<'a> {
    /// Rows of the subset, in dataset row order.
    pub fn rows(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        self.indices.iter().map(|&i| &self.dataset.observations[i])
    }

    /// Number of rows in the subset.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the subset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Unique occupations in first-encounter order. This order drives color
    /// assignment, so it must come from the subset rather than from any
    /// sorted index.
    pub fn occupations(&self) -> Vec<&'a str> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut out: Vec<&'a str> = Vec::new();
        for obs in self.rows() {
            if seen.insert(obs.occupation.as_str()) {
                out.push(obs.occupation.as_str());
            }
        }
        out
    }

    /// Restrict the subset to rows inside the inclusive year range.
    pub fn filter_years(&self, years: RangeInclusive<i32>) -> Subset<'a> {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| years.contains(&self.dataset.observations[i].year))
            .collect();
        Subset {
            dataset: self.dataset,
            indices,
        }
    }
}

/// Return the rows matching the selection.
///
/// A non-empty selection keeps rows whose occupation is in the set;
/// unmatched names simply contribute nothing. An empty selection returns
/// the entire dataset unchanged.
pub fn filter_by_occupation<'a>(
    dataset: &'a EmploymentDataset,
    selection: &Selection,
) -> Subset<'a> {
    let indices = if selection.is_empty() {
        (0..dataset.observations.len()).collect()
    } else {
        dataset
            .observations
            .iter()
            .enumerate()
            .filter(|(_, obs)| selection.contains(&obs.occupation))
            .map(|(i, _)| i)
            .collect()
    };
    Subset { dataset, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Metric, Value};

    fn obs(occupation: &str, year: i32) -> Observation {
        Observation {
            occupation: occupation.to_string(),
            metric: Metric::Employment,
            year,
            value: Value::Number(1.0),
        }
    }

    fn dataset() -> EmploymentDataset {
        EmploymentDataset::from_observations(vec![
            obs("Nurses", 2011),
            obs("Teachers", 2012),
            obs("Nurses", 2013),
            obs("Plumbers", 2014),
        ])
    }

    fn select(names: &[&str]) -> Selection {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn empty_selection_is_the_identity_view() {
        let ds = dataset();
        let subset = filter_by_occupation(&ds, &Selection::new());
        assert_eq!(subset.len(), ds.len());
        for (got, want) in subset.rows().zip(ds.observations.iter()) {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn non_empty_selection_keeps_only_matching_rows() {
        let ds = dataset();
        let subset = filter_by_occupation(&ds, &select(&["Nurses"]));
        assert_eq!(subset.len(), 2);
        assert!(subset.rows().all(|o| o.occupation == "Nurses"));
    }

    #[test]
    fn unmatched_names_yield_an_empty_subset_not_an_error() {
        let ds = dataset();
        let subset = filter_by_occupation(&ds, &select(&["Astronauts"]));
        assert!(subset.is_empty());
        assert!(subset.occupations().is_empty());
    }

    #[test]
    fn occupations_come_out_in_encounter_order() {
        let ds = dataset();
        let all = filter_by_occupation(&ds, &Selection::new());
        assert_eq!(all.occupations(), vec!["Nurses", "Teachers", "Plumbers"]);

        // Selection membership does not reorder; row order does.
        let picked = filter_by_occupation(&ds, &select(&["Plumbers", "Teachers"]));
        assert_eq!(picked.occupations(), vec!["Teachers", "Plumbers"]);
    }

    #[test]
    fn filter_years_keeps_the_inclusive_range() {
        let ds = dataset();
        let subset = filter_by_occupation(&ds, &Selection::new()).filter_years(2012..=2013);
        let years: Vec<i32> = subset.rows().map(|o| o.year).collect();
        assert_eq!(years, vec![2012, 2013]);
    }
}
