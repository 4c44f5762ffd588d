use serde::Serialize;

use crate::data::filter::Subset;
use crate::data::model::{Metric, State};

// ---------------------------------------------------------------------------
// State map (% of employment per state/territory)
// ---------------------------------------------------------------------------

/// Mean employment share of one state, keyed for the boundary polygons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateShare {
    /// Dataset metric label, e.g. `NSW (%)`.
    pub metric: &'static str,
    /// Full name matching the polygon property, e.g. `New South Wales`.
    pub state: &'static str,
    pub value: f64,
}

/// Mean share per state across the subset.
///
/// Values are coerced to numbers with non-numeric cells counting as zero
/// (a zero that stays in the denominator, so an `N/A` drags the mean down
/// rather than vanishing). States with no rows at all are absent. Output
/// order is metric-label ascending, `ACT (%)` first, `WA (%)` last.
pub fn state_distribution(subset: &Subset) -> Vec<StateShare> {
    let mut shares: Vec<StateShare> = State::ALL
        .iter()
        .filter_map(|&state| {
            let mut sum = 0.0;
            let mut count = 0usize;
            for obs in subset.rows() {
                if obs.metric == Metric::StateShare(state) {
                    sum += obs.value.numeric_or_zero();
                    count += 1;
                }
            }
            if count == 0 {
                return None;
            }
            Some(StateShare {
                metric: state.label(),
                state: state.full_name(),
                value: sum / count as f64,
            })
        })
        .collect();
    shares.sort_by(|a, b| a.metric.cmp(b.metric));
    shares
}
