/// Visualization views: each module turns a filtered [`Subset`] into the
/// serializable records one chart renders.
///
/// ```text
///   Subset ──▶ trend     employment lines + forecast continuation, table
///          ──▶ age       stacked age profile bars
///          ──▶ shares    gender / employment-type donuts, paired bars
///          ──▶ state     per-state mean shares for the map
///          ──▶ snapshot  all of the above, for one selection
/// ```
///
/// [`Subset`]: crate::data::filter::Subset
pub mod age;
pub mod shares;
pub mod snapshot;
pub mod state;
pub mod trend;
