use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Metric – the closed vocabulary of the outlook table
// ---------------------------------------------------------------------------

/// Raised when a dataset row carries a metric label outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric label '{0}'")]
pub struct UnknownMetricError(pub String);

/// One of the fixed metric labels of the employment outlook dataset.
///
/// The vocabulary is closed on purpose: a typo in the source file fails the
/// load instead of silently vanishing from every chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Historical employment level for one year.
    Employment,
    /// Forecast employment level for one year.
    ProjectedEmployment,
    /// Categorical rating text (`Very Strong` … `Decline`).
    FutureGrowthRating,
    /// Forecast growth over the projection window, in percent.
    ProjectedGrowthPct,
    /// Share of workers in one age band, in percent.
    Age(AgeBand),
    /// Share of employment located in one state or territory, in percent.
    StateShare(State),
    MaleShare,
    FemaleShare,
    FullTimeShare,
    PartTimeShare,
}

impl Metric {
    /// Parse a dataset label. Age and state labels tolerate spacing
    /// differences (`Age 15 - 19` and `Age 15-19` are the same band).
    pub fn parse(label: &str) -> Result<Metric, UnknownMetricError> {
        match label {
            "Employment" => return Ok(Metric::Employment),
            "Projected Employment level" => return Ok(Metric::ProjectedEmployment),
            "Future Growth Rating" => return Ok(Metric::FutureGrowthRating),
            "Projected Employment Growth (%)" => return Ok(Metric::ProjectedGrowthPct),
            "Male Share" => return Ok(Metric::MaleShare),
            "Female Share" => return Ok(Metric::FemaleShare),
            "Full-time Share" => return Ok(Metric::FullTimeShare),
            "Part-time Share" => return Ok(Metric::PartTimeShare),
            _ => {}
        }
        if let Some(band) = AgeBand::from_label(label) {
            return Ok(Metric::Age(band));
        }
        if let Some(state) = State::from_label(label) {
            return Ok(Metric::StateShare(state));
        }
        Err(UnknownMetricError(label.to_string()))
    }

    /// The canonical dataset label (the spelling the original CSV uses).
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Employment => "Employment",
            Metric::ProjectedEmployment => "Projected Employment level",
            Metric::FutureGrowthRating => "Future Growth Rating",
            Metric::ProjectedGrowthPct => "Projected Employment Growth (%)",
            Metric::Age(band) => band.label(),
            Metric::StateShare(state) => state.label(),
            Metric::MaleShare => "Male Share",
            Metric::FemaleShare => "Female Share",
            Metric::FullTimeShare => "Full-time Share",
            Metric::PartTimeShare => "Part-time Share",
        }
    }
}

impl FromStr for Metric {
    type Err = UnknownMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::parse(s)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// AgeBand – the eight age buckets, in display order
// ---------------------------------------------------------------------------

/// Age buckets of the age profile chart. The variant order is the fixed
/// display order, so the derived `Ord` is the chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBand {
    Age15To19,
    Age20To24,
    Age25To34,
    Age35To44,
    Age45To54,
    Age55To59,
    Age60To64,
    Age65Plus,
}

impl AgeBand {
    /// All bands in display order.
    pub const ALL: [AgeBand; 8] = [
        AgeBand::Age15To19,
        AgeBand::Age20To24,
        AgeBand::Age25To34,
        AgeBand::Age35To44,
        AgeBand::Age45To54,
        AgeBand::Age55To59,
        AgeBand::Age60To64,
        AgeBand::Age65Plus,
    ];

    /// The dataset label, spaced the way the original chart categories are.
    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Age15To19 => "Age 15 - 19",
            AgeBand::Age20To24 => "Age 20 - 24",
            AgeBand::Age25To34 => "Age 25 - 34",
            AgeBand::Age35To44 => "Age 35 - 44",
            AgeBand::Age45To54 => "Age 45 - 54",
            AgeBand::Age55To59 => "Age 55 - 59",
            AgeBand::Age60To64 => "Age 60 - 64",
            AgeBand::Age65Plus => "Age 65 +",
        }
    }

    /// Parse any `Age …` label, ignoring spacing inside the range.
    pub fn from_label(label: &str) -> Option<AgeBand> {
        let range = label.strip_prefix("Age")?;
        let key: String = range.chars().filter(|c| !c.is_whitespace()).collect();
        match key.as_str() {
            "15-19" => Some(AgeBand::Age15To19),
            "20-24" => Some(AgeBand::Age20To24),
            "25-34" => Some(AgeBand::Age25To34),
            "35-44" => Some(AgeBand::Age35To44),
            "45-54" => Some(AgeBand::Age45To54),
            "55-59" => Some(AgeBand::Age55To59),
            "60-64" => Some(AgeBand::Age60To64),
            "65+" => Some(AgeBand::Age65Plus),
            _ => None,
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Renderable records carry bands as their chart category label.
impl Serialize for AgeBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// State – the eight states/territories behind the map metrics
// ---------------------------------------------------------------------------

/// States and territories, keyed by their percentage metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Nsw,
    Vic,
    Qld,
    Sa,
    Wa,
    Tas,
    Nt,
    Act,
}

impl State {
    pub const ALL: [State; 8] = [
        State::Nsw,
        State::Vic,
        State::Qld,
        State::Sa,
        State::Wa,
        State::Tas,
        State::Nt,
        State::Act,
    ];

    /// The dataset metric label, e.g. `NSW (%)`.
    pub fn label(&self) -> &'static str {
        match self {
            State::Nsw => "NSW (%)",
            State::Vic => "VIC (%)",
            State::Qld => "QLD (%)",
            State::Sa => "SA (%)",
            State::Wa => "WA (%)",
            State::Tas => "TAS (%)",
            State::Nt => "NT (%)",
            State::Act => "ACT (%)",
        }
    }

    /// Full name matching the `STATE_NAME` property of the boundary polygons.
    pub fn full_name(&self) -> &'static str {
        match self {
            State::Nsw => "New South Wales",
            State::Vic => "Victoria",
            State::Qld => "Queensland",
            State::Sa => "South Australia",
            State::Wa => "Western Australia",
            State::Tas => "Tasmania",
            State::Nt => "Northern Territory",
            State::Act => "Australian Capital Territory",
        }
    }

    /// Parse a state metric label, ignoring the space before `(%)`.
    pub fn from_label(label: &str) -> Option<State> {
        let key: String = label.chars().filter(|c| !c.is_whitespace()).collect();
        match key.as_str() {
            "NSW(%)" => Some(State::Nsw),
            "VIC(%)" => Some(State::Vic),
            "QLD(%)" => Some(State::Qld),
            "SA(%)" => Some(State::Sa),
            "WA(%)" => Some(State::Wa),
            "TAS(%)" => Some(State::Tas),
            "NT(%)" => Some(State::Nt),
            "ACT(%)" => Some(State::Act),
            _ => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

// ---------------------------------------------------------------------------
// GrowthRating – the five recognised rating strings
// ---------------------------------------------------------------------------

/// Recognised values of the `Future Growth Rating` metric. Anything else in
/// the data is displayed as-is with the default color, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthRating {
    VeryStrong,
    Strong,
    Moderate,
    Stable,
    Decline,
}

impl GrowthRating {
    pub fn from_label(label: &str) -> Option<GrowthRating> {
        match label {
            "Very Strong" => Some(GrowthRating::VeryStrong),
            "Strong" => Some(GrowthRating::Strong),
            "Moderate" => Some(GrowthRating::Moderate),
            "Stable" => Some(GrowthRating::Stable),
            "Decline" => Some(GrowthRating::Decline),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GrowthRating::VeryStrong => "Very Strong",
            GrowthRating::Strong => "Strong",
            GrowthRating::Moderate => "Moderate",
            GrowthRating::Stable => "Stable",
            GrowthRating::Decline => "Decline",
        }
    }
}

// ---------------------------------------------------------------------------
// Value – one cell of the Value column
// ---------------------------------------------------------------------------

/// A cell value: numeric for level/share metrics, text for ratings and for
/// anything that failed to parse as a number (`N/A`, empty cells).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Parse a raw cell. Finite numbers become `Number`, everything else
    /// stays `Text` exactly as written.
    pub fn parse(raw: &str) -> Value {
        if let Ok(v) = raw.trim().parse::<f64>() {
            if v.is_finite() {
                return Value::Number(v);
            }
        }
        Value::Text(raw.to_string())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    /// Numeric coercion for the state map: non-numeric cells count as zero.
    pub fn numeric_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the outlook table
// ---------------------------------------------------------------------------

/// A single `(Occupation, Metric, Year, Value)` row.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub occupation: String,
    pub metric: Metric,
    pub year: i32,
    pub value: Value,
}

// ---------------------------------------------------------------------------
// EmploymentDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable after load: every view is a pure
/// function of the dataset and a selection.
#[derive(Debug, Clone, Default)]
pub struct EmploymentDataset {
    /// All rows, in file order.
    pub observations: Vec<Observation>,
    /// Unique occupation names in first-encounter order (the dropdown
    /// options of the UI boundary).
    pub occupations: Vec<String>,
}

impl EmploymentDataset {
    /// Build the occupation index from the loaded rows.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut occupations: Vec<String> = Vec::new();
        for obs in &observations {
            if seen.insert(obs.occupation.as_str()) {
                occupations.push(obs.occupation.clone());
            }
        }
        EmploymentDataset {
            observations,
            occupations,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_labels_round_trip() {
        let labels = [
            "Employment",
            "Projected Employment level",
            "Future Growth Rating",
            "Projected Employment Growth (%)",
            "Age 15 - 19",
            "Age 20 - 24",
            "Age 25 - 34",
            "Age 35 - 44",
            "Age 45 - 54",
            "Age 55 - 59",
            "Age 60 - 64",
            "Age 65 +",
            "NSW (%)",
            "VIC (%)",
            "QLD (%)",
            "SA (%)",
            "WA (%)",
            "TAS (%)",
            "NT (%)",
            "ACT (%)",
            "Male Share",
            "Female Share",
            "Full-time Share",
            "Part-time Share",
        ];
        for label in labels {
            let metric = Metric::parse(label).expect(label);
            assert_eq!(metric.label(), label);
        }
    }

    #[test]
    fn compact_age_and_state_spellings_parse() {
        assert_eq!(
            Metric::parse("Age 15-19").unwrap(),
            Metric::Age(AgeBand::Age15To19)
        );
        assert_eq!(
            Metric::parse("Age 65+").unwrap(),
            Metric::Age(AgeBand::Age65Plus)
        );
        assert_eq!(
            Metric::parse("NSW(%)").unwrap(),
            Metric::StateShare(State::Nsw)
        );
        // Canonical labels are emitted with the original spacing.
        assert_eq!(Metric::parse("Age 65+").unwrap().label(), "Age 65 +");
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let err = Metric::parse("Median Salary").unwrap_err();
        assert_eq!(err, UnknownMetricError("Median Salary".to_string()));
        assert!(Metric::parse("Age 70 - 74").is_err());
        assert!("".parse::<Metric>().is_err());
    }

    #[test]
    fn age_band_variant_order_is_display_order() {
        let mut shuffled = vec![
            AgeBand::Age65Plus,
            AgeBand::Age15To19,
            AgeBand::Age45To54,
            AgeBand::Age25To34,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                AgeBand::Age15To19,
                AgeBand::Age25To34,
                AgeBand::Age45To54,
                AgeBand::Age65Plus,
            ]
        );
        for pair in AgeBand::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn value_parse_keeps_text_and_numbers_apart() {
        assert_eq!(Value::parse("12.5"), Value::Number(12.5));
        assert_eq!(Value::parse(" 1000 "), Value::Number(1000.0));
        assert_eq!(Value::parse("N/A"), Value::Text("N/A".to_string()));
        assert_eq!(Value::parse(""), Value::Text(String::new()));
        // Non-finite floats carry no usable number.
        assert_eq!(Value::parse("NaN"), Value::Text("NaN".to_string()));

        assert_eq!(Value::parse("N/A").numeric_or_zero(), 0.0);
        assert_eq!(Value::parse("12.5").numeric_or_zero(), 12.5);
        assert_eq!(Value::parse("Very Strong").as_number(), None);
    }

    #[test]
    fn dataset_indexes_occupations_in_encounter_order() {
        let obs = |occupation: &str| Observation {
            occupation: occupation.to_string(),
            metric: Metric::Employment,
            year: 2020,
            value: Value::Number(1.0),
        };
        let ds = EmploymentDataset::from_observations(vec![
            obs("Welders"),
            obs("Anaesthetists"),
            obs("Welders"),
            obs("Bakers"),
        ]);
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.occupations, vec!["Welders", "Anaesthetists", "Bakers"]);
    }
}
