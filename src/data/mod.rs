/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EmploymentDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ EmploymentDataset │  Vec<Observation>, occupation index
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply the occupation selection → Subset
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod filter;
