/// Data layer: core types, loading, and the table engine.
///
/// Architecture:
/// ```text
///  .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → PlantDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ PlantDataset  │  Vec<Plant>, each with Vec<Record>
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐     ┌──────────┐
///   │   sort    │ ──▶ │  filter   │ ──▶ │   view    │  visible page + pager
///   └──────────┘     └──────────┘     └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  full sorted table → delimited text
///   └──────────┘
/// ```

pub mod compare;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
pub mod trend;
pub mod view;
