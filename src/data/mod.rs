/// Data layer: core types, loading, and facet grouping.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Row>, column index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  facet    │  group rows by category → facet groups
///   └──────────┘
/// ```
pub mod facet;
pub mod loader;
pub mod model;
