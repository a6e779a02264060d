/// Data layer: core types, loading, and cleaning.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table   │  columns, index levels, rows of Values
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean   │  set index → drop duplicates → drop nulls
///   └──────────┘
/// ```

pub mod clean;
pub mod loader;
pub mod model;
