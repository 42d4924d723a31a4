/// Data layer: core types, loading, and the query engine.
///
/// Architecture:
/// ```text
///  movies.csv   ratings.csv
///        │        │
///        ▼        ▼
///   ┌─────────────────┐
///   │     loader       │  read → clean → outer join → vote filter → decade
///   └─────────────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │   MovieTable     │  immutable Vec<Movie>, built once at startup
///   └─────────────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │     query        │  (rank, cohort, decade) → title + columns + top 10
///   └─────────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod query;
