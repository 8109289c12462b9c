/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json feed
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → normalize rows → Catalog
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Catalog   │  Vec<Event> + facet value index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply criteria → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  place counts + histogram bins
///   └───────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
