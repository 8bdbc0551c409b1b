/// Data layer: core types, loading, filtering and derived views.
///
/// Architecture:
/// ```text
///  football_health_dashboard_data.csv
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetStore │  parse file once → Arc<Dataset>
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSpec predicates → FilteredView + SummaryStats
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  views    │  sorted / top-N / melted / CSV bytes
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod views;
