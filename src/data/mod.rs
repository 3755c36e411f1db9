/// Data layer: record types, loading, categorization, filtering and the
/// session store.
///
/// Architecture:
/// ```text
///  Kepler API (JSON)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate rows → PlanetRecord
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ categorize  │  derived columns → Catalog (shared, read-only)
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  star sizes + radius interval → subset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ session   │  subset ↔ CSV text, read by the chart renderer
///   └──────────┘
/// ```

pub mod categorize;
pub mod filter;
pub mod loader;
pub mod model;
pub mod session;
