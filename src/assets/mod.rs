/// Asset layer: per-plant visualization artifacts.
///
/// ```text
///  manifest.json / asset tree
///        │
///        ▼
///   ┌──────────┐
///   │ catalog   │  plant id → {morphology, lidar, heatmap by index}
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ resolver  │  (plant, category) → locator | NotFound
///   └──────────┘
/// ```
///
/// `indices` holds the static spectral index groups used to browse the
/// heatmaps a plant has.

pub mod catalog;
pub mod indices;
pub mod resolver;
