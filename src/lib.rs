//! Plant phenotyping data engine.
//!
//! Two leaf components carry the logic behind a phenotyping dashboard:
//!
//! * [`data`] – the daily-record table engine: stable sort, case-insensitive
//!   search, pagination and delimited export, plus multi-plant comparison.
//! * [`assets`] – the per-plant asset catalog that maps a plant and an
//!   artifact category (morphology, lidar, spectral heatmap) to a locator.
//!
//! Both are pure functions over explicit inputs; [`state`] holds the
//! sort/search/page/selection state a front end threads through them.

pub mod assets;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;

pub use assets::catalog::{AssetCatalog, Locator, PlantCatalogEntry};
pub use assets::resolver::{resolve, Category, Resolution};
pub use data::export::{export_delimited, export_with, ExportOptions, Quoting};
pub use data::model::{Field, FieldValue, Plant, PlantDataset, PlantMetrics, Record};
pub use data::sort::{SortDirection, SortSpec};
pub use data::view::{compute_view, PageState, ViewResult, PAGE_SIZE};
pub use error::{CatalogError, DatasetError, ExportError, ResolveError};
