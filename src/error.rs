use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::assets::resolver::Category;

/// Failure to resolve a visualization asset. Non-fatal: callers show a
/// placeholder instead of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no {category} asset for plant '{plant_id}'")]
    NotFound { plant_id: String, category: Category },
}

/// Invalid asset catalog construction.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("asset catalog has no plants")]
    Empty,
    #[error("default plant '{0}' is not in the catalog")]
    UnknownDefault(String),
    #[error("plant '{0}' appears more than once in the catalog")]
    DuplicatePlant(String),
    #[error("invalid catalog manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A dataset that does not match the record schema.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("plant {plant}: row {row}: {reason}")]
    InvalidRecord {
        plant: String,
        row: usize,
        reason: String,
    },
    #[error("plant entry {index} is malformed: {reason}")]
    InvalidPlant { index: usize, reason: String },
    #[error("plant id '{0}' appears more than once")]
    DuplicatePlant(String),
}

/// Failure while writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export delimiter must be a single ASCII byte, got 0x{0:02x}")]
    InvalidDelimiter(u8),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Invalid command line selection of an asset category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryParseError {
    #[error("unknown asset category '{0}' (expected morphology, lidar or heatmap)")]
    Unknown(String),
    #[error("heatmap category requires a spectral index name")]
    MissingIndex,
}
