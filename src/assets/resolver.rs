use std::fmt;

use super::catalog::{AssetCatalog, Locator, PlantCatalogEntry};
use crate::error::{CategoryParseError, ResolveError};

/// Kind of visualization asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Morphology,
    Lidar,
    /// Heatmap of one spectral index, e.g. `NDVI`.
    Heatmap(String),
}

impl Category {
    /// Parse a category name as given on the command line.
    pub fn parse(kind: &str, index: Option<&str>) -> Result<Self, CategoryParseError> {
        match kind.to_ascii_lowercase().as_str() {
            "morphology" => Ok(Category::Morphology),
            "lidar" => Ok(Category::Lidar),
            "heatmap" => index
                .map(|i| Category::Heatmap(i.to_string()))
                .ok_or(CategoryParseError::MissingIndex),
            _ => Err(CategoryParseError::Unknown(kind.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Morphology => f.write_str("morphology"),
            Category::Lidar => f.write_str("lidar"),
            Category::Heatmap(index) => write!(f, "heatmap {index}"),
        }
    }
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub locator: &'a Locator,
    /// Plant whose asset was returned.
    pub plant_id: &'a str,
    /// True when the default plant stood in for the requested one.
    pub fell_back: bool,
}

impl AssetCatalog {
    /// Resolve a plant's asset for `category`.
    ///
    /// * morphology / lidar: the requested plant's locator, else the default
    ///   plant's, else `NotFound`.
    /// * heatmap: the requested plant's index map (the default plant's when
    ///   the plant is unknown); a missing index is `NotFound` with no further
    ///   fallback since plants carry different index subsets.
    pub fn resolve(&self, plant_id: &str, category: &Category) -> Result<Resolution<'_>, ResolveError> {
        let requested = self.get(plant_id);
        let default = self.default_entry();

        let found = match category {
            Category::Morphology => structural(requested, default, |e| e.morphology.as_ref()),
            Category::Lidar => structural(requested, default, |e| e.lidar.as_ref()),
            Category::Heatmap(index) => {
                let entry = requested.unwrap_or(default);
                entry.heatmaps.get(index).map(|loc| (entry, loc))
            }
        };

        match found {
            Some((entry, locator)) => {
                let fell_back = entry.plant_id != plant_id;
                if fell_back {
                    log::debug!(
                        "{category} for '{plant_id}' resolved via default plant '{}'",
                        entry.plant_id
                    );
                }
                Ok(Resolution {
                    locator,
                    plant_id: &entry.plant_id,
                    fell_back,
                })
            }
            None => Err(ResolveError::NotFound {
                plant_id: plant_id.to_string(),
                category: category.clone(),
            }),
        }
    }
}

fn structural<'a>(
    requested: Option<&'a PlantCatalogEntry>,
    default: &'a PlantCatalogEntry,
    pick: impl Fn(&'a PlantCatalogEntry) -> Option<&'a Locator>,
) -> Option<(&'a PlantCatalogEntry, &'a Locator)> {
    requested
        .and_then(|e| pick(e).map(|loc| (e, loc)))
        .or_else(|| pick(default).map(|loc| (default, loc)))
}

/// Free-function form of [`AssetCatalog::resolve`].
pub fn resolve<'a>(
    catalog: &'a AssetCatalog,
    plant_id: &str,
    category: &Category,
) -> Result<Resolution<'a>, ResolveError> {
    catalog.resolve(plant_id, category)
}
