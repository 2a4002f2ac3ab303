use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// File name of a plant's leaf morphology figure.
pub const MORPHOLOGY_FILE: &str = "leaves_morphology.json";
/// File name of a plant's 3D lidar figure.
pub const LIDAR_FILE: &str = "plant_lidar_data.json";
const HEATMAP_PREFIX: &str = "heatmap_";
const HEATMAP_SUFFIX: &str = ".json";

// ---------------------------------------------------------------------------
// Locator – opaque reference to a visualization artifact
// ---------------------------------------------------------------------------

/// An opaque resource reference (URI or relative path) handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Locator {
    fn from(s: String) -> Self {
        Locator(s)
    }
}

impl From<&str> for Locator {
    fn from(s: &str) -> Self {
        Locator(s.to_string())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// PlantCatalogEntry
// ---------------------------------------------------------------------------

/// Every visualization asset known for one plant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantCatalogEntry {
    #[serde(skip)]
    pub plant_id: String,
    #[serde(default)]
    pub morphology: Option<Locator>,
    #[serde(default)]
    pub lidar: Option<Locator>,
    /// Spectral index name → heatmap figure.
    #[serde(default)]
    pub heatmaps: BTreeMap<String, Locator>,
}

impl PlantCatalogEntry {
    pub fn new(plant_id: impl Into<String>) -> Self {
        Self { plant_id: plant_id.into(), ..Default::default() }
    }

    pub fn with_morphology(mut self, locator: impl Into<Locator>) -> Self {
        self.morphology = Some(locator.into());
        self
    }

    pub fn with_lidar(mut self, locator: impl Into<Locator>) -> Self {
        self.lidar = Some(locator.into());
        self
    }

    pub fn with_heatmap(mut self, index: impl Into<String>, locator: impl Into<Locator>) -> Self {
        self.heatmaps.insert(index.into(), locator.into());
        self
    }
}

// ---------------------------------------------------------------------------
// AssetCatalog – built once, read-only afterwards
// ---------------------------------------------------------------------------

/// Static mapping from plant id to its assets, with a named default plant
/// used when a lookup misses.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    entries: Vec<PlantCatalogEntry>,
    by_id: HashMap<String, usize>,
    default_index: usize,
}

#[derive(Debug, Default)]
pub struct AssetCatalogBuilder {
    entries: Vec<PlantCatalogEntry>,
    default_plant: Option<String>,
}

impl AssetCatalogBuilder {
    pub fn entry(mut self, entry: PlantCatalogEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Plant used when a requested id is unknown. Defaults to the first entry.
    pub fn default_plant(mut self, plant_id: impl Into<String>) -> Self {
        self.default_plant = Some(plant_id.into());
        self
    }

    pub fn build(self) -> Result<AssetCatalog, CatalogError> {
        if self.entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_id = HashMap::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            if by_id.insert(entry.plant_id.clone(), i).is_some() {
                return Err(CatalogError::DuplicatePlant(entry.plant_id.clone()));
            }
        }

        let default_index = match &self.default_plant {
            Some(id) => *by_id
                .get(id)
                .ok_or_else(|| CatalogError::UnknownDefault(id.clone()))?,
            None => 0,
        };

        log::debug!(
            "asset catalog: {} plant(s), default '{}'",
            self.entries.len(),
            self.entries[default_index].plant_id
        );

        Ok(AssetCatalog {
            entries: self.entries,
            by_id,
            default_index,
        })
    }
}

/// Manifest layout:
///
/// ```json
/// {
///   "defaultPlant": "plant-1",
///   "plants": {
///     "plant-1": {
///       "morphology": "plant 1/leaves_morphology.json",
///       "lidar": "plant 1/plant_lidar_data.json",
///       "heatmaps": { "NDVI": "plant 1/heatmap_NDVI.json" }
///     }
///   }
/// }
/// ```
///
/// Plants are ordered by id, so without `defaultPlant` the smallest id is
/// the default.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    #[serde(default)]
    default_plant: Option<String>,
    plants: BTreeMap<String, PlantCatalogEntry>,
}

impl AssetCatalog {
    pub fn builder() -> AssetCatalogBuilder {
        AssetCatalogBuilder::default()
    }

    pub fn from_manifest_json(text: &str) -> Result<Self, CatalogError> {
        let manifest: Manifest = serde_json::from_str(text)?;
        let mut builder = AssetCatalog::builder();
        for (plant_id, mut entry) in manifest.plants {
            entry.plant_id = plant_id;
            builder = builder.entry(entry);
        }
        if let Some(id) = manifest.default_plant {
            builder = builder.default_plant(id);
        }
        builder.build()
    }

    pub fn load_manifest(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_manifest_json(&text)
    }

    /// Build a catalog from an asset tree laid out as
    /// `root/plant N/{leaves_morphology.json, plant_lidar_data.json, heatmap_<INDEX>.json}`.
    ///
    /// Directory `plant N` becomes plant id `plant-N`; locators are paths
    /// relative to `root` with `/` separators. Plants are ordered by
    /// directory name.
    pub fn scan_dir(root: &Path, default_plant: Option<&str>) -> Result<Self, CatalogError> {
        let mut dirs: Vec<(String, std::path::PathBuf)> = std::fs::read_dir(root)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().to_str().map(|n| (n.to_string(), e.path())))
            .collect();
        dirs.sort();

        let mut builder = AssetCatalog::builder();
        for (dir_name, dir_path) in dirs {
            let mut entry = PlantCatalogEntry::new(plant_id_for_dir(&dir_name));

            let mut files: Vec<String> = std::fs::read_dir(&dir_path)?
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .filter_map(|e| e.file_name().to_str().map(str::to_string))
                .collect();
            files.sort();

            for file in files {
                let locator = Locator(format!("{dir_name}/{file}"));
                if file == MORPHOLOGY_FILE {
                    entry.morphology = Some(locator);
                } else if file == LIDAR_FILE {
                    entry.lidar = Some(locator);
                } else if let Some(index) = heatmap_index(&file) {
                    entry.heatmaps.insert(index.to_string(), locator);
                }
            }

            log::debug!(
                "scanned {}: {} heatmap(s)",
                entry.plant_id,
                entry.heatmaps.len()
            );
            builder = builder.entry(entry);
        }

        if let Some(id) = default_plant {
            builder = builder.default_plant(id);
        }
        builder.build()
    }

    pub fn get(&self, plant_id: &str) -> Option<&PlantCatalogEntry> {
        self.by_id.get(plant_id).map(|&i| &self.entries[i])
    }

    pub fn default_entry(&self) -> &PlantCatalogEntry {
        &self.entries[self.default_index]
    }

    pub fn default_plant_id(&self) -> &str {
        &self.default_entry().plant_id
    }

    pub fn entries(&self) -> &[PlantCatalogEntry] {
        &self.entries
    }

    pub fn plant_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.plant_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: an empty catalog cannot be built.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `plant 1` → `plant-1`.
fn plant_id_for_dir(dir_name: &str) -> String {
    dir_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// `heatmap_NDVI.json` → `NDVI`. The index must be a non-empty word.
fn heatmap_index(file_name: &str) -> Option<&str> {
    let index = file_name
        .strip_prefix(HEATMAP_PREFIX)?
        .strip_suffix(HEATMAP_SUFFIX)?;
    let is_word = !index.is_empty() && index.chars().all(|c| c.is_alphanumeric() || c == '_');
    is_word.then_some(index)
}
