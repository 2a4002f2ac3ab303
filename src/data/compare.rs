use std::collections::HashSet;

use super::model::{FieldValue, PlantDataset};
use super::trend::TrendParam;
use crate::assets::catalog::AssetCatalog;
use crate::assets::resolver::{Category, Resolution};
use crate::color::series_colors;
use crate::error::{ExportError, ResolveError};

/// Shown instead of a comparison while fewer than two plants are selected.
pub const SELECTION_WARNING: &str = "Please select at least 2 plants to compare.";

/// One day of a multi-plant comparison; `values[i]` belongs to the i-th
/// selected plant.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub day: String,
    pub values: Vec<Option<f64>>,
}

/// A trend parameter laid out side by side for several plants.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub param: TrendParam,
    pub plant_ids: Vec<String>,
    /// Column titles: the plant name, or the raw id for unknown plants.
    pub column_names: Vec<String>,
    /// `#rrggbb` line colour per selected plant.
    pub colors: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// `(column name, colour)` pairs for a chart legend.
    pub fn legend(&self) -> impl Iterator<Item = (&str, &str)> {
        self.column_names
            .iter()
            .zip(&self.colors)
            .map(|(name, color)| (name.as_str(), color.as_str()))
    }
}

/// The default selection of the comparison view: the first two plants.
pub fn default_selection(dataset: &PlantDataset) -> Vec<String> {
    dataset.plant_ids().take(2).map(str::to_string).collect()
}

/// Add `id` to the selection, or remove it if already selected.
pub fn toggle_plant(selection: &[String], id: &str) -> Vec<String> {
    if selection.iter().any(|s| s == id) {
        selection.iter().filter(|s| *s != id).cloned().collect()
    } else {
        let mut next = selection.to_vec();
        next.push(id.to_string());
        next
    }
}

pub fn selection_warning(selected: &[String]) -> Option<&'static str> {
    (selected.len() < 2).then_some(SELECTION_WARNING)
}

/// Merge the daily values of `param` for the selected plants.
///
/// The day axis is the union of every plant's days in first-seen order, so
/// plants missing a day get an empty cell rather than shifting columns.
pub fn compare_plants(dataset: &PlantDataset, selected: &[String], param: TrendParam) -> Comparison {
    let mut seen = HashSet::new();
    let days: Vec<&str> = dataset
        .plants
        .iter()
        .flat_map(|p| p.daily_data.iter().map(|r| r.day.as_str()))
        .filter(|day| seen.insert(*day))
        .collect();

    let plants: Vec<_> = selected.iter().map(|id| dataset.find(id)).collect();

    let rows = days
        .iter()
        .map(|&day| ComparisonRow {
            day: day.to_string(),
            values: plants
                .iter()
                .map(|plant| {
                    plant
                        .and_then(|p| p.daily_data.iter().find(|r| r.day == day))
                        .and_then(|r| r.number(param.field()))
                })
                .collect(),
        })
        .collect();

    let column_names = selected
        .iter()
        .zip(&plants)
        .map(|(id, plant)| plant.map_or_else(|| id.clone(), |p| p.name.clone()))
        .collect();

    Comparison {
        param,
        plant_ids: selected.to_vec(),
        column_names,
        colors: series_colors(selected),
        rows,
    }
}

/// Resolve one asset category for every selected plant, in selection order.
///
/// Lookups go through [`AssetCatalog::resolve`], so each plant gets the same
/// locator (or the same `NotFound`) its dashboard shows.
pub fn compare_assets<'a>(
    catalog: &'a AssetCatalog,
    selected: &[String],
    category: &Category,
) -> Vec<(String, Result<Resolution<'a>, ResolveError>)> {
    selected
        .iter()
        .map(|id| (id.clone(), catalog.resolve(id, category)))
        .collect()
}

/// `comparative_<label>.csv`, label lowercased with its first space as `_`.
pub fn comparison_file_name(param: TrendParam) -> String {
    let label = param.label().to_lowercase().replacen(' ', "_", 1);
    format!("comparative_{label}.csv")
}

/// Header `Day,<plant>...` followed by one row per day; missing values are
/// written as empty cells.
pub fn comparison_csv(comparison: &Comparison) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let header = std::iter::once("Day").chain(comparison.column_names.iter().map(String::as_str));
    writer.write_record(header)?;

    for row in &comparison.rows {
        let values = row
            .values
            .iter()
            .map(|v| v.map(|n| FieldValue::Number(n).to_string()).unwrap_or_default());
        let cells = std::iter::once(row.day.clone()).chain(values);
        writer.write_record(cells)?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
