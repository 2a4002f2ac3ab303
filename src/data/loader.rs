use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::{Plant, PlantDataset, PlantMetrics, Record};
use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a plant dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "id", "name", "metrics", "dailyData": [...] }, ...]`
///   or the same array under a top-level `"plants"` key
/// * `.csv`  – one plant's daily records, header row with the record
///   field names; the plant id is the file stem
pub fn load_file(path: &Path) -> Result<PlantDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::info!(
        "loaded {} plant(s), {} daily record(s) from {}",
        dataset.len(),
        dataset.plants.iter().map(|p| p.daily_data.len()).sum::<usize>(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<PlantDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_dataset_json(&text).with_context(|| format!("loading {}", path.display()))
}

/// Parse and validate a dataset document.
///
/// Every daily record must carry all six fields with the right types; a
/// bad row is reported with its plant and row number instead of being
/// skipped.
pub fn parse_dataset_json(text: &str) -> Result<PlantDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let entries = match &root {
        JsonValue::Array(items) => items,
        JsonValue::Object(obj) => obj
            .get("plants")
            .and_then(|v| v.as_array())
            .context("Expected a top-level array or a \"plants\" array")?,
        _ => bail!("Expected a top-level array or a \"plants\" array"),
    };

    let mut seen = HashSet::new();
    let mut plants = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let plant = parse_plant(index, entry)?;
        if !seen.insert(plant.id.clone()) {
            return Err(DatasetError::DuplicatePlant(plant.id).into());
        }
        log::debug!("plant {}: {} daily records", plant.id, plant.daily_data.len());
        plants.push(plant);
    }

    Ok(PlantDataset::new(plants))
}

fn parse_plant(index: usize, entry: &JsonValue) -> Result<Plant, DatasetError> {
    let invalid = |reason: &str| DatasetError::InvalidPlant { index, reason: reason.to_string() };

    let obj = entry.as_object().ok_or_else(|| invalid("not a JSON object"))?;

    let id = obj
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid("missing string 'id'"))?
        .to_string();

    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| id.clone());

    let metrics = match obj.get("metrics") {
        Some(v) => serde_json::from_value::<PlantMetrics>(v.clone())
            .map_err(|e| invalid(&format!("metrics: {e}")))?,
        None => PlantMetrics::default(),
    };

    let rows = obj
        .get("dailyData")
        .and_then(|v| v.as_array())
        .ok_or_else(|| invalid("missing 'dailyData' array"))?;

    let daily_data = rows
        .iter()
        .enumerate()
        .map(|(row, value)| {
            serde_json::from_value::<Record>(value.clone()).map_err(|e| {
                DatasetError::InvalidRecord {
                    plant: id.clone(),
                    row,
                    reason: e.to_string(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Plant { id, name, metrics, daily_data })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row `day,height,biomass,leafTemp,humidity,growthRate`
/// (any column order), one daily record per row.
fn load_csv(path: &Path) -> Result<PlantDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    let daily_data = parse_records_csv(file)?;

    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("plant")
        .to_string();

    Ok(PlantDataset::new(vec![Plant {
        name: id.clone(),
        id,
        metrics: PlantMetrics::default(),
        daily_data,
    }]))
}

/// Read daily records from CSV text.
///
/// Errors name the 1-based file line, counting the header as line 1.
pub fn parse_records_csv<R: Read>(input: R) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_reader(input);
    reader
        .deserialize::<Record>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV line {}", row_no + 2)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PLANTS: &str = r#"[
        {
            "id": "plant-1",
            "name": "Plant 1",
            "metrics": { "leafTemperature": 32.5, "plantHeight": 52, "biomass": 135, "growthRate": 2.5 },
            "dailyData": [
                { "day": "D1", "height": 30, "biomass": 80, "leafTemp": 31.2, "humidity": 60, "growthRate": 2.2 }
            ]
        },
        {
            "id": "plant-2",
            "dailyData": []
        }
    ]"#;

    #[test]
    fn parses_array_document() {
        let ds = parse_dataset_json(TWO_PLANTS).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.plants[0].metrics.plant_height, 52.0);
        assert_eq!(ds.plants[0].daily_data[0].leaf_temp, 31.2);
        // name falls back to the id
        assert_eq!(ds.plants[1].name, "plant-2");
    }

    #[test]
    fn parses_wrapped_document() {
        let wrapped = format!("{{ \"plants\": {TWO_PLANTS} }}");
        let ds = parse_dataset_json(&wrapped).unwrap();
        assert_eq!(ds.plant_ids().collect::<Vec<_>>(), vec!["plant-1", "plant-2"]);
    }

    #[test]
    fn rejects_record_missing_a_field() {
        let doc = r#"[{ "id": "p", "dailyData": [
            { "day": "D1", "height": 30, "biomass": 80, "leafTemp": 31.2, "humidity": 60 }
        ]}]"#;
        let err = parse_dataset_json(doc).unwrap_err();
        match err.downcast_ref::<DatasetError>() {
            Some(DatasetError::InvalidRecord { plant, row, .. }) => {
                assert_eq!(plant, "p");
                assert_eq!(*row, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_wrongly_typed_value() {
        let doc = r#"[{ "id": "p", "dailyData": [
            { "day": 1, "height": 30, "biomass": 80, "leafTemp": 31.2, "humidity": 60, "growthRate": 2 }
        ]}]"#;
        assert!(parse_dataset_json(doc).is_err());
    }

    #[test]
    fn rejects_duplicate_plant_ids() {
        let doc = r#"[{ "id": "p", "dailyData": [] }, { "id": "p", "dailyData": [] }]"#;
        let err = parse_dataset_json(doc).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::DuplicatePlant(id)) if id == "p"
        ));
    }

    #[test]
    fn reads_csv_records_in_any_column_order() {
        let text = "growthRate,day,height,biomass,leafTemp,humidity\n2.2,D1,30,80,31.2,60\n";
        let records = parse_records_csv(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].day, "D1");
        assert_eq!(records[0].growth_rate, 2.2);
    }

    #[test]
    fn csv_errors_report_the_file_line() {
        let text = "day,height,biomass,leafTemp,humidity,growthRate\n\
                    D1,30,80,31.2,60,2.2\n\
                    D2,tall,80,31.2,60,2.2\n";
        let err = parse_records_csv(text.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "CSV line 3");
    }

    #[test]
    fn rejects_unknown_extension() {
        assert!(load_file(Path::new("plants.parquet")).is_err());
    }
}
