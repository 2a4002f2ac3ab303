use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field – the closed set of columns of a daily record
// ---------------------------------------------------------------------------

/// One column of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Day,
    Height,
    Biomass,
    LeafTemp,
    Humidity,
    GrowthRate,
}

impl Field {
    /// All fields in stored column order. This is also the export header order.
    pub const ALL: [Field; 6] = [
        Field::Day,
        Field::Height,
        Field::Biomass,
        Field::LeafTemp,
        Field::Humidity,
        Field::GrowthRate,
    ];

    /// Wire name used in the bundled JSON and in export headers.
    pub fn key(self) -> &'static str {
        match self {
            Field::Day => "day",
            Field::Height => "height",
            Field::Biomass => "biomass",
            Field::LeafTemp => "leafTemp",
            Field::Humidity => "humidity",
            Field::GrowthRate => "growthRate",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Column heading shown by table views.
    pub fn label(self) -> &'static str {
        match self {
            Field::Day => "Day",
            Field::Height => "Height (cm)",
            Field::Biomass => "Biomass (g)",
            Field::LeafTemp => "Leaf temp (°C)",
            Field::Humidity => "Humidity (%)",
            Field::GrowthRate => "Growth rate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// FieldValue – a single cell
// ---------------------------------------------------------------------------

/// A cell value: the day label is text, every measurement is numeric.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

// -- Manual Eq/Ord so cells compare on their raw stored values --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            // Lexicographic: "D10" sorts before "D2".
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "Infinity" } else { "-Infinity" })
            }
            FieldValue::Number(v) => write_number(f, *v),
        }
    }
}

/// Number-to-text in the form a browser's `String(n)` produces.
fn write_number(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v == 0.0 {
        // Covers -0.0.
        return f.write_str("0");
    }
    let magnitude = v.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        // `{:e}` is shortest round-trip too but writes `1e21`, not `1e+21`.
        let text = format!("{v:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
            _ => f.write_str(&text),
        };
    }
    // f64's Display already drops a zero fraction: 30.0 -> "30".
    write!(f, "{v}")
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one day of measurements
// ---------------------------------------------------------------------------

/// One day's measured values for a plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Day label as stored, e.g. `"D3"`.
    pub day: String,
    /// Plant height in cm.
    pub height: f64,
    /// Biomass in g.
    pub biomass: f64,
    /// Leaf temperature in °C.
    pub leaf_temp: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Growth rate in cm/day.
    pub growth_rate: f64,
}

impl Record {
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::Day => FieldValue::Text(self.day.clone()),
            Field::Height => FieldValue::Number(self.height),
            Field::Biomass => FieldValue::Number(self.biomass),
            Field::LeafTemp => FieldValue::Number(self.leaf_temp),
            Field::Humidity => FieldValue::Number(self.humidity),
            Field::GrowthRate => FieldValue::Number(self.growth_rate),
        }
    }

    /// Numeric value of a measurement column; `None` for the day label.
    pub fn number(&self, field: Field) -> Option<f64> {
        self.get(field).as_f64()
    }

    /// Compare two records on one field without allocating for numeric columns.
    pub fn cmp_by(&self, other: &Record, field: Field) -> Ordering {
        match field {
            Field::Day => self.day.cmp(&other.day),
            _ => self.get(field).cmp(&other.get(field)),
        }
    }
}

// ---------------------------------------------------------------------------
// Plant / PlantDataset – the bundled dataset
// ---------------------------------------------------------------------------

/// Summary card values for a plant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantMetrics {
    pub leaf_temperature: f64,
    pub plant_height: f64,
    pub biomass: f64,
    pub growth_rate: f64,
}

/// A single plant with its summary metrics and daily records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub metrics: PlantMetrics,
    pub daily_data: Vec<Record>,
}

/// The complete loaded dataset. Plant order is the order of the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantDataset {
    pub plants: Vec<Plant>,
}

impl PlantDataset {
    pub fn new(plants: Vec<Plant>) -> Self {
        PlantDataset { plants }
    }

    pub fn find(&self, id: &str) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    /// Look up a plant, falling back to the first plant of the dataset.
    pub fn find_or_default(&self, id: &str) -> Option<&Plant> {
        self.find(id).or_else(|| self.default_plant())
    }

    pub fn default_plant(&self) -> Option<&Plant> {
        self.plants.first()
    }

    pub fn plant_ids(&self) -> impl Iterator<Item = &str> {
        self.plants.iter().map(|p| p.id.as_str())
    }

    /// Number of plants.
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}
