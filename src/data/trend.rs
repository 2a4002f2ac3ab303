use super::model::{Field, Plant};

/// Measurements that can be plotted as a growth trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrendParam {
    #[default]
    Height,
    Biomass,
    LeafTemp,
    GrowthRate,
}

impl TrendParam {
    pub const ALL: [TrendParam; 4] = [
        TrendParam::Height,
        TrendParam::Biomass,
        TrendParam::LeafTemp,
        TrendParam::GrowthRate,
    ];

    pub fn field(self) -> Field {
        match self {
            TrendParam::Height => Field::Height,
            TrendParam::Biomass => Field::Biomass,
            TrendParam::LeafTemp => Field::LeafTemp,
            TrendParam::GrowthRate => Field::GrowthRate,
        }
    }

    pub fn key(self) -> &'static str {
        self.field().key()
    }

    pub fn from_key(key: &str) -> Option<TrendParam> {
        TrendParam::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            TrendParam::Height => "Height",
            TrendParam::Biomass => "Biomass",
            TrendParam::LeafTemp => "Leaf temperature",
            TrendParam::GrowthRate => "Growth rate",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            TrendParam::Height => "cm",
            TrendParam::Biomass => "g",
            TrendParam::LeafTemp => "°C",
            TrendParam::GrowthRate => "cm/day",
        }
    }

    /// Line colour for single-plant trend charts.
    pub fn color_hex(self) -> &'static str {
        match self {
            TrendParam::Height => "#16a34a",
            TrendParam::Biomass => "#6366f1",
            TrendParam::LeafTemp => "#ea580c",
            TrendParam::GrowthRate => "#0d9488",
        }
    }
}

/// One point of a plant's trend line.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint<'a> {
    pub day: &'a str,
    pub value: f64,
}

/// Daily values of `param` for a plant, in stored day order.
pub fn trend_series(plant: &Plant, param: TrendParam) -> Vec<TrendPoint<'_>> {
    plant
        .daily_data
        .iter()
        .filter_map(|rec| {
            rec.number(param.field())
                .map(|value| TrendPoint { day: rec.day.as_str(), value })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{PlantMetrics, Record};

    #[test]
    fn keys_match_record_columns() {
        assert_eq!(TrendParam::from_key("leafTemp"), Some(TrendParam::LeafTemp));
        assert_eq!(TrendParam::from_key("humidity"), None);
        assert_eq!(TrendParam::default(), TrendParam::Height);
    }

    #[test]
    fn series_follows_stored_day_order() {
        let rec = |day: &str, biomass: f64| Record {
            day: day.to_string(),
            height: 1.0,
            biomass,
            leaf_temp: 1.0,
            humidity: 1.0,
            growth_rate: 1.0,
        };
        let plant = Plant {
            id: "plant-1".into(),
            name: "Plant 1".into(),
            metrics: PlantMetrics::default(),
            daily_data: vec![rec("D2", 90.0), rec("D1", 80.0)],
        };
        let series = trend_series(&plant, TrendParam::Biomass);
        assert_eq!(
            series,
            vec![
                TrendPoint { day: "D2", value: 90.0 },
                TrendPoint { day: "D1", value: 80.0 }
            ]
        );
    }
}
