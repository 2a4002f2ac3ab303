use super::catalog::AssetCatalog;

/// Heading of the spectral heatmap section.
pub const SECTION_TITLE: &str = "Phenospectral analytics";

/// Semantic group of spectral indices, used only for browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexGroup {
    Biomass,
    Water,
    NitrogenChlorophyll,
    DroughtStress,
}

impl IndexGroup {
    pub const ALL: [IndexGroup; 4] = [
        IndexGroup::Biomass,
        IndexGroup::Water,
        IndexGroup::NitrogenChlorophyll,
        IndexGroup::DroughtStress,
    ];

    pub fn key(self) -> &'static str {
        match self {
            IndexGroup::Biomass => "biomass",
            IndexGroup::Water => "water",
            IndexGroup::NitrogenChlorophyll => "nitrogen_chlorophyll",
            IndexGroup::DroughtStress => "drought_stress",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IndexGroup::Biomass => "Biomass & greenness",
            IndexGroup::Water => "Water content",
            IndexGroup::NitrogenChlorophyll => "Nitrogen & chlorophyll",
            IndexGroup::DroughtStress => "Drought & stress",
        }
    }

    pub fn indices(self) -> &'static [&'static str] {
        match self {
            IndexGroup::Biomass => &[
                "NDVI", "EVI", "GNDVI", "SAVI", "MSAVI", "DVI", "SR", "GRVI", "CIG", "ExG", "GLI",
                "TGI",
            ],
            IndexGroup::Water => &["NDWI", "NDMI", "LSWI", "GVMI", "MNDWI", "NDII"],
            IndexGroup::NitrogenChlorophyll => &[
                "CIRE", "MCARI", "MTCI", "NDREI", "ND705", "NDVI705", "IRECI", "CVI", "CRI550",
                "CRI700",
            ],
            IndexGroup::DroughtStress => &["DSI", "NDDI", "NMDI", "DSWI1", "DSWI5", "PSRI", "MSI"],
        }
    }
}

/// Group an index belongs to, if it is a known index.
pub fn group_of(index: &str) -> Option<IndexGroup> {
    IndexGroup::ALL
        .into_iter()
        .find(|g| g.indices().contains(&index))
}

/// Every known index, alphabetically (case-insensitive), for pickers that
/// list indices without grouping.
pub fn all_indices_sorted() -> Vec<&'static str> {
    let mut all: Vec<&'static str> = IndexGroup::ALL
        .into_iter()
        .flat_map(|g| g.indices().iter().copied())
        .collect();
    all.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    all
}

/// Indices with a heatmap for `plant_id`, grouped in static order.
///
/// Unknown plants use the default plant's heatmaps, matching
/// [`AssetCatalog::resolve`]. Groups with no available index are omitted.
pub fn available_by_group(
    catalog: &AssetCatalog,
    plant_id: &str,
) -> Vec<(IndexGroup, Vec<&'static str>)> {
    let entry = catalog
        .get(plant_id)
        .unwrap_or_else(|| catalog.default_entry());

    IndexGroup::ALL
        .into_iter()
        .filter_map(|group| {
            let available: Vec<&'static str> = group
                .indices()
                .iter()
                .copied()
                .filter(|name| entry.heatmaps.contains_key(*name))
                .collect();
            (!available.is_empty()).then_some((group, available))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::catalog::PlantCatalogEntry;

    #[test]
    fn every_index_has_one_group() {
        let all = all_indices_sorted();
        assert_eq!(all.len(), 35);
        for index in &all {
            assert!(group_of(index).is_some(), "{index} has no group");
        }
        assert_eq!(group_of("NDMI"), Some(IndexGroup::Water));
        assert_eq!(group_of("BOGUS"), None);
    }

    #[test]
    fn sorted_list_ignores_case() {
        let all = all_indices_sorted();
        let evi = all.iter().position(|i| *i == "EVI").unwrap();
        let exg = all.iter().position(|i| *i == "ExG").unwrap();
        assert!(evi < exg);
        assert_eq!(all[0], "CIG");
    }

    #[test]
    fn availability_skips_empty_groups() {
        let catalog = AssetCatalog::builder()
            .entry(
                PlantCatalogEntry::new("plant-1")
                    .with_heatmap("PSRI", "p")
                    .with_heatmap("NDVI", "n")
                    .with_heatmap("EVI", "e")
                    .with_heatmap("UNLISTED", "u"),
            )
            .entry(PlantCatalogEntry::new("plant-2"))
            .build()
            .unwrap();

        let groups = available_by_group(&catalog, "plant-1");
        assert_eq!(
            groups,
            vec![
                (IndexGroup::Biomass, vec!["NDVI", "EVI"]),
                (IndexGroup::DroughtStress, vec!["PSRI"]),
            ]
        );
        assert!(available_by_group(&catalog, "plant-2").is_empty());
        assert_eq!(available_by_group(&catalog, "plant-9"), groups);
    }
}
