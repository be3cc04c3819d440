use bevy::prelude::*;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::bins::WasteCategory;

/// One spawnable trash item. Duplicated names are intentional: the catalog
/// mirrors the real-world frequency mix, so common items appear twice.
pub struct TrashDefinition {
    pub category: WasteCategory,
    pub name: &'static str,
    pub icon: &'static str,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("trash catalog has no usable entries")]
    Empty,
}

const RAW_CATALOG: [(WasteCategory, &str, &str); 20] = [
    (WasteCategory::Recyclable, "Glass", "icons/glass.png"),
    (WasteCategory::Recyclable, "Metal", "icons/metal.png"),
    (WasteCategory::Recyclable, "Plastic", "icons/plastic.png"),
    (WasteCategory::Recyclable, "Paper", "icons/paper.png"),
    (WasteCategory::Recyclable, "Fabric", "icons/fabric.png"),
    (WasteCategory::Recyclable, "Furniture", "icons/furniture.png"),
    (WasteCategory::Recyclable, "Electronics", "icons/electronics.png"),
    (WasteCategory::Kitchen, "Food scraps", "icons/food_scraps.png"),
    (WasteCategory::Kitchen, "Food scraps", "icons/food_scraps.png"),
    (WasteCategory::Kitchen, "Restaurant waste", "icons/restaurant_waste.png"),
    (WasteCategory::Kitchen, "Spoiled produce", "icons/spoiled_produce.png"),
    (WasteCategory::Kitchen, "Spoiled produce", "icons/spoiled_produce.png"),
    (WasteCategory::Harmful, "Battery", "icons/battery.png"),
    (WasteCategory::Harmful, "Battery", "icons/battery.png"),
    (WasteCategory::Harmful, "Fluorescent tube", "icons/fluorescent_tube.png"),
    (WasteCategory::Harmful, "Household chemicals", "icons/chemicals.png"),
    (WasteCategory::Other, "Garden waste", "icons/garden_waste.png"),
    (WasteCategory::Other, "Garden waste", "icons/garden_waste.png"),
    (WasteCategory::Other, "Festive flowers", "icons/festive_flowers.png"),
    (WasteCategory::Other, "Potted plants", "icons/potted_plants.png"),
];

/// Static registry of everything the spawner may drop.
#[derive(Resource, Default)]
pub struct TrashCatalog {
    entries: Vec<TrashDefinition>,
}

impl TrashCatalog {
    /// Builds the catalog from static data, skipping broken entries.
    pub fn load() -> Result<Self, CatalogError> {
        let mut entries = Vec::with_capacity(RAW_CATALOG.len());
        for (category, name, icon) in RAW_CATALOG {
            if name.is_empty() || icon.is_empty() {
                warn!("skipping trash entry {name:?} ({category:?}): missing name or icon");
                continue;
            }
            entries.push(TrashDefinition {
                category,
                name,
                icon,
            });
        }
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let catalog = Self { entries };
        for category in WasteCategory::iter() {
            if catalog.count_in(category) == 0 {
                warn!("trash catalog has no entries for {category:?}; that bin can never score");
            }
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrashDefinition> {
        self.entries.get(index)
    }

    pub fn count_in(&self, category: WasteCategory) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.category == category)
            .count()
    }
}

/// Loads the catalog at startup. A broken catalog leaves an empty resource in
/// place so the tick loop keeps running; the spawner just has nothing to drop.
pub fn setup_catalog(mut commands: Commands) {
    match TrashCatalog::load() {
        Ok(catalog) => {
            info!("trash catalog loaded: {} entries", catalog.len());
            commands.insert_resource(catalog);
        }
        Err(err) => {
            error!("failed to load trash catalog: {err}");
            commands.insert_resource(TrashCatalog::default());
        }
    }
}
