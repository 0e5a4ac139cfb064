use serde::{Deserialize, Serialize};

use depot_core::{Entity, WarehouseId};

/// Capacity every warehouse gets unless the persisted document says otherwise.
pub const WAREHOUSE_MAX_CAPACITY_KG: u64 = 1_000_000;

fn default_max_capacity_kg() -> u64 {
    WAREHOUSE_MAX_CAPACITY_KG
}

/// A storage site with a weight limit.
///
/// Warehouses come from the fixed default set and are never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    #[serde(default = "default_max_capacity_kg")]
    pub max_capacity_kg: u64,
}

impl Warehouse {
    pub fn new(id: impl Into<WarehouseId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_capacity_kg: WAREHOUSE_MAX_CAPACITY_KG,
        }
    }

    pub fn with_max_capacity_kg(mut self, max_capacity_kg: u64) -> Self {
        self.max_capacity_kg = max_capacity_kg;
        self
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// The six warehouses every fresh state starts with.
pub fn default_warehouses() -> Vec<Warehouse> {
    [
        ("wh-1", "Central Warehouse"),
        ("wh-2", "North Warehouse"),
        ("wh-3", "South Warehouse"),
        ("wh-4", "East Warehouse"),
        ("wh-5", "West Warehouse"),
        ("wh-6", "Port Warehouse"),
    ]
    .into_iter()
    .map(|(id, name)| Warehouse::new(id, name))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_six_full_capacity_warehouses() {
        let warehouses = default_warehouses();
        assert_eq!(warehouses.len(), 6);
        assert_eq!(warehouses[0].id.as_str(), "wh-1");
        assert_eq!(warehouses[5].name, "Port Warehouse");
        assert!(
            warehouses
                .iter()
                .all(|w| w.max_capacity_kg == WAREHOUSE_MAX_CAPACITY_KG)
        );
    }

    #[test]
    fn missing_capacity_defaults_on_deserialize() {
        let w: Warehouse = serde_json::from_str(r#"{"id":"wh-9","name":"Annex"}"#).unwrap();
        assert_eq!(w.max_capacity_kg, WAREHOUSE_MAX_CAPACITY_KG);
    }
}
