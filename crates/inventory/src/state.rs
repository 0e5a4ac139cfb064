use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use depot_core::{CategorySetId, GoodId, WarehouseId, find_by_id};

use crate::category::GoodsCategorySet;
use crate::good::StoredGood;
use crate::warehouse::{Warehouse, default_warehouses};

/// Schema version tag written into every persisted document.
pub const STATE_VERSION: u32 = 1;

/// Category set id -> (good id -> category label).
pub type CategoryAssignments = BTreeMap<CategorySetId, BTreeMap<GoodId, String>>;

/// Aggregate root holding all warehouse domain data.
///
/// Transitions never mutate a state in place; they build a new value from the
/// previous one, so any snapshot a caller holds stays valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub version: u32,
    pub warehouses: Vec<Warehouse>,
    pub goods: Vec<StoredGood>,
    pub goods_category_sets: Vec<GoodsCategorySet>,
    pub goods_category_assignments: CategoryAssignments,
    pub used_features: Vec<String>,
}

impl Default for AppState {
    /// Six empty warehouses, no goods, no category data, no feature usage.
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            warehouses: default_warehouses(),
            goods: Vec::new(),
            goods_category_sets: Vec::new(),
            goods_category_assignments: BTreeMap::new(),
            used_features: Vec::new(),
        }
    }
}

impl AppState {
    pub fn warehouse(&self, id: &WarehouseId) -> Option<&Warehouse> {
        find_by_id(&self.warehouses, id)
    }

    pub fn good(&self, id: &GoodId) -> Option<&StoredGood> {
        find_by_id(&self.goods, id)
    }

    pub fn category_set(&self, id: &CategorySetId) -> Option<&GoodsCategorySet> {
        find_by_id(&self.goods_category_sets, id)
    }

    pub fn assignments_for(&self, id: &CategorySetId) -> Option<&BTreeMap<GoodId, String>> {
        self.goods_category_assignments.get(id)
    }

    pub fn is_feature_used(&self, feature_id: &str) -> bool {
        self.used_features.iter().any(|f| f == feature_id)
    }
}
