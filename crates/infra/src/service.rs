//! Operation surface over a [`StateStore`], shared by the CLI and the tool
//! adapter.

use serde::{Deserialize, Serialize};

use depot_core::{CategorySetId, DomainResult, WarehouseId};
use depot_events::{ChangeNotifier, InMemoryNotifier, Subscription};
use depot_inventory::{
    AddGood, CategoryGroup, CreateCategorySet, ExpiryOrder, FeatureBoard, GoodView,
    GoodsCategorySet, GoodsTotal, SetCategoryAssignments, StoredGood, WarehouseUsage,
    add_category_set, add_good, assign_categories, assignment_count, category_groups, feature_board,
    goods_by_expiry, goods_totals, goods_with_warehouse_names, mark_feature_used, warehouse_goods,
    warehouse_usage,
};

use crate::storage::{InMemoryStorage, StateStorage};
use crate::store::{Snapshot, StateStore};

/// Full snapshot with derived per-warehouse load and per-good warehouse name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseAppData {
    pub warehouses: Vec<WarehouseUsage>,
    pub goods: Vec<GoodView>,
    pub goods_category_sets: Vec<GoodsCategorySet>,
    pub used_features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSummary {
    pub category_set_id: CategorySetId,
    pub total_assignments: usize,
}

pub struct WarehouseService<S, N = InMemoryNotifier<Snapshot>> {
    store: StateStore<S, N>,
}

impl WarehouseService<InMemoryStorage> {
    pub fn in_memory() -> Self {
        Self::new(StateStore::in_memory())
    }
}

impl<S, N> WarehouseService<S, N> {
    pub fn new(store: StateStore<S, N>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &StateStore<S, N> {
        &self.store
    }
}

impl<S, N> WarehouseService<S, N>
where
    S: StateStorage,
    N: ChangeNotifier<Snapshot>,
{
    pub fn state(&self) -> Snapshot {
        self.store.read()
    }

    pub fn snapshot(&self) -> WarehouseAppData {
        let state = self.store.read();
        WarehouseAppData {
            warehouses: warehouse_usage(&state),
            goods: goods_with_warehouse_names(&state),
            goods_category_sets: state.goods_category_sets.clone(),
            used_features: state.used_features.clone(),
        }
    }

    /// Add a good, merging into a matching inventory line. Returns the new or
    /// merged line as written.
    pub fn add_good(&self, cmd: &AddGood) -> DomainResult<StoredGood> {
        let good = cmd.validate()?;
        let (_, stored) = self.store.update_with(|prev| add_good(prev, &good))?;
        Ok(stored)
    }

    pub fn create_category_set(&self, cmd: &CreateCategorySet) -> DomainResult<GoodsCategorySet> {
        let set = cmd.validate()?;
        self.store.apply(|prev| add_category_set(prev, set.clone()));
        Ok(set)
    }

    pub fn set_category_assignments(
        &self,
        cmd: &SetCategoryAssignments,
    ) -> DomainResult<AssignmentSummary> {
        let next = self.store.update(|prev| assign_categories(prev, cmd))?;
        Ok(AssignmentSummary {
            category_set_id: cmd.category_set_id.clone(),
            total_assignments: assignment_count(&next, &cmd.category_set_id),
        })
    }

    pub fn mark_feature_used(&self, feature_id: &str) -> Snapshot {
        self.store.apply(|prev| mark_feature_used(prev, feature_id))
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn feature_board(&self) -> FeatureBoard {
        feature_board(&self.store.read())
    }

    pub fn goods_totals(&self) -> Vec<GoodsTotal> {
        goods_totals(&self.store.read())
    }

    pub fn goods_by_expiry(&self, order: ExpiryOrder) -> Vec<GoodView> {
        goods_by_expiry(&self.store.read(), order)
    }

    /// `None` when the category set does not exist.
    pub fn category_groups(&self, set_id: &CategorySetId) -> Option<Vec<CategoryGroup>> {
        category_groups(&self.store.read(), set_id)
    }

    pub fn warehouse_goods(&self, warehouse_id: &WarehouseId) -> Vec<StoredGood> {
        warehouse_goods(&self.store.read(), warehouse_id)
            .into_iter()
            .cloned()
            .collect()
    }
}

impl<S, N> core::fmt::Debug for WarehouseService<S, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WarehouseService")
            .field("store", &self.store)
            .finish()
    }
}
