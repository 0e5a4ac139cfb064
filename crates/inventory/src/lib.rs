//! Warehouse inventory domain.
//!
//! Business rules for warehouses, stored goods, category sets and feature
//! usage, implemented as deterministic transitions over [`AppState`] (no IO,
//! no storage). Each transition takes the current snapshot and returns a new
//! one or a [`depot_core::DomainError`].

pub mod category;
pub mod features;
pub mod good;
pub mod queries;
pub mod schema;
pub mod state;
pub mod warehouse;

pub use category::{
    CategoryAssignment, CreateCategorySet, GoodsCategorySet, MAX_CATEGORIES_PER_SET,
    SetCategoryAssignments, add_category_set, assign_categories, assignment_count,
};
pub use features::{FEATURES, FeatureBoard, FeatureDescriptor, feature_board, mark_feature_used};
pub use good::{AddGood, StoredGood, ValidatedGood, add_good, normalize_good_name};
pub use queries::{
    CategoryGroup, ExpiryOrder, GoodView, GoodsTotal, UNASSIGNED_GROUP, WarehouseUsage,
    category_groups, goods_by_expiry, goods_totals, goods_with_warehouse_names, warehouse_goods,
    warehouse_usage, warehouse_used_weight_kg,
};
pub use schema::{ExpiryDate, dedup_used_features, validate_state};
pub use state::{AppState, CategoryAssignments, STATE_VERSION};
pub use warehouse::{WAREHOUSE_MAX_CAPACITY_KG, Warehouse, default_warehouses};
