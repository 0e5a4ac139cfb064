//! Read-only views derived from a state snapshot.
//!
//! Nothing here is cached: every call recomputes from the authoritative good
//! list, so the capacity check and the displayed load can never drift apart.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use depot_core::{CategorySetId, WarehouseId};

use crate::good::{StoredGood, normalize_good_name};
use crate::state::AppState;

/// Label of the group holding goods with no category in a set.
pub const UNASSIGNED_GROUP: &str = "Unassigned";

/// Sum of `quantity × unitWeightKg` over the goods stored in one warehouse.
pub fn warehouse_used_weight_kg(state: &AppState, warehouse_id: &WarehouseId) -> f64 {
    state
        .goods
        .iter()
        .filter(|g| &g.warehouse_id == warehouse_id)
        .map(StoredGood::total_weight_kg)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseUsage {
    pub id: WarehouseId,
    pub name: String,
    pub max_capacity_kg: u64,
    pub used_weight_kg: f64,
}

impl WarehouseUsage {
    pub fn available_kg(&self) -> f64 {
        self.max_capacity_kg as f64 - self.used_weight_kg
    }
}

pub fn warehouse_usage(state: &AppState) -> Vec<WarehouseUsage> {
    state
        .warehouses
        .iter()
        .map(|w| WarehouseUsage {
            id: w.id.clone(),
            name: w.name.clone(),
            max_capacity_kg: w.max_capacity_kg,
            used_weight_kg: warehouse_used_weight_kg(state, &w.id),
        })
        .collect()
}

/// A stored good with its warehouse's display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodView {
    #[serde(flatten)]
    pub good: StoredGood,
    pub warehouse_name: String,
}

fn warehouse_name(state: &AppState, warehouse_id: &WarehouseId) -> String {
    state
        .warehouse(warehouse_id)
        .map_or_else(|| warehouse_id.to_string(), |w| w.name.clone())
}

pub fn goods_with_warehouse_names(state: &AppState) -> Vec<GoodView> {
    state
        .goods
        .iter()
        .map(|g| GoodView {
            good: g.clone(),
            warehouse_name: warehouse_name(state, &g.warehouse_id),
        })
        .collect()
}

pub fn warehouse_goods<'a>(state: &'a AppState, warehouse_id: &WarehouseId) -> Vec<&'a StoredGood> {
    state
        .goods
        .iter()
        .filter(|g| &g.warehouse_id == warehouse_id)
        .collect()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Totals for one good type across all warehouses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsTotal {
    pub name: String,
    pub total_quantity: u64,
    pub total_tickets: u64,
    pub total_weight_kg: f64,
    pub warehouses_count: usize,
}

/// Group goods by normalized name. The first line seen names the group.
pub fn goods_totals(state: &AppState) -> Vec<GoodsTotal> {
    let mut groups: BTreeMap<String, (GoodsTotal, BTreeSet<&WarehouseId>)> = BTreeMap::new();

    for good in &state.goods {
        let (total, warehouses) = groups
            .entry(normalize_good_name(&good.name))
            .or_insert_with(|| {
                (
                    GoodsTotal {
                        name: good.name.clone(),
                        total_quantity: 0,
                        total_tickets: 0,
                        total_weight_kg: 0.0,
                        warehouses_count: 0,
                    },
                    BTreeSet::new(),
                )
            });
        total.total_quantity = total.total_quantity.saturating_add(good.quantity);
        total.total_tickets = total.total_tickets.saturating_add(good.tickets);
        total.total_weight_kg += good.total_weight_kg();
        warehouses.insert(&good.warehouse_id);
    }

    let mut rows: Vec<GoodsTotal> = groups
        .into_values()
        .map(|(mut total, warehouses)| {
            total.warehouses_count = warehouses.len();
            total
        })
        .collect();
    rows.sort_by(|a, b| compare_names(&a.name, &b.name));
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryOrder {
    /// Closest expiry first.
    #[default]
    Close,
    /// Furthest expiry first.
    Far,
}

impl core::str::FromStr for ExpiryOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "close" => Ok(ExpiryOrder::Close),
            "far" => Ok(ExpiryOrder::Far),
            other => Err(format!("unknown expiry order '{other}' (expected close or far)")),
        }
    }
}

/// All goods sorted by expiry date; equal dates fall back to name order.
pub fn goods_by_expiry(state: &AppState, order: ExpiryOrder) -> Vec<GoodView> {
    let mut rows = goods_with_warehouse_names(state);
    rows.sort_by(|a, b| {
        let by_date = a.good.expiry_date.cmp(&b.good.expiry_date);
        let by_date = match order {
            ExpiryOrder::Close => by_date,
            ExpiryOrder::Far => by_date.reverse(),
        };
        by_date.then_with(|| compare_names(&a.good.name, &b.good.name))
    });
    rows
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub goods: Vec<String>,
}

/// Good names per category of one set, in the set's order, then `Unassigned`.
///
/// Returns `None` when the set does not exist.
pub fn category_groups(state: &AppState, set_id: &CategorySetId) -> Option<Vec<CategoryGroup>> {
    let set = state.category_set(set_id)?;
    let assignments = state.assignments_for(set_id);

    let mut groups: Vec<CategoryGroup> = set
        .categories
        .iter()
        .map(String::as_str)
        .chain([UNASSIGNED_GROUP])
        .map(|c| CategoryGroup {
            category: c.to_string(),
            goods: Vec::new(),
        })
        .collect();

    let mut goods: Vec<&StoredGood> = state.goods.iter().collect();
    goods.sort_by(|a, b| compare_names(&a.name, &b.name));

    for good in goods {
        let label = assignments
            .and_then(|m| m.get(&good.id))
            .map(|raw| set.resolve_category(raw).unwrap_or(raw).to_string())
            .unwrap_or_else(|| UNASSIGNED_GROUP.to_string());

        match groups.iter_mut().find(|g| g.category == label) {
            Some(group) => group.goods.push(good.name.clone()),
            None => groups.push(CategoryGroup {
                category: label,
                goods: vec![good.name.clone()],
            }),
        }
    }

    Some(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{
        CategoryAssignment, CreateCategorySet, SetCategoryAssignments, add_category_set,
        assign_categories,
    };
    use crate::good::{AddGood, add_good};

    fn add(
        state: &AppState,
        warehouse: &str,
        name: &str,
        quantity: f64,
        weight: f64,
        expiry: &str,
    ) -> (AppState, StoredGood) {
        let cmd = AddGood {
            warehouse_id: WarehouseId::new(warehouse),
            name: name.to_string(),
            quantity,
            unit_weight_kg: weight,
            expiry_date: expiry.to_string(),
            tickets: Some(1.0),
        };
        add_good(state, &cmd.validate().unwrap()).unwrap()
    }

    fn sample() -> AppState {
        let state = AppState::default();
        let (state, _) = add(&state, "wh-1", "Rice", 10.0, 2.0, "2025-03-01");
        let (state, _) = add(&state, "wh-2", "rice", 5.0, 2.0, "2025-03-01");
        let (state, _) = add(&state, "wh-1", "Apples", 3.0, 0.5, "2024-12-01");
        let (state, _) = add(&state, "wh-3", "Beans", 4.0, 1.0, "2025-03-01");
        state
    }

    #[test]
    fn used_weight_sums_only_that_warehouse() {
        let state = sample();
        assert_eq!(warehouse_used_weight_kg(&state, &WarehouseId::new("wh-1")), 21.5);
        assert_eq!(warehouse_used_weight_kg(&state, &WarehouseId::new("wh-6")), 0.0);
    }

    #[test]
    fn usage_lists_every_warehouse() {
        let usage = warehouse_usage(&sample());
        assert_eq!(usage.len(), 6);
        assert_eq!(usage[1].used_weight_kg, 10.0);
        assert_eq!(usage[1].available_kg(), 999_990.0);
    }

    #[test]
    fn goods_views_fall_back_to_warehouse_id() {
        let mut state = sample();
        state.goods[0].warehouse_id = WarehouseId::new("wh-gone");
        let views = goods_with_warehouse_names(&state);
        assert_eq!(views[0].warehouse_name, "wh-gone");
        assert_eq!(views[1].warehouse_name, "North Warehouse");
    }

    #[test]
    fn good_view_serializes_flat() {
        let views = goods_with_warehouse_names(&sample());
        let json = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(json["warehouseName"], "Central Warehouse");
        assert_eq!(json["unitWeightKg"], 2.0);
        assert_eq!(json["expiryDate"], "2025-03-01");
    }

    #[test]
    fn totals_group_by_normalized_name() {
        let totals = goods_totals(&sample());
        let names: Vec<_> = totals.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Apples", "Beans", "Rice"]);

        let rice = &totals[2];
        assert_eq!(rice.total_quantity, 15);
        assert_eq!(rice.total_tickets, 2);
        assert_eq!(rice.total_weight_kg, 30.0);
        assert_eq!(rice.warehouses_count, 2);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let state = AppState::default();
        let (state, _) = add(&state, "wh-1", "Dust", 1e19, 1e-20, "2030-01-01");
        let (state, _) = add(&state, "wh-1", "dust", 1e19, 1e-20, "2030-02-01");
        assert_eq!(state.goods.len(), 2);

        let totals = goods_totals(&state);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total_quantity, u64::MAX);
        assert_eq!(totals[0].total_tickets, 2);
        assert_eq!(totals[0].warehouses_count, 1);
    }

    #[test]
    fn expiry_order_close_and_far() {
        let state = sample();
        let close: Vec<_> = goods_by_expiry(&state, ExpiryOrder::Close)
            .into_iter()
            .map(|v| v.good.name)
            .collect();
        assert_eq!(close, vec!["Apples", "Beans", "Rice", "rice"]);

        let far: Vec<_> = goods_by_expiry(&state, ExpiryOrder::Far)
            .into_iter()
            .map(|v| v.good.name)
            .collect();
        assert_eq!(far, vec!["Beans", "Rice", "rice", "Apples"]);
    }

    #[test]
    fn expiry_order_parses_from_str() {
        assert_eq!("FAR".parse::<ExpiryOrder>().unwrap(), ExpiryOrder::Far);
        assert!("soon".parse::<ExpiryOrder>().is_err());
    }

    #[test]
    fn category_groups_include_unassigned() {
        let state = sample();
        let set = CreateCategorySet {
            name: "Kind".to_string(),
            categories: vec!["Grain".to_string(), "Fruit".to_string()],
        }
        .validate()
        .unwrap();
        let set_id = set.id.clone();
        let state = add_category_set(&state, set);

        let beans = state.goods.iter().find(|g| g.name == "Beans").unwrap().id.clone();
        let apples = state.goods.iter().find(|g| g.name == "Apples").unwrap().id.clone();
        let state = assign_categories(
            &state,
            &SetCategoryAssignments {
                category_set_id: set_id.clone(),
                assignments: vec![
                    CategoryAssignment { good_id: beans, category: "grain".to_string() },
                    CategoryAssignment { good_id: apples, category: "Fruit".to_string() },
                ],
            },
        )
        .unwrap();

        let groups = category_groups(&state, &set_id).unwrap();
        let labels: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(labels, vec!["Grain", "Fruit", UNASSIGNED_GROUP]);
        assert_eq!(groups[0].goods, vec!["Beans"]);
        assert_eq!(groups[1].goods, vec!["Apples"]);
        assert_eq!(groups[2].goods, vec!["Rice", "rice"]);
    }

    #[test]
    fn category_groups_for_unknown_set_is_none() {
        assert!(category_groups(&sample(), &CategorySetId::new("nope")).is_none());
    }
}
