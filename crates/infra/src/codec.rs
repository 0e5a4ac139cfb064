//! JSON form of the persisted state document.

use thiserror::Error;

use depot_core::DomainError;
use depot_inventory::{AppState, dedup_used_features, validate_state};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed state document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("state document failed schema validation: {0}")]
    Schema(DomainError),
}

pub fn encode(state: &AppState) -> Result<String, CodecError> {
    Ok(serde_json::to_string(state)?)
}

/// Parse and validate a stored document.
///
/// Structural problems (missing fields, wrong types, a bad expiry date) are
/// `Json` errors; rule violations serde cannot see are `Schema` errors.
pub fn decode(raw: &str) -> Result<AppState, CodecError> {
    let mut state: AppState = serde_json::from_str(raw)?;
    validate_state(&state).map_err(CodecError::Schema)?;
    dedup_used_features(&mut state);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{CategorySetId, GoodId, WarehouseId};
    use depot_inventory::{ExpiryDate, GoodsCategorySet, StoredGood};
    use serde_json::json;

    fn populated() -> AppState {
        let mut state = AppState::default();
        state.goods.push(StoredGood {
            id: GoodId::new("good_1"),
            warehouse_id: WarehouseId::new("wh-1"),
            name: "Rice".to_string(),
            quantity: 12,
            unit_weight_kg: 2.5,
            expiry_date: ExpiryDate::parse("2025-06-01").unwrap(),
            tickets: 3,
        });
        state.goods_category_sets.push(GoodsCategorySet {
            id: CategorySetId::new("catset_1"),
            name: "Kind".to_string(),
            categories: vec!["Food".to_string(), "Other".to_string()],
        });
        state
            .goods_category_assignments
            .entry(CategorySetId::new("catset_1"))
            .or_default()
            .insert(GoodId::new("good_1"), "Food".to_string());
        state.used_features = vec!["stores".to_string(), "ai".to_string()];
        state
    }

    #[test]
    fn round_trip_reproduces_equal_state() {
        let state = populated();
        let raw = encode(&state).unwrap();
        assert_eq!(decode(&raw).unwrap(), state);
    }

    #[test]
    fn encoded_document_uses_camel_case_layout() {
        let encoded = encode(&populated()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["warehouses"][0]["maxCapacityKg"], 1_000_000);
        assert_eq!(value["goods"][0]["warehouseId"], "wh-1");
        assert_eq!(value["goods"][0]["unitWeightKg"], 2.5);
        assert_eq!(value["goodsCategorySets"][0]["categories"][1], "Other");
        assert_eq!(value["goodsCategoryAssignments"]["catset_1"]["good_1"], "Food");
        assert_eq!(value["usedFeatures"][1], "ai");
    }

    #[test]
    fn optional_fields_take_defaults() {
        let raw = json!({
            "version": 1,
            "warehouses": [{ "id": "wh-1", "name": "Central Warehouse" }],
            "goods": [{
                "id": "good_1", "warehouseId": "wh-1", "name": "Rice",
                "quantity": 1, "unitWeightKg": 1.0, "expiryDate": "2025-01-01"
            }],
            "goodsCategorySets": [],
            "goodsCategoryAssignments": {},
            "usedFeatures": ["ai", "ai"]
        })
        .to_string();

        let state = decode(&raw).unwrap();
        assert_eq!(state.warehouses[0].max_capacity_kg, 1_000_000);
        assert_eq!(state.goods[0].tickets, 0);
        assert_eq!(state.used_features, vec!["ai".to_string()]);
    }

    #[test]
    fn structural_problems_are_json_errors() {
        for raw in [
            "not json",
            "{}",
            r#"{"version":1,"warehouses":[],"goods":[],"goodsCategorySets":[],"usedFeatures":[]}"#,
            r#"{"version":1,"warehouses":[],"goods":[{"id":"g","warehouseId":"wh-1","name":"x","quantity":1.5,"unitWeightKg":1,"expiryDate":"2025-01-01"}],"goodsCategorySets":[],"goodsCategoryAssignments":{},"usedFeatures":[]}"#,
            r#"{"version":1,"warehouses":[],"goods":[{"id":"g","warehouseId":"wh-1","name":"x","quantity":1,"unitWeightKg":1,"expiryDate":"tomorrow"}],"goodsCategorySets":[],"goodsCategoryAssignments":{},"usedFeatures":[]}"#,
            r#"{"version":1,"warehouses":[],"goods":[{"id":"g","warehouseId":"wh-1","name":"x","quantity":1,"unitWeightKg":1,"expiryDate":"2025-01-01","tickets":-1}],"goodsCategorySets":[],"goodsCategoryAssignments":{},"usedFeatures":[]}"#,
        ] {
            assert!(matches!(decode(raw), Err(CodecError::Json(_))), "{raw}");
        }
    }

    #[test]
    fn rule_violations_are_schema_errors() {
        for raw in [
            r#"{"version":2,"warehouses":[],"goods":[],"goodsCategorySets":[],"goodsCategoryAssignments":{},"usedFeatures":[]}"#,
            r#"{"version":1,"warehouses":[{"id":"wh-1","name":"x","maxCapacityKg":0}],"goods":[],"goodsCategorySets":[],"goodsCategoryAssignments":{},"usedFeatures":[]}"#,
            r#"{"version":1,"warehouses":[],"goods":[{"id":"g","warehouseId":"wh-1","name":"x","quantity":0,"unitWeightKg":1,"expiryDate":"2025-01-01"}],"goodsCategorySets":[],"goodsCategoryAssignments":{},"usedFeatures":[]}"#,
            r#"{"version":1,"warehouses":[],"goods":[],"goodsCategorySets":[{"id":"c","name":"n","categories":[]}],"goodsCategoryAssignments":{},"usedFeatures":[]}"#,
        ] {
            assert!(matches!(decode(raw), Err(CodecError::Schema(_))), "{raw}");
        }
    }
}
