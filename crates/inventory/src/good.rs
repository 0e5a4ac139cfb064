use serde::{Deserialize, Serialize};

use depot_core::{CapacityExceeded, DomainError, DomainResult, Entity, GoodId, WarehouseId};

use crate::queries::warehouse_used_weight_kg;
use crate::schema::{ExpiryDate, non_negative_count, positive_count, positive_weight};
use crate::state::AppState;

/// Name normalization used for inventory-line identity and name grouping.
pub fn normalize_good_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Inventory line: a quantity of one good type stored in one warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredGood {
    pub id: GoodId,
    pub warehouse_id: WarehouseId,
    pub name: String,
    pub quantity: u64,
    pub unit_weight_kg: f64,
    pub expiry_date: ExpiryDate,
    #[serde(default)]
    pub tickets: u64,
}

impl StoredGood {
    /// `quantity × unitWeightKg`.
    pub fn total_weight_kg(&self) -> f64 {
        self.quantity as f64 * self.unit_weight_kg
    }

    /// Same warehouse, same normalized name, same unit weight, same expiry.
    ///
    /// Unit weights compare exactly; values that differ only by float rounding
    /// are different lines.
    pub fn is_same_line(&self, other: &ValidatedGood) -> bool {
        self.warehouse_id == other.warehouse_id
            && normalize_good_name(&self.name) == normalize_good_name(&other.name)
            && self.unit_weight_kg == other.unit_weight_kg
            && self.expiry_date == other.expiry_date
    }
}

impl Entity for StoredGood {
    type Id = GoodId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: add a good to a warehouse (raw, caller-supplied values).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGood {
    pub warehouse_id: WarehouseId,
    pub name: String,
    pub quantity: f64,
    pub unit_weight_kg: f64,
    pub expiry_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets: Option<f64>,
}

/// An [`AddGood`] that passed input validation: trimmed name, floored counts.
///
/// `requested_quantity` keeps the caller's raw quantity; capacity is checked
/// against it, while `quantity` is what gets stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedGood {
    pub warehouse_id: WarehouseId,
    pub name: String,
    pub requested_quantity: f64,
    pub quantity: u64,
    pub unit_weight_kg: f64,
    pub expiry_date: ExpiryDate,
    pub tickets: u64,
}

impl ValidatedGood {
    /// Weight the add asks for: raw quantity × unit weight.
    pub fn weight_kg(&self) -> f64 {
        self.requested_quantity * self.unit_weight_kg
    }
}

impl AddGood {
    /// Input checks that need no state. Run before entering the store update.
    pub fn validate(&self) -> DomainResult<ValidatedGood> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("good name is required"));
        }
        let quantity = positive_count(self.quantity, "quantity")?;
        let unit_weight_kg = positive_weight(self.unit_weight_kg, "unit weight")?;
        let expiry_date = ExpiryDate::parse(&self.expiry_date)?;
        let tickets = non_negative_count(self.tickets.unwrap_or(0.0), "tickets")?;

        Ok(ValidatedGood {
            warehouse_id: self.warehouse_id.clone(),
            name: name.to_string(),
            requested_quantity: self.quantity,
            quantity,
            unit_weight_kg,
            expiry_date,
            tickets,
        })
    }
}

/// Store `good` in its warehouse, merging into an existing line when one matches.
///
/// Fails when the warehouse is unknown or when the added weight would push the
/// warehouse past its capacity. Returns the next state together with the
/// created or merged line.
pub fn add_good(state: &AppState, good: &ValidatedGood) -> DomainResult<(AppState, StoredGood)> {
    let warehouse = state
        .warehouse(&good.warehouse_id)
        .ok_or_else(|| DomainError::not_found("warehouse", good.warehouse_id.as_str()))?;

    let current_weight_kg = warehouse_used_weight_kg(state, &warehouse.id);
    let attempted_add_kg = good.weight_kg();
    if current_weight_kg + attempted_add_kg > warehouse.max_capacity_kg as f64 {
        return Err(DomainError::capacity_exceeded(CapacityExceeded {
            warehouse_id: warehouse.id.clone(),
            max_capacity_kg: warehouse.max_capacity_kg,
            current_weight_kg,
            attempted_add_kg,
        }));
    }

    let mut goods = state.goods.clone();
    let stored = match goods.iter().position(|g| g.is_same_line(good)) {
        Some(index) => {
            let existing = &goods[index];
            let quantity = existing
                .quantity
                .checked_add(good.quantity)
                .ok_or_else(|| DomainError::validation("merged quantity is too large"))?;
            let tickets = existing
                .tickets
                .checked_add(good.tickets)
                .ok_or_else(|| DomainError::validation("merged tickets count is too large"))?;
            let merged = StoredGood {
                quantity,
                tickets,
                ..existing.clone()
            };
            goods[index] = merged.clone();
            merged
        }
        None => {
            let created = StoredGood {
                id: GoodId::generate(),
                warehouse_id: warehouse.id.clone(),
                name: good.name.clone(),
                quantity: good.quantity,
                unit_weight_kg: good.unit_weight_kg,
                expiry_date: good.expiry_date.clone(),
                tickets: good.tickets,
            };
            goods.push(created.clone());
            created
        }
    };

    let next = AppState {
        goods,
        ..state.clone()
    };
    Ok((next, stored))
}
