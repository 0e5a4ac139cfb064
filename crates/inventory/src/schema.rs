//! Shape and invariants of persisted / untrusted warehouse data.
//!
//! Serde handles the structural part (field presence, integer vs. float,
//! non-negative counts, the expiry date pattern via [`ExpiryDate`]). The
//! checks serde cannot express live in [`validate_state`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use depot_core::{DomainError, DomainResult, ValueObject};

use crate::category::MAX_CATEGORIES_PER_SET;
use crate::state::{AppState, STATE_VERSION};

static EXPIRY_DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("expiry date pattern is a valid regex")
});

/// Calendar date literal in `YYYY-MM-DD` form (no timezone).
///
/// Only the textual pattern is checked. Because every value has the same fixed
/// width, ordering the strings orders the dates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpiryDate(String);

impl ExpiryDate {
    pub fn parse(value: &str) -> DomainResult<Self> {
        if EXPIRY_DATE_PATTERN.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::validation("expiry date must be YYYY-MM-DD"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ExpiryDate {}

impl core::fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ExpiryDate {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExpiryDate> for String {
    fn from(value: ExpiryDate) -> Self {
        value.0
    }
}

/// Floor a caller-supplied count that must be at least one.
pub fn positive_count(value: f64, what: &str) -> DomainResult<u64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DomainError::validation(format!(
            "{what} must be a positive number"
        )));
    }
    let floored = value.floor();
    if floored < 1.0 {
        return Err(DomainError::validation(format!("{what} must be at least 1")));
    }
    Ok(floored as u64)
}

/// Floor a caller-supplied count that may be zero.
pub fn non_negative_count(value: f64, what: &str) -> DomainResult<u64> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{what} must be a non-negative number"
        )));
    }
    Ok(value.floor() as u64)
}

/// Positive, finite real number (weights).
pub fn positive_weight(value: f64, what: &str) -> DomainResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::validation(format!(
            "{what} must be a positive number"
        )))
    }
}

/// Check the invariants of a deserialized state document.
pub fn validate_state(state: &AppState) -> DomainResult<()> {
    if state.version != STATE_VERSION {
        return Err(DomainError::validation(format!(
            "unsupported state version {} (expected {STATE_VERSION})",
            state.version
        )));
    }

    for warehouse in &state.warehouses {
        if warehouse.max_capacity_kg == 0 {
            return Err(DomainError::validation(format!(
                "warehouse {} must have a positive capacity",
                warehouse.id
            )));
        }
    }

    for good in &state.goods {
        if good.quantity == 0 {
            return Err(DomainError::validation(format!(
                "good {} must have a positive quantity",
                good.id
            )));
        }
        positive_weight(good.unit_weight_kg, "unit weight")?;
    }

    for set in &state.goods_category_sets {
        if set.categories.is_empty() || set.categories.len() > MAX_CATEGORIES_PER_SET {
            return Err(DomainError::validation(format!(
                "category set {} must have between 1 and {MAX_CATEGORIES_PER_SET} categories",
                set.id
            )));
        }
    }

    Ok(())
}

/// Drop repeated feature ids, keeping the first occurrence.
pub fn dedup_used_features(state: &mut AppState) {
    let mut seen = std::collections::HashSet::new();
    state.used_features.retain(|f| seen.insert(f.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::GoodsCategorySet;
    use crate::good::StoredGood;
    use depot_core::{CategorySetId, GoodId, WarehouseId};

    fn good(quantity: u64, unit_weight_kg: f64) -> StoredGood {
        StoredGood {
            id: GoodId::new("good_1"),
            warehouse_id: WarehouseId::new("wh-1"),
            name: "Rice".to_string(),
            quantity,
            unit_weight_kg,
            expiry_date: ExpiryDate::parse("2025-01-01").unwrap(),
            tickets: 0,
        }
    }

    #[test]
    fn expiry_date_accepts_exact_pattern_only() {
        assert!(ExpiryDate::parse("2025-06-01").is_ok());
        for bad in ["2025-6-01", "25-06-01", "2025/06/01", " 2025-06-01", "2025-06-01T00:00", ""] {
            match ExpiryDate::parse(bad) {
                Err(DomainError::Validation(_)) => {}
                other => panic!("expected validation error for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn expiry_date_rejects_non_ascii_digits() {
        assert!(ExpiryDate::parse("٢٠٢٥-٠٦-٠١").is_err());
    }

    #[test]
    fn expiry_date_is_validated_on_deserialize() {
        assert!(serde_json::from_str::<ExpiryDate>("\"2025-01-31\"").is_ok());
        assert!(serde_json::from_str::<ExpiryDate>("\"Jan 31\"").is_err());
    }

    #[test]
    fn counts_are_floored() {
        assert_eq!(positive_count(10.9, "quantity").unwrap(), 10);
        assert_eq!(non_negative_count(0.0, "tickets").unwrap(), 0);
        assert_eq!(non_negative_count(2.7, "tickets").unwrap(), 2);
    }

    #[test]
    fn counts_reject_non_finite_and_out_of_range() {
        assert!(positive_count(0.0, "quantity").is_err());
        assert!(positive_count(-3.0, "quantity").is_err());
        assert!(positive_count(0.4, "quantity").is_err());
        assert!(positive_count(f64::NAN, "quantity").is_err());
        assert!(positive_count(f64::INFINITY, "quantity").is_err());
        assert!(non_negative_count(-1.0, "tickets").is_err());
        assert!(positive_weight(0.0, "unit weight").is_err());
        assert!(positive_weight(f64::NAN, "unit weight").is_err());
    }

    #[test]
    fn default_state_is_valid() {
        assert!(validate_state(&AppState::default()).is_ok());
    }

    #[test]
    fn wrong_version_is_rejected() {
        let state = AppState {
            version: 2,
            ..AppState::default()
        };
        assert!(validate_state(&state).is_err());
    }

    #[test]
    fn zero_quantity_or_weight_is_rejected() {
        let mut state = AppState::default();
        state.goods.push(good(0, 1.0));
        assert!(validate_state(&state).is_err());

        let mut state = AppState::default();
        state.goods.push(good(1, 0.0));
        assert!(validate_state(&state).is_err());
    }

    #[test]
    fn category_set_size_is_bounded() {
        let mut state = AppState::default();
        state.goods_category_sets.push(GoodsCategorySet {
            id: CategorySetId::new("catset_1"),
            name: "Too many".to_string(),
            categories: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        });
        assert!(validate_state(&state).is_err());
    }

    #[test]
    fn used_features_are_deduplicated_in_order() {
        let mut state = AppState {
            used_features: vec!["ai".into(), "stores".into(), "ai".into()],
            ..AppState::default()
        };
        dedup_used_features(&mut state);
        assert_eq!(state.used_features, vec!["ai".to_string(), "stores".to_string()]);
    }
}
