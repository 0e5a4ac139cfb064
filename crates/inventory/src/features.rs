//! Feature catalogue and usage tracking.

use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const FEATURES: [FeatureDescriptor; 7] = [
    FeatureDescriptor {
        id: "stores",
        label: "Stores",
        description: "Browse warehouses, add goods, and view goods per warehouse",
    },
    FeatureDescriptor {
        id: "goods-stored",
        label: "Goods stored",
        description: "See totals of goods by type across all warehouses",
    },
    FeatureDescriptor {
        id: "close-expiry",
        label: "Close expiry",
        description: "See goods sorted by closest expiry dates first",
    },
    FeatureDescriptor {
        id: "far-expiry",
        label: "Far expiry",
        description: "See goods sorted by furthest expiry dates first",
    },
    FeatureDescriptor {
        id: "good-classes",
        label: "Good classes",
        description: "Create category sets (max 3 categories) and classify goods",
    },
    FeatureDescriptor {
        id: "functionalities",
        label: "Functionalities",
        description: "See a list of all features split into used and unused",
    },
    FeatureDescriptor {
        id: "ai",
        label: "AI assistant",
        description: "Use prompts to view and update warehouse data",
    },
];

/// Catalogue split by whether each feature appears in `usedFeatures`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureBoard {
    pub used: Vec<FeatureDescriptor>,
    pub unused: Vec<FeatureDescriptor>,
}

pub fn feature_board(state: &AppState) -> FeatureBoard {
    let (used, unused) = FEATURES
        .iter()
        .copied()
        .partition(|f| state.is_feature_used(f.id));
    FeatureBoard { used, unused }
}

/// Record `feature_id` as used. Already-used ids leave the state as it is.
pub fn mark_feature_used(state: &AppState, feature_id: &str) -> AppState {
    if state.is_feature_used(feature_id) {
        return state.clone();
    }
    let mut used_features = state.used_features.clone();
    used_features.push(feature_id.to_string());
    AppState {
        used_features,
        ..state.clone()
    }
}
