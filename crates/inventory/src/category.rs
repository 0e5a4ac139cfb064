use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use depot_core::{CategorySetId, DomainError, DomainResult, Entity, GoodId};

use crate::state::AppState;

/// A category set holds at most this many labels.
pub const MAX_CATEGORIES_PER_SET: usize = 3;

/// Named, fixed list of 1–3 mutually exclusive classification labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsCategorySet {
    pub id: CategorySetId,
    pub name: String,
    pub categories: Vec<String>,
}

impl GoodsCategorySet {
    /// The stored (exact-case) category matching `raw` case-insensitively.
    pub fn resolve_category(&self, raw: &str) -> Option<&str> {
        let wanted = raw.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.to_lowercase() == wanted)
            .map(String::as_str)
    }
}

impl Entity for GoodsCategorySet {
    type Id = CategorySetId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: create a category set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategorySet {
    pub name: String,
    pub categories: Vec<String>,
}

impl CreateCategorySet {
    /// Build the new set (fresh id) from trimmed, de-blanked, unique labels.
    pub fn validate(&self) -> DomainResult<GoodsCategorySet> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("category set name is required"));
        }

        let categories: Vec<String> = self
            .categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        if categories.is_empty() || categories.len() > MAX_CATEGORIES_PER_SET {
            return Err(DomainError::validation(format!(
                "you must provide between 1 and {MAX_CATEGORIES_PER_SET} categories"
            )));
        }

        let mut seen = HashSet::new();
        if !categories.iter().all(|c| seen.insert(c.to_lowercase())) {
            return Err(DomainError::validation("categories must be unique"));
        }

        Ok(GoodsCategorySet {
            id: CategorySetId::generate(),
            name: name.to_string(),
            categories,
        })
    }
}

/// Append a validated set.
pub fn add_category_set(state: &AppState, set: GoodsCategorySet) -> AppState {
    let mut goods_category_sets = state.goods_category_sets.clone();
    goods_category_sets.push(set);
    AppState {
        goods_category_sets,
        ..state.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAssignment {
    pub good_id: GoodId,
    pub category: String,
}

/// Command: assign goods to categories of one set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCategoryAssignments {
    pub category_set_id: CategorySetId,
    pub assignments: Vec<CategoryAssignment>,
}

/// Apply a batch of assignments to one category set.
///
/// - unknown set: `NotFound`
/// - unknown good id: the pair is skipped
/// - category not in the set: the whole batch fails, nothing is applied
///
/// Stored values keep the caller's casing once they match one of the set's
/// labels case-insensitively. Assignments for goods not in the batch are kept.
pub fn assign_categories(state: &AppState, cmd: &SetCategoryAssignments) -> DomainResult<AppState> {
    let set = state
        .category_set(&cmd.category_set_id)
        .ok_or_else(|| DomainError::not_found("category set", cmd.category_set_id.as_str()))?;

    let mut for_set = state
        .assignments_for(&set.id)
        .cloned()
        .unwrap_or_default();

    for assignment in &cmd.assignments {
        if state.good(&assignment.good_id).is_none() {
            continue;
        }
        set.resolve_category(&assignment.category).ok_or_else(|| {
            DomainError::validation(format!(
                "category must be one of: {}",
                set.categories.join(", ")
            ))
        })?;
        for_set.insert(assignment.good_id.clone(), assignment.category.clone());
    }

    let mut goods_category_assignments = state.goods_category_assignments.clone();
    goods_category_assignments.insert(set.id.clone(), for_set);
    Ok(AppState {
        goods_category_assignments,
        ..state.clone()
    })
}

/// Number of goods currently assigned within one set.
pub fn assignment_count(state: &AppState, set_id: &CategorySetId) -> usize {
    state.assignments_for(set_id).map_or(0, |m| m.len())
}
