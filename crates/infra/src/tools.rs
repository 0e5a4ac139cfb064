//! JSON tool-call adapter for an external assistant.
//!
//! Each tool takes a JSON argument object (camelCase fields) and maps it onto
//! exactly one [`WarehouseService`] operation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use depot_core::DomainError;
use depot_events::ChangeNotifier;
use depot_inventory::{AddGood, CreateCategorySet, SetCategoryAssignments};

use crate::service::WarehouseService;
use crate::storage::StateStorage;
use crate::store::Snapshot;

pub const APP_DATA: &str = "warehouseAppData";
pub const ADD_GOOD: &str = "warehouseAddGood";
pub const CREATE_CATEGORY_SET: &str = "warehouseCreateCategorySet";
pub const SET_CATEGORY_ASSIGNMENTS: &str = "warehouseSetCategoryAssignments";
pub const MARK_FEATURE_USED: &str = "warehouseMarkFeatureUsed";

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: &'static str, message: String },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to encode tool result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ToolError {
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::UnknownTool(_) => "unknown_tool",
            ToolError::InvalidArguments { .. } => "invalid_arguments",
            ToolError::Domain(err) => err.code(),
            ToolError::Encode(_) => "internal_error",
        }
    }

    /// `{ "error": <code>, "message": <text> }`, plus `details` for capacity
    /// failures.
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        if let ToolError::Domain(DomainError::CapacityExceeded(details)) = self {
            body["details"] = json!(details);
        }
        body
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Registration metadata for every tool [`call_tool`] understands.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: APP_DATA,
            description: "Get the current warehouse app data: warehouses, goods, category sets, and which features have been used",
            input_schema: json!({ "type": "object", "properties": {} }),
        },
        ToolDefinition {
            name: ADD_GOOD,
            description: "Add a good to a warehouse. Enforces the max capacity of 1,000,000kg per warehouse.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "warehouseId": { "type": "string" },
                    "name": { "type": "string" },
                    "quantity": { "type": "number" },
                    "unitWeightKg": { "type": "number" },
                    "expiryDate": { "type": "string", "pattern": "^[0-9]{4}-[0-9]{2}-[0-9]{2}$" },
                    "tickets": { "type": "number" }
                },
                "required": ["warehouseId", "name", "quantity", "unitWeightKg", "expiryDate"]
            }),
        },
        ToolDefinition {
            name: CREATE_CATEGORY_SET,
            description: "Create a goods category set (1-3 categories). Example categories: Electronic, Not electronic.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "categories": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1,
                        "maxItems": 3
                    }
                },
                "required": ["name", "categories"]
            }),
        },
        ToolDefinition {
            name: SET_CATEGORY_ASSIGNMENTS,
            description: "Assign goods to categories for a category set. Each assignment is a goodId -> category.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "categorySetId": { "type": "string" },
                    "assignments": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "goodId": { "type": "string" },
                                "category": { "type": "string" }
                            },
                            "required": ["goodId", "category"]
                        }
                    }
                },
                "required": ["categorySetId", "assignments"]
            }),
        },
        ToolDefinition {
            name: MARK_FEATURE_USED,
            description: "Record that a feature of the app has been used.",
            input_schema: json!({
                "type": "object",
                "properties": { "featureId": { "type": "string" } },
                "required": ["featureId"]
            }),
        },
    ]
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkFeatureArgs {
    feature_id: String,
}

fn parse_args<T: DeserializeOwned>(tool: &'static str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments {
        tool,
        message: e.to_string(),
    })
}

/// Invoke tool `name` with a JSON argument object and return its JSON result.
pub fn call_tool<S, N>(
    service: &WarehouseService<S, N>,
    name: &str,
    args: Value,
) -> Result<Value, ToolError>
where
    S: StateStorage,
    N: ChangeNotifier<Snapshot>,
{
    tracing::debug!(tool = name, "tool call");

    let result = dispatch(service, name, args);
    if let Err(err) = &result {
        tracing::debug!(tool = name, code = err.code(), error = %err, "tool call failed");
    }
    result
}

fn dispatch<S, N>(
    service: &WarehouseService<S, N>,
    name: &str,
    args: Value,
) -> Result<Value, ToolError>
where
    S: StateStorage,
    N: ChangeNotifier<Snapshot>,
{
    let value = match name {
        APP_DATA => serde_json::to_value(service.snapshot())?,
        ADD_GOOD => {
            let cmd: AddGood = parse_args(ADD_GOOD, args)?;
            serde_json::to_value(service.add_good(&cmd)?)?
        }
        CREATE_CATEGORY_SET => {
            let cmd: CreateCategorySet = parse_args(CREATE_CATEGORY_SET, args)?;
            serde_json::to_value(service.create_category_set(&cmd)?)?
        }
        SET_CATEGORY_ASSIGNMENTS => {
            let cmd: SetCategoryAssignments = parse_args(SET_CATEGORY_ASSIGNMENTS, args)?;
            serde_json::to_value(service.set_category_assignments(&cmd)?)?
        }
        MARK_FEATURE_USED => {
            let MarkFeatureArgs { feature_id } = parse_args(MARK_FEATURE_USED, args)?;
            let state = service.mark_feature_used(&feature_id);
            json!({ "usedFeatures": state.used_features })
        }
        other => return Err(ToolError::UnknownTool(other.to_string())),
    };
    Ok(value)
}
