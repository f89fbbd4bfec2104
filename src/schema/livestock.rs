//! Livestock resource contract: animal groups kept on a farm.

use crate::schema::{FieldDef, FieldType, ResourceSchema, ValidationErrors};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;
use uuid::Uuid;

/// The closed set of supported livestock types.
pub const LIVESTOCK_TYPES: &[&str] = &["chickens", "guinea_fowl", "ducks", "sheep", "pigs"];

/// Create contract for the Livestock resource.
pub fn create_schema() -> &'static ResourceSchema {
    static SCHEMA: OnceLock<ResourceSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        ResourceSchema::new(
            "livestock",
            vec![
                FieldDef {
                    name: "farmId",
                    field_type: FieldType::Uuid,
                    required: true,
                    immutable: true,
                },
                FieldDef {
                    name: "livestockType",
                    field_type: FieldType::Enumerated {
                        allowed: LIVESTOCK_TYPES,
                        default: None,
                    },
                    required: true,
                    immutable: false,
                },
                FieldDef {
                    name: "breed",
                    field_type: FieldType::Text {
                        max: Some(100),
                        non_empty: false,
                    },
                    required: false,
                    immutable: false,
                },
                FieldDef {
                    name: "quantity",
                    field_type: FieldType::Count,
                    required: true,
                    immutable: false,
                },
                FieldDef {
                    name: "notes",
                    field_type: FieldType::Text {
                        max: None,
                        non_empty: false,
                    },
                    required: false,
                    immutable: false,
                },
            ],
        )
    })
}

/// Update contract, derived from the create contract.
pub fn update_schema() -> &'static ResourceSchema {
    static SCHEMA: OnceLock<ResourceSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| create_schema().update_contract())
}

/// Validate and normalize a raw create payload.
pub fn validate_create(raw: &Value) -> Result<Map<String, Value>, ValidationErrors> {
    create_schema().validate(raw)
}

/// Validate and normalize a raw update payload.
pub fn validate_update(raw: &Value) -> Result<Map<String, Value>, ValidationErrors> {
    update_schema().validate(raw)
}

/// A supported livestock type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivestockType {
    Chickens,
    GuineaFowl,
    Ducks,
    Sheep,
    Pigs,
}

/// Typed view of a validated Livestock create payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLivestock {
    pub farm_id: Uuid,
    pub livestock_type: LivestockType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    pub quantity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewLivestock {
    /// Validate a raw create payload and type the normalized result.
    pub fn from_payload(raw: &Value) -> Result<Self, ValidationErrors> {
        let normalized = validate_create(raw)?;
        Ok(serde_json::from_value(Value::Object(normalized))
            .expect("normalized payload matches the typed view"))
    }
}

/// Typed view of a validated Livestock update payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivestockPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub livestock_type: Option<LivestockType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LivestockPatch {
    /// Validate a raw update payload and type the normalized result.
    pub fn from_payload(raw: &Value) -> Result<Self, ValidationErrors> {
        let normalized = validate_update(raw)?;
        Ok(serde_json::from_value(Value::Object(normalized))
            .expect("normalized payload matches the typed view"))
    }
}
