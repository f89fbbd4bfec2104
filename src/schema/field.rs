//! Field resource contract: cultivated land parcels belonging to a farm.

use crate::schema::{FieldDef, FieldType, ResourceSchema, ValidationErrors};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;
use uuid::Uuid;

/// Create contract for the Field resource.
///
/// `farmId` is the ownership field: required here, structurally absent from
/// the derived update contract.
pub fn create_schema() -> &'static ResourceSchema {
    static SCHEMA: OnceLock<ResourceSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        ResourceSchema::new(
            "field",
            vec![
                FieldDef {
                    name: "farmId",
                    field_type: FieldType::Uuid,
                    required: true,
                    immutable: true,
                },
                FieldDef {
                    name: "name",
                    field_type: FieldType::Text {
                        max: Some(255),
                        non_empty: true,
                    },
                    required: true,
                    immutable: false,
                },
                FieldDef {
                    name: "sizeHectares",
                    field_type: FieldType::Decimal,
                    required: true,
                    immutable: false,
                },
                FieldDef {
                    name: "soilType",
                    field_type: FieldType::Text {
                        max: Some(100),
                        non_empty: false,
                    },
                    required: false,
                    immutable: false,
                },
                FieldDef {
                    name: "irrigationType",
                    field_type: FieldType::Text {
                        max: Some(100),
                        non_empty: false,
                    },
                    required: false,
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

/// Typed view of a validated Field create payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewField {
    pub farm_id: Uuid,
    pub name: String,
    pub size_hectares: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irrigation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewField {
    /// Validate a raw create payload and type the normalized result.
    pub fn from_payload(raw: &Value) -> Result<Self, ValidationErrors> {
        let normalized = validate_create(raw)?;
        Ok(serde_json::from_value(Value::Object(normalized))
            .expect("normalized payload matches the typed view"))
    }
}

/// Typed view of a validated Field update payload. Absent fields mean
/// "leave unchanged"; `farmId` cannot appear at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_hectares: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irrigation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FieldPatch {
    /// Validate a raw update payload and type the normalized result.
    pub fn from_payload(raw: &Value) -> Result<Self, ValidationErrors> {
        let normalized = validate_update(raw)?;
        Ok(serde_json::from_value(Value::Object(normalized))
            .expect("normalized payload matches the typed view"))
    }
}
