//! User resource contract: application accounts and their profile settings.

use crate::i18n::Locale;
use crate::schema::{FieldDef, FieldType, ResourceSchema, ValidationErrors};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// The closed set of account roles.
pub const ROLES: &[&str] = &["admin", "manager", "worker", "viewer"];

/// The closed set of summary languages a user may pick. Must stay in step
/// with the locale registry; a test enforces that.
pub const LANGUAGES: &[&str] = &["en", "fr"];

/// Create contract for the User resource.
///
/// `email` is the identity key: required here, structurally absent from the
/// derived update contract.
pub fn create_schema() -> &'static ResourceSchema {
    static SCHEMA: OnceLock<ResourceSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        ResourceSchema::new(
            "user",
            vec![
                FieldDef {
                    name: "email",
                    field_type: FieldType::Email { max: 255 },
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
                    name: "role",
                    field_type: FieldType::Enumerated {
                        allowed: ROLES,
                        default: Some("viewer"),
                    },
                    required: false,
                    immutable: false,
                },
                FieldDef {
                    name: "avatarUrl",
                    field_type: FieldType::Url,
                    required: false,
                    immutable: false,
                },
                FieldDef {
                    name: "phone",
                    field_type: FieldType::Text {
                        max: Some(50),
                        non_empty: false,
                    },
                    required: false,
                    immutable: false,
                },
                FieldDef {
                    name: "language",
                    field_type: FieldType::Enumerated {
                        allowed: LANGUAGES,
                        default: Some("en"),
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

/// An account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Worker,
    Viewer,
}

/// Typed view of a validated User create payload. `role` and `language`
/// always carry a value here: the declared defaults fill in omissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub language: Locale,
}

impl NewUser {
    /// Validate a raw create payload and type the normalized result.
    pub fn from_payload(raw: &Value) -> Result<Self, ValidationErrors> {
        let normalized = validate_create(raw)?;
        Ok(serde_json::from_value(Value::Object(normalized))
            .expect("normalized payload matches the typed view"))
    }
}

/// Typed view of a validated User update payload. No defaults apply here;
/// an omitted field means "leave unchanged" and `email` cannot appear at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Locale>,
}

impl UserPatch {
    /// Validate a raw update payload and type the normalized result.
    pub fn from_payload(raw: &Value) -> Result<Self, ValidationErrors> {
        let normalized = validate_update(raw)?;
        Ok(serde_json::from_value(Value::Object(normalized))
            .expect("normalized payload matches the typed view"))
    }
}
