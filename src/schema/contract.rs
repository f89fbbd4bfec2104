//! Declarative resource contract engine.
//!
//! A resource contract is a table of field constraints (`FieldDef`). The same
//! table drives create validation directly and derives the update contract
//! mechanically (`update_contract`), so the two can never drift apart.
//!
//! Validation is pure and synchronous: no I/O, no existence or uniqueness
//! checks. Referential integrity belongs to the persistence collaborator.

use crate::schema::ValidationErrors;
use regex::Regex;
use serde_json::{Map, Number, Value};
use std::sync::OnceLock;
use url::Url;
use uuid::Uuid;

/// Constraint kind for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free-form text with an optional maximum length (in characters).
    /// `non_empty` additionally rejects the empty string whenever the field
    /// is present, on create and update alike.
    Text { max: Option<usize>, non_empty: bool },

    /// Positive decimal number. Numeric strings are coerced before the
    /// positivity check.
    Decimal,

    /// Positive whole number. Numeric strings are coerced before the
    /// integrality and positivity checks.
    Count,

    /// UUID, normalized to canonical hyphenated form.
    Uuid,

    /// Email address with a maximum length.
    Email { max: usize },

    /// Absolute URL.
    Url,

    /// One of a closed set of values. The optional default is applied only
    /// when the field is omitted entirely; a present-but-invalid value is an
    /// error, never silently replaced.
    Enumerated {
        allowed: &'static [&'static str],
        default: Option<&'static str>,
    },
}

impl FieldType {
    /// Default applied when the field is omitted, if one is declared.
    fn default_value(self) -> Option<&'static str> {
        match self {
            FieldType::Enumerated { default, .. } => default,
            _ => None,
        }
    }

    /// The same constraint without any declared default. Update contracts
    /// use this: an omitted field on update means "leave unchanged".
    fn without_default(self) -> FieldType {
        match self {
            FieldType::Enumerated { allowed, .. } => FieldType::Enumerated {
                allowed,
                default: None,
            },
            other => other,
        }
    }
}

/// A single field constraint in a resource contract.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// Payload key, exactly as it appears on the wire (e.g. "farmId")
    pub name: &'static str,

    /// Constraint kind
    pub field_type: FieldType,

    /// Required on create; derived update contracts clear this
    pub required: bool,

    /// Identity/ownership field: accepted on create, structurally removed
    /// from the derived update contract
    pub immutable: bool,
}

/// The paired create/update validation contract for one resource.
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    /// Resource name, for logging
    pub resource: &'static str,

    /// Field constraints, in declaration order
    pub fields: Vec<FieldDef>,
}

impl ResourceSchema {
    /// Create a contract from a field-constraint table.
    pub fn new(resource: &'static str, fields: Vec<FieldDef>) -> Self {
        Self { resource, fields }
    }

    /// Look up a field constraint by payload key.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|def| def.name == name)
    }

    /// Derive the update contract from this (create) contract.
    ///
    /// The derivation is structural: every field becomes optional, declared
    /// defaults are dropped (omission on update means "no change"), and
    /// immutable fields are removed outright. An immutable field supplied in
    /// an update payload is therefore rejected as an unknown field.
    pub fn update_contract(&self) -> ResourceSchema {
        let fields = self
            .fields
            .iter()
            .filter(|def| !def.immutable)
            .map(|def| FieldDef {
                required: false,
                field_type: def.field_type.without_default(),
                ..*def
            })
            .collect();

        ResourceSchema {
            resource: self.resource,
            fields,
        }
    }

    /// Validate a raw payload against this contract.
    ///
    /// Every violation is collected, not just the first: the result is either
    /// the normalized payload (numeric strings coerced, UUIDs canonicalized,
    /// declared defaults applied for omitted fields) or the full error list.
    ///
    /// # Arguments
    /// * `raw` - Arbitrary untyped input; anything other than a JSON object
    ///   fails with a single root-level error
    ///
    /// # Returns
    /// The normalized object, or every violated constraint in declaration
    /// order followed by unknown-key errors.
    pub fn validate(&self, raw: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let Some(object) = raw.as_object() else {
            errors.add("$", "payload must be a JSON object");
            return Err(errors);
        };

        let mut normalized = Map::new();

        for def in &self.fields {
            match object.get(def.name) {
                None | Some(Value::Null) => {
                    if def.required {
                        errors.add(def.name, "is required");
                    } else if let Some(default) = def.field_type.default_value() {
                        normalized
                            .insert(def.name.to_string(), Value::String(default.to_string()));
                    }
                }
                Some(value) => match check_value(def, value) {
                    Ok(coerced) => {
                        normalized.insert(def.name.to_string(), coerced);
                    }
                    Err(message) => errors.add(def.name, message),
                },
            }
        }

        for key in object.keys() {
            if self.field(key).is_none() {
                errors.add(key.as_str(), "unknown field");
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }
}

/// Check one present value against its constraint, returning the normalized
/// value or the message describing the violated constraint.
fn check_value(def: &FieldDef, value: &Value) -> Result<Value, String> {
    match def.field_type {
        FieldType::Text { max, non_empty } => check_text(value, max, non_empty),
        FieldType::Decimal => check_decimal(value),
        FieldType::Count => check_count(value),
        FieldType::Uuid => check_uuid(value),
        FieldType::Email { max } => check_email(value, max),
        FieldType::Url => check_url(value),
        FieldType::Enumerated { allowed, .. } => check_enumerated(value, allowed),
    }
}

fn check_text(value: &Value, max: Option<usize>, non_empty: bool) -> Result<Value, String> {
    let Some(text) = value.as_str() else {
        return Err("must be a string".to_string());
    };
    if non_empty && text.is_empty() {
        return Err("must not be empty".to_string());
    }
    if let Some(max) = max {
        if text.chars().count() > max {
            return Err(format!("must be at most {max} characters"));
        }
    }
    Ok(Value::String(text.to_string()))
}

/// Extract a numeric value, coercing textual numeric input.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn check_decimal(value: &Value) -> Result<Value, String> {
    let Some(number) = numeric(value) else {
        return Err("must be a number".to_string());
    };
    if !number.is_finite() {
        return Err("must be a number".to_string());
    }
    if number <= 0.0 {
        return Err("must be greater than zero".to_string());
    }
    match Number::from_f64(number) {
        Some(normalized) => Ok(Value::Number(normalized)),
        None => Err("must be a number".to_string()),
    }
}

/// Largest count accepted: the biggest integer an f64 represents exactly.
/// Beyond this the integrality check is meaningless and the cast is lossy.
const MAX_COUNT: f64 = 9_007_199_254_740_992.0; // 2^53

fn check_count(value: &Value) -> Result<Value, String> {
    let Some(number) = numeric(value) else {
        return Err("must be a number".to_string());
    };
    if !number.is_finite() {
        return Err("must be a number".to_string());
    }
    if number.fract() != 0.0 {
        return Err("must be a whole number".to_string());
    }
    if number <= 0.0 {
        return Err("must be greater than zero".to_string());
    }
    if number > MAX_COUNT {
        return Err("is too large".to_string());
    }
    Ok(Value::Number(Number::from(number as i64)))
}

fn check_uuid(value: &Value) -> Result<Value, String> {
    let Some(text) = value.as_str() else {
        return Err("must be a string".to_string());
    };
    match Uuid::parse_str(text) {
        Ok(uuid) => Ok(Value::String(uuid.to_string())),
        Err(_) => Err("must be a valid UUID".to_string()),
    }
}

// Cached regex for email checks
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"))
}

fn check_email(value: &Value, max: usize) -> Result<Value, String> {
    let Some(text) = value.as_str() else {
        return Err("must be a string".to_string());
    };
    if text.chars().count() > max {
        return Err(format!("must be at most {max} characters"));
    }
    if !email_regex().is_match(text) {
        return Err("must be a valid email address".to_string());
    }
    Ok(Value::String(text.to_string()))
}

fn check_url(value: &Value) -> Result<Value, String> {
    let Some(text) = value.as_str() else {
        return Err("must be a string".to_string());
    };
    match Url::parse(text) {
        Ok(_) => Ok(Value::String(text.to_string())),
        Err(_) => Err("must be a valid URL".to_string()),
    }
}

fn check_enumerated(value: &Value, allowed: &'static [&'static str]) -> Result<Value, String> {
    let Some(text) = value.as_str() else {
        return Err(format!("must be one of: {}", allowed.join(", ")));
    };
    if allowed.contains(&text) {
        Ok(Value::String(text.to_string()))
    } else {
        Err(format!(
            "\"{}\" is not one of: {}",
            text,
            allowed.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==================== Test Helpers ====================

    /// A contract exercising one field of every constraint kind.
    fn gadget_schema() -> ResourceSchema {
        ResourceSchema::new(
            "gadget",
            vec![
                FieldDef {
                    name: "ownerId",
                    field_type: FieldType::Uuid,
                    required: true,
                    immutable: true,
                },
                FieldDef {
                    name: "label",
                    field_type: FieldType::Text {
                        max: Some(10),
                        non_empty: true,
                    },
                    required: true,
                    immutable: false,
                },
                FieldDef {
                    name: "weightKg",
                    field_type: FieldType::Decimal,
                    required: true,
                    immutable: false,
                },
                FieldDef {
                    name: "pieces",
                    field_type: FieldType::Count,
                    required: false,
                    immutable: false,
                },
                FieldDef {
                    name: "contact",
                    field_type: FieldType::Email { max: 255 },
                    required: false,
                    immutable: false,
                },
                FieldDef {
                    name: "manualUrl",
                    field_type: FieldType::Url,
                    required: false,
                    immutable: false,
                },
                FieldDef {
                    name: "tier",
                    field_type: FieldType::Enumerated {
                        allowed: &["basic", "pro"],
                        default: Some("basic"),
                    },
                    required: false,
                    immutable: false,
                },
            ],
        )
    }

    fn valid_payload() -> Value {
        json!({
            "ownerId": "9f6c1f1e-3b0a-4d5c-8e7f-2a1b3c4d5e6f",
            "label": "plow",
            "weightKg": "12.5",
        })
    }

    // ==================== Create Validation Tests ====================

    #[test]
    fn test_valid_payload_is_normalized() {
        let normalized = gadget_schema()
            .validate(&valid_payload())
            .expect("payload should validate");

        assert_eq!(normalized["weightKg"], json!(12.5));
        assert_eq!(normalized["tier"], json!("basic"));
        assert_eq!(
            normalized["ownerId"],
            json!("9f6c1f1e-3b0a-4d5c-8e7f-2a1b3c4d5e6f")
        );
    }

    #[test]
    fn test_non_object_payload() {
        let errors = gadget_schema()
            .validate(&json!([1, 2, 3]))
            .expect_err("arrays should be rejected");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "$");
    }

    #[test]
    fn test_all_violations_collected() {
        let payload = json!({
            "ownerId": "not-a-uuid",
            "weightKg": -4,
            "pieces": 2.5,
        });
        let errors = gadget_schema()
            .validate(&payload)
            .expect_err("payload should fail");

        let paths: Vec<_> = errors.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["ownerId", "label", "weightKg", "pieces"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut payload = valid_payload();
        payload["color"] = json!("red");

        let errors = gadget_schema()
            .validate(&payload)
            .expect_err("unknown key should be rejected");
        assert_eq!(errors.errors[0].path, "color");
        assert_eq!(errors.errors[0].message, "unknown field");
    }

    #[test]
    fn test_null_treated_as_omitted() {
        let mut payload = valid_payload();
        payload["pieces"] = json!(null);

        let normalized = gadget_schema()
            .validate(&payload)
            .expect("null optional field should be allowed");
        assert!(!normalized.contains_key("pieces"));
    }

    // ==================== Coercion Tests ====================

    #[test]
    fn test_decimal_coercion_from_string() {
        let mut payload = valid_payload();
        payload["weightKg"] = json!("2.5");
        let normalized = gadget_schema().validate(&payload).expect("should coerce");
        assert_eq!(normalized["weightKg"], json!(2.5));
    }

    #[test]
    fn test_decimal_rejects_non_numeric_string() {
        let mut payload = valid_payload();
        payload["weightKg"] = json!("abc");
        let errors = gadget_schema().validate(&payload).expect_err("should fail");
        assert_eq!(errors.errors[0].message, "must be a number");
    }

    #[test]
    fn test_decimal_rejects_non_positive() {
        for bad in [json!("-1"), json!(0), json!(-2.5)] {
            let mut payload = valid_payload();
            payload["weightKg"] = bad;
            let errors = gadget_schema().validate(&payload).expect_err("should fail");
            assert_eq!(errors.errors[0].message, "must be greater than zero");
        }
    }

    #[test]
    fn test_count_rejects_fractions_and_zero() {
        let mut payload = valid_payload();
        payload["pieces"] = json!(3.5);
        let errors = gadget_schema().validate(&payload).expect_err("should fail");
        assert_eq!(errors.errors[0].message, "must be a whole number");

        payload["pieces"] = json!(0);
        let errors = gadget_schema().validate(&payload).expect_err("should fail");
        assert_eq!(errors.errors[0].message, "must be greater than zero");
    }

    #[test]
    fn test_count_coercion_from_string() {
        let mut payload = valid_payload();
        payload["pieces"] = json!("10");
        let normalized = gadget_schema().validate(&payload).expect("should coerce");
        assert_eq!(normalized["pieces"], json!(10));
    }

    #[test]
    fn test_count_rejects_out_of_range_values() {
        for bad in [json!(1e20), json!("100000000000000000000")] {
            let mut payload = valid_payload();
            payload["pieces"] = bad;
            let errors = gadget_schema().validate(&payload).expect_err("should fail");
            assert_eq!(errors.errors[0].message, "is too large");
        }
    }

    #[test]
    fn test_validation_is_idempotent() {
        let schema = gadget_schema();
        let first = schema
            .validate(&valid_payload())
            .expect("payload should validate");
        let second = schema
            .validate(&Value::Object(first.clone()))
            .expect("normalized payload should re-validate");
        assert_eq!(first, second);
    }

    // ==================== Format Tests ====================

    #[test]
    fn test_uuid_normalized_to_lowercase() {
        let mut payload = valid_payload();
        payload["ownerId"] = json!("9F6C1F1E-3B0A-4D5C-8E7F-2A1B3C4D5E6F");
        let normalized = gadget_schema().validate(&payload).expect("should validate");
        assert_eq!(
            normalized["ownerId"],
            json!("9f6c1f1e-3b0a-4d5c-8e7f-2a1b3c4d5e6f")
        );
    }

    #[test]
    fn test_email_format() {
        let mut payload = valid_payload();
        payload["contact"] = json!("farmer@example.com");
        gadget_schema().validate(&payload).expect("should validate");

        payload["contact"] = json!("not-an-email");
        let errors = gadget_schema().validate(&payload).expect_err("should fail");
        assert_eq!(errors.errors[0].message, "must be a valid email address");
    }

    #[test]
    fn test_url_format() {
        let mut payload = valid_payload();
        payload["manualUrl"] = json!("https://example.com/manual.pdf");
        gadget_schema().validate(&payload).expect("should validate");

        payload["manualUrl"] = json!("not a url");
        let errors = gadget_schema().validate(&payload).expect_err("should fail");
        assert_eq!(errors.errors[0].message, "must be a valid URL");
    }

    #[test]
    fn test_text_max_length() {
        let mut payload = valid_payload();
        payload["label"] = json!("a".repeat(11));
        let errors = gadget_schema().validate(&payload).expect_err("should fail");
        assert_eq!(errors.errors[0].message, "must be at most 10 characters");
    }

    #[test]
    fn test_required_text_rejects_empty() {
        let mut payload = valid_payload();
        payload["label"] = json!("");
        let errors = gadget_schema().validate(&payload).expect_err("should fail");
        assert_eq!(errors.errors[0].message, "must not be empty");
    }

    // ==================== Enumerated Tests ====================

    #[test]
    fn test_enum_accepts_members() {
        for tier in ["basic", "pro"] {
            let mut payload = valid_payload();
            payload["tier"] = json!(tier);
            let normalized = gadget_schema().validate(&payload).expect("should validate");
            assert_eq!(normalized["tier"], json!(tier));
        }
    }

    #[test]
    fn test_enum_rejects_out_of_set_value_naming_it() {
        let mut payload = valid_payload();
        payload["tier"] = json!("deluxe");
        let errors = gadget_schema().validate(&payload).expect_err("should fail");
        assert!(errors.errors[0].message.contains("\"deluxe\""));
        assert!(errors.errors[0].message.contains("basic, pro"));
    }

    #[test]
    fn test_enum_default_applied_only_on_omission() {
        // Omitted: default applied.
        let normalized = gadget_schema()
            .validate(&valid_payload())
            .expect("should validate");
        assert_eq!(normalized["tier"], json!("basic"));

        // Present but invalid: error, default not substituted.
        let mut payload = valid_payload();
        payload["tier"] = json!("deluxe");
        assert!(gadget_schema().validate(&payload).is_err());
    }

    // ==================== Update Derivation Tests ====================

    #[test]
    fn test_update_contract_drops_immutable_fields() {
        let update = gadget_schema().update_contract();
        assert!(update.field("ownerId").is_none());
        assert!(update.field("label").is_some());
    }

    #[test]
    fn test_update_contract_makes_fields_optional() {
        let update = gadget_schema().update_contract();
        assert!(update.fields.iter().all(|def| !def.required));
    }

    #[test]
    fn test_update_contract_drops_defaults() {
        let update = gadget_schema().update_contract();
        let normalized = update
            .validate(&json!({}))
            .expect("empty update should validate");
        assert!(normalized.is_empty());
    }

    #[test]
    fn test_update_rejects_immutable_field_as_unknown() {
        let update = gadget_schema().update_contract();
        let errors = update
            .validate(&json!({"ownerId": "9f6c1f1e-3b0a-4d5c-8e7f-2a1b3c4d5e6f"}))
            .expect_err("immutable field should be rejected");
        assert_eq!(errors.errors[0].path, "ownerId");
        assert_eq!(errors.errors[0].message, "unknown field");
    }

    #[test]
    fn test_update_still_checks_present_values() {
        let update = gadget_schema().update_contract();
        let errors = update
            .validate(&json!({"weightKg": "abc"}))
            .expect_err("present values are still checked");
        assert_eq!(errors.errors[0].path, "weightKg");
    }

    #[test]
    fn test_update_text_still_rejects_empty_string() {
        // Optional means the field may be omitted; a present value is held
        // to the same constraints as on create.
        let update = gadget_schema().update_contract();
        let errors = update
            .validate(&json!({"label": ""}))
            .expect_err("empty label should still be rejected");
        assert_eq!(errors.errors[0].message, "must not be empty");
    }
}
