//! Resource schemas: the validated input boundary for every mutation.
//!
//! Each resource (Field, Livestock, User) declares a create contract as a
//! table of field constraints; the update contract is derived from it
//! mechanically, never written by hand. Validation collects every violation
//! and returns it as data for the caller to surface all at once.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::schema::field;
//!
//! let raw = serde_json::json!({"farmId": id, "name": "North paddock", "sizeHectares": "2.5"});
//! let normalized = field::validate_create(&raw)?;
//! ```

mod contract;
mod error;

pub mod field;
pub mod livestock;
pub mod user;

pub use contract::{FieldDef, FieldType, ResourceSchema};
pub use error::{FieldError, ValidationErrors};
