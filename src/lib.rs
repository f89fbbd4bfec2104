//! Farm management API slice: a validated input boundary for farm resources
//! (fields, livestock, users), locale-aware request handling, and the static
//! account-routing contract consumed by the external identity provider.
//!
//! Validation never touches storage: every mutation payload is checked,
//! coerced and normalized here, and referential or uniqueness integrity is
//! the persistence collaborator's concern.

pub mod config;
pub mod i18n;
pub mod monitoring;
pub mod notify;
pub mod routes;
pub mod schema;
pub mod server;
