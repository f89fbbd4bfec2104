//! Internationalization (i18n) module for locale-aware request handling.
//!
//! This module provides a centralized architecture for resolving the locale of
//! an incoming request and loading the matching message catalog. All
//! locale-related logic and localized strings live here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales and their metadata
//! - `locale`: Validated Locale type with the fallback policy built in
//! - `catalog`: Static per-locale message catalogs with startup verification
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{catalog, Locale};
//!
//! // Resolve a request's candidate (falls back to English)
//! let locale = Locale::resolve(Some("fr"));
//!
//! // Load the matching catalog
//! let strings = catalog(locale);
//! ```

mod catalog;
mod locale;
mod registry;

pub use catalog::{catalog, verify_catalogs, CatalogError, MessageCatalog};
pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
