//! Locale type: Flexible, validated locale representation.
//!
//! This module provides the `Locale` type, which validates candidate codes
//! against the registry and carries the fallback policy: any candidate outside
//! the supported set resolves to the default locale, never to an error.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize, Serializer};
use std::future::Future;

/// A resolved locale.
///
/// This type represents a locale that has been validated against the registry.
/// Downstream code can rely on a `Locale` always being a member of the
/// supported set; there is no "unknown" variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// ISO 639-1 language code (e.g., "en", "fr")
    code: &'static str,
}

impl Locale {
    /// English locale (the default).
    pub const ENGLISH: Locale = Locale { code: "en" };

    /// French locale.
    pub const FRENCH: Locale = Locale { code: "fr" };

    /// Create a Locale from a language code string.
    ///
    /// # Arguments
    /// * `code` - The ISO 639-1 language code (e.g., "en", "fr")
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code names a supported locale
    /// * `Err` if the code is not supported
    pub fn from_code(code: &str) -> Result<Locale> {
        let registry = LocaleRegistry::get();

        match registry.get_by_code(code) {
            Some(config) => Ok(Locale {
                code: config.code, // Use the static str from the registry
            }),
            None => bail!("Unsupported locale code: '{}'", code),
        }
    }

    /// Get the default locale.
    ///
    /// This is the locale every unsupported or absent candidate falls back to.
    pub fn default_locale() -> Locale {
        let config = LocaleRegistry::get().default_locale();
        Locale { code: config.code }
    }

    /// Resolve a candidate code to a supported locale.
    ///
    /// An absent candidate or one outside the supported set resolves to the
    /// default locale. This is the expected fallback path, not an error, so
    /// it is handled silently.
    ///
    /// # Arguments
    /// * `candidate` - The requested locale code, if any
    ///
    /// # Returns
    /// A member of the supported set, always.
    pub fn resolve(candidate: Option<&str>) -> Locale {
        candidate
            .and_then(|code| Locale::from_code(code).ok())
            .unwrap_or_else(Locale::default_locale)
    }

    /// Resolve a candidate produced by an asynchronous upstream source.
    ///
    /// The source is awaited exactly once; there is no retry and no racing of
    /// multiple candidates. From the caller's perspective the resolution
    /// itself is synchronous once the candidate is in hand.
    pub async fn resolve_from<S>(source: S) -> Locale
    where
        S: Future<Output = Option<String>>,
    {
        let candidate = source.await;
        Locale::resolve(candidate.as_deref())
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the locale code is not found in the registry. This should
    /// never happen if the Locale was constructed properly (via `resolve`,
    /// `from_code` or constants).
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    /// Get the English name of the locale.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the locale.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the default locale.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for Locale {
    /// Strict deserialization: an unsupported code is an error, not a
    /// fallback. Fallback belongs to `resolve`, which callers use on raw
    /// request candidates before a `Locale` ever exists.
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Locale::from_code(&code)
            .map_err(|_| D::Error::custom(format!("unsupported locale code \"{code}\"")))
    }
}
