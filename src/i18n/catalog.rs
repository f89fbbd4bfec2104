//! Message catalogs: localized user-facing strings, one catalog per locale.
//!
//! Catalogs are flat key-to-string tables declared as static data. A missing
//! catalog (or a missing key) for a *supported* locale is a configuration
//! error and aborts startup; it is a different failure class from an
//! unsupported locale candidate, which silently falls back to the default.

use crate::i18n::{Locale, LocaleRegistry};
use thiserror::Error;

/// A flat mapping from message key to localized string for one locale.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    /// ISO 639-1 code of the locale this catalog serves
    locale_code: &'static str,

    /// Ordered (key, message) pairs
    entries: &'static [(&'static str, &'static str)],
}

impl MessageCatalog {
    /// Look up a message by key.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, message)| *message)
    }

    /// The locale code this catalog serves.
    pub fn locale_code(&self) -> &'static str {
        self.locale_code
    }

    /// All keys in this catalog.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// All (key, message) pairs, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}

/// Catalog configuration failure.
///
/// These are startup-fatal: every locale in the registry must ship a complete
/// catalog, so a gap here means the build is misconfigured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A supported locale has no catalog at all.
    #[error("no message catalog registered for supported locale \"{locale}\"")]
    MissingCatalog { locale: String },

    /// A supported locale's catalog lacks a key the default catalog has.
    #[error("message catalog for locale \"{locale}\" is missing key \"{key}\"")]
    MissingKey { locale: String, key: String },
}

/// English catalog (default locale).
const ENGLISH_CATALOG: MessageCatalog = MessageCatalog {
    locale_code: "en",
    entries: &[
        ("app.title", "Farmstead"),
        ("nav.dashboard", "Dashboard"),
        ("nav.fields", "Fields"),
        ("nav.livestock", "Livestock"),
        ("nav.account_settings", "Account settings"),
        ("fields.form.name", "Field name"),
        ("fields.form.size_hectares", "Size (hectares)"),
        ("fields.form.soil_type", "Soil type"),
        ("fields.form.irrigation_type", "Irrigation type"),
        ("livestock.form.type", "Livestock type"),
        ("livestock.form.breed", "Breed"),
        ("livestock.form.quantity", "Quantity"),
        ("users.form.name", "Full name"),
        ("users.form.email", "Email address"),
        ("users.form.role", "Role"),
        ("users.form.language", "Preferred language"),
        ("form.notes", "Notes"),
        ("validation.headline", "Please correct the highlighted fields"),
        (
            "notifications.prompt",
            "Enable notifications to stay on top of your farm while you're away",
        ),
    ],
};

/// French catalog.
const FRENCH_CATALOG: MessageCatalog = MessageCatalog {
    locale_code: "fr",
    entries: &[
        ("app.title", "Farmstead"),
        ("nav.dashboard", "Tableau de bord"),
        ("nav.fields", "Parcelles"),
        ("nav.livestock", "Élevage"),
        ("nav.account_settings", "Paramètres du compte"),
        ("fields.form.name", "Nom de la parcelle"),
        ("fields.form.size_hectares", "Superficie (hectares)"),
        ("fields.form.soil_type", "Type de sol"),
        ("fields.form.irrigation_type", "Type d'irrigation"),
        ("livestock.form.type", "Type d'élevage"),
        ("livestock.form.breed", "Race"),
        ("livestock.form.quantity", "Quantité"),
        ("users.form.name", "Nom complet"),
        ("users.form.email", "Adresse e-mail"),
        ("users.form.role", "Rôle"),
        ("users.form.language", "Langue préférée"),
        ("form.notes", "Remarques"),
        ("validation.headline", "Veuillez corriger les champs signalés"),
        (
            "notifications.prompt",
            "Activez les notifications pour suivre votre ferme à distance",
        ),
    ],
};

/// All registered catalogs.
const CATALOGS: &[MessageCatalog] = &[ENGLISH_CATALOG, FRENCH_CATALOG];

/// Look up the catalog for a locale code, if one is registered.
fn catalog_for(code: &str) -> Option<&'static MessageCatalog> {
    CATALOGS
        .iter()
        .find(|catalog| catalog.locale_code == code)
}

/// Get the message catalog for a resolved locale.
///
/// # Panics
/// Panics if no catalog is registered for the locale. `verify_catalogs()` at
/// startup guarantees this cannot happen for a properly resolved `Locale`.
pub fn catalog(locale: Locale) -> &'static MessageCatalog {
    catalog_for(locale.code()).expect("catalog verified at startup for every supported locale")
}

/// Verify that every supported locale ships a complete catalog.
///
/// Completeness is measured against the default locale's catalog: every key
/// it defines must be present in every other catalog. Run once at startup;
/// a failure here aborts initialization.
pub fn verify_catalogs() -> Result<(), CatalogError> {
    let registry = LocaleRegistry::get();
    let default_catalog = catalog_for(registry.default_locale().code).ok_or_else(|| {
        CatalogError::MissingCatalog {
            locale: registry.default_locale().code.to_string(),
        }
    })?;

    for locale in registry.list() {
        let catalog = catalog_for(locale.code).ok_or_else(|| CatalogError::MissingCatalog {
            locale: locale.code.to_string(),
        })?;
        verify_completeness(default_catalog, catalog)?;
    }

    Ok(())
}

/// Check that `catalog` defines every key the reference catalog defines.
fn verify_completeness(
    reference: &MessageCatalog,
    catalog: &MessageCatalog,
) -> Result<(), CatalogError> {
    for key in reference.keys() {
        if catalog.get(key).is_none() {
            return Err(CatalogError::MissingKey {
                locale: catalog.locale_code.to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let english = catalog(Locale::ENGLISH);
        assert_eq!(english.get("nav.dashboard"), Some("Dashboard"));

        let french = catalog(Locale::FRENCH);
        assert_eq!(french.get("nav.dashboard"), Some("Tableau de bord"));
    }

    #[test]
    fn test_catalog_unknown_key() {
        let english = catalog(Locale::ENGLISH);
        assert_eq!(english.get("nav.spaceport"), None);
    }

    #[test]
    fn test_shipped_catalogs_are_complete() {
        verify_catalogs().expect("every supported locale should have a complete catalog");
    }

    #[test]
    fn test_verify_completeness_detects_missing_key() {
        let reference = MessageCatalog {
            locale_code: "en",
            entries: &[("greeting", "Hello"), ("farewell", "Goodbye")],
        };
        let incomplete = MessageCatalog {
            locale_code: "fr",
            entries: &[("greeting", "Bonjour")],
        };

        let err = verify_completeness(&reference, &incomplete)
            .expect_err("missing key should be detected");
        assert_eq!(
            err,
            CatalogError::MissingKey {
                locale: "fr".to_string(),
                key: "farewell".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_catalog_error_message() {
        let err = CatalogError::MissingCatalog {
            locale: "fr".to_string(),
        };
        assert!(err.to_string().contains("fr"));
        assert!(err.to_string().contains("no message catalog"));
    }
}
