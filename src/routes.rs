//! Session routing contract: the static table of account-lifecycle routes.
//!
//! The table is loaded once at process start and handed verbatim to the
//! external identity provider. The application itself never branches on
//! these paths; it only supplies them. A malformed table is a configuration
//! error and aborts initialization.

use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Mapping from account-lifecycle action to route path.
///
/// `after_sign_in` and `after_sign_up` currently point at the same path but
/// stay independent entries so the destinations can diverge without a wire
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMap {
    pub home: String,
    pub handler: String,
    pub sign_in: String,
    pub sign_up: String,
    pub after_sign_in: String,
    pub after_sign_up: String,
    pub sign_out: String,
    pub account_settings: String,
}

impl Default for RouteMap {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
            handler: "/handler".to_string(),
            sign_in: "/handler/sign-in".to_string(),
            sign_up: "/handler/sign-up".to_string(),
            after_sign_in: "/dashboard".to_string(),
            after_sign_up: "/dashboard".to_string(),
            sign_out: "/".to_string(),
            account_settings: "/handler/account-settings".to_string(),
        }
    }
}

/// Malformed route table entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("route \"{name}\" has malformed path \"{path}\": paths must start with '/'")]
pub struct RouteMapError {
    pub name: &'static str,
    pub path: String,
}

impl RouteMap {
    /// All entries as (action, path) pairs, in table order.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("home", self.home.as_str()),
            ("handler", self.handler.as_str()),
            ("signIn", self.sign_in.as_str()),
            ("signUp", self.sign_up.as_str()),
            ("afterSignIn", self.after_sign_in.as_str()),
            ("afterSignUp", self.after_sign_up.as_str()),
            ("signOut", self.sign_out.as_str()),
            ("accountSettings", self.account_settings.as_str()),
        ]
    }

    /// Check every entry is a rooted path.
    pub fn validate(&self) -> Result<(), RouteMapError> {
        for (name, path) in self.entries() {
            if !path.starts_with('/') {
                return Err(RouteMapError {
                    name,
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Global route table (initialized once at startup)
static ROUTES: OnceLock<RouteMap> = OnceLock::new();

/// Validate and install the route table. Called once at startup; a malformed
/// table aborts initialization.
pub fn init() -> Result<&'static RouteMap, RouteMapError> {
    let table = RouteMap::default();
    table.validate()?;
    Ok(ROUTES.get_or_init(|| table))
}

/// Get the installed route table.
pub fn routes() -> &'static RouteMap {
    ROUTES.get_or_init(RouteMap::default)
}
