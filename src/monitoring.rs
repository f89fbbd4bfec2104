//! Monitoring bootstrap: strategy selection keyed by the execution context.
//!
//! The runtime mode is resolved once at process start (from configuration)
//! and picks which tracing subscriber gets installed. It is never re-checked
//! per request.

use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Execution context the process runs in.
///
/// `Server` is the full runtime; `Edge` is the constrained context where the
/// leaner bootstrap applies. Absent configuration means `Server`, so tests
/// need no environment at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    #[default]
    Server,
    Edge,
}

/// Unrecognized runtime-mode value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized runtime mode \"{0}\" (expected \"server\" or \"edge\")")]
pub struct ParseRuntimeModeError(pub String);

impl FromStr for RuntimeMode {
    type Err = ParseRuntimeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "server" => Ok(RuntimeMode::Server),
            "edge" => Ok(RuntimeMode::Edge),
            _ => Err(ParseRuntimeModeError(s.to_string())),
        }
    }
}

/// Install the tracing subscriber for the selected execution context.
///
/// The full server runtime gets the standard fmt subscriber; the edge
/// context gets the compact, timestamp-free variant. Repeat calls (as happen
/// across tests sharing a process) are no-ops.
pub fn init(mode: RuntimeMode) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("farmstead_api=info"));

    let _ = match mode {
        RuntimeMode::Server => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
        RuntimeMode::Edge => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .without_time()
            .try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("server".parse::<RuntimeMode>(), Ok(RuntimeMode::Server));
        assert_eq!("edge".parse::<RuntimeMode>(), Ok(RuntimeMode::Edge));
        assert_eq!("EDGE".parse::<RuntimeMode>(), Ok(RuntimeMode::Edge));
        assert_eq!("Server".parse::<RuntimeMode>(), Ok(RuntimeMode::Server));
    }

    #[test]
    fn test_parse_unknown_mode() {
        let err = "lambda".parse::<RuntimeMode>().expect_err("should fail");
        assert!(err.to_string().contains("lambda"));
    }

    #[test]
    fn test_default_is_server() {
        assert_eq!(RuntimeMode::default(), RuntimeMode::Server);
    }

    #[test]
    fn test_init_is_repeatable() {
        init(RuntimeMode::Server);
        init(RuntimeMode::Edge);
    }
}
