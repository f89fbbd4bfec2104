use crate::monitoring::RuntimeMode;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind: String,
    pub port: u16,

    // Execution context for the monitoring bootstrap
    pub runtime_mode: RuntimeMode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            bind: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Runtime mode - optional, absent means the full server context
            runtime_mode: match std::env::var("RUNTIME_MODE") {
                Ok(value) => value
                    .parse()
                    .with_context(|| format!("invalid RUNTIME_MODE value: {value}"))?,
                Err(_) => RuntimeMode::Server,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("BIND_ADDRESS");
        std::env::remove_var("PORT");
        std::env::remove_var("RUNTIME_MODE");
    }

    #[test]
    #[serial]
    fn test_defaults_when_env_absent() {
        clear_env();
        let config = Config::from_env().expect("defaults should load");
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.runtime_mode, RuntimeMode::Server);
    }

    #[test]
    #[serial]
    fn test_reads_server_settings() {
        clear_env();
        std::env::set_var("BIND_ADDRESS", "127.0.0.1");
        std::env::set_var("PORT", "9090");
        std::env::set_var("RUNTIME_MODE", "edge");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.runtime_mode, RuntimeMode::Edge);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_rejects_unknown_runtime_mode() {
        clear_env();
        std::env::set_var("RUNTIME_MODE", "serverless");

        let err = Config::from_env().expect_err("unknown mode should fail");
        assert!(err.to_string().contains("RUNTIME_MODE"));

        clear_env();
    }
}
