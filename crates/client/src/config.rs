use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub tenant: TenantConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; an expired request fails like a network error
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct TenantConfig {
    /// Tenant name exchanged for an id at login
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SessionConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_ms() -> u32 {
    5000
}

fn default_refresh_interval() -> u64 {
    300
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:8000/api"
timeout_ms = 5000

[session]
refresh_interval_secs = 300
"#;

pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Parse the given configuration text, falling back to the embedded default.
pub fn load_config(text: Option<&str>) -> Config {
    if let Some(text) = text {
        match parse_config(text) {
            Ok(config) => return config,
            Err(e) => log::warn!("{}; using default configuration", e),
        }
    }
    log::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_ms, 5000);
        assert_eq!(config.session.refresh_interval_secs, 300);
        assert_eq!(config.tenant.name, None);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
            [tenant]
            name = "textil norte"
            "#,
        )
        .unwrap();
        assert_eq!(config.tenant.name.as_deref(), Some("textil norte"));
        assert_eq!(config.api.timeout_ms, 5000);
    }

    #[test]
    fn test_broken_config_falls_back() {
        let config = load_config(Some("[api\nbase_url = 1"));
        assert_eq!(config, parse_config(DEFAULT_CONFIG).unwrap());
    }
}
