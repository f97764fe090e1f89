use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cloudflare: CloudflareConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudflareConfig {
    #[serde(default = "default_zone_id")]
    pub zone_id: String,
    #[serde(default = "default_api_token")]
    pub api_token: String,
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_zone_id() -> String {
    env_or("ZONE_ID", "REPLACE_WITH_ZONE_ID")
}

fn default_api_token() -> String {
    env_or("API_TOKEN", "REPLACE_WITH_SCOPED_API_TOKEN")
}

fn default_domain() -> String {
    env_or("DOMAIN_NAME", "taslabs.net")
}

fn default_api_base() -> String {
    "https://api.cloudflare.com/client/v4".to_string()
}

// Environment variable with a literal placeholder fallback
fn env_or(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_string())
}

impl Default for CloudflareConfig {
    fn default() -> Self {
        Self {
            zone_id: default_zone_id(),
            api_token: default_api_token(),
            domain: default_domain(),
            api_base: default_api_base(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Run with pure env/placeholder defaults when no config file exists
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}
