// file: src/config.rs
// description: gateway configuration management with toml and environment support
// reference: https://docs.rs/config

use crate::error::{GatewayError, Result};
use dotenvy::dotenv;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "DOCUMENT_GATEWAY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub gateway: GatewayConfig,
}

/// Connection settings for one backend. Each client owns its own copy, so
/// several independently configured clients can live in one process.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GatewayConfig {
    pub base_url: String,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Parses `base_url`, accepting only absolute http(s) URLs.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(self.base_url.trim()).map_err(|e| {
            GatewayError::Config(format!("invalid base_url '{}': {}", self.base_url, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(GatewayError::Config(format!(
                "base_url must use http or https, got '{}'",
                other
            ))),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            gateway: GatewayConfig::new("http://localhost:8000"),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.gateway.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.gateway.parsed_base_url().map(|_| ())
    }
}
