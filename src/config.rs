use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{ReqresError, Result};

pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CONTENT_TYPE: &str = "text/json";

const BASE_URL_ENV: &str = "REQRES_BASE_URL";

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub content_type: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| ReqresError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| ReqresError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "reqres")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(ReqresError::NoConfigDir)
    }

    /// Build the endpoint configuration, with `REQRES_BASE_URL` taking
    /// precedence over the config file and `timeout_override` over
    /// `timeout_secs`.
    pub fn endpoint(&self, timeout_override: Option<u64>) -> Result<EndpointConfig> {
        self.endpoint_with(std::env::var(BASE_URL_ENV).ok(), timeout_override)
    }

    fn endpoint_with(
        &self,
        env_base_url: Option<String>,
        timeout_override: Option<u64>,
    ) -> Result<EndpointConfig> {
        let raw = env_base_url
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw).map_err(|e| ReqresError::InvalidBaseUrl {
            url: raw.clone(),
            source: e,
        })?;

        let mut endpoint = EndpointConfig::new(base_url);
        if let Some(secs) = timeout_override.or(self.timeout_secs) {
            endpoint.timeout = Duration::from_secs(secs);
        }
        if let Some(content_type) = &self.content_type {
            endpoint.content_type = content_type.clone();
        }
        Ok(endpoint)
    }
}

/// Per-call request settings shared by every service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub content_type: String,
}

impl EndpointConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}
