//! Configuration system for SuiWorld clients
//!
//! Settings load from a TOML file ([`SuiworldConfig::load`]), from defaults plus
//! the environment ([`SuiworldConfig::from_env`]), or both
//! ([`SuiworldConfig::load_with_env`]: file first, then environment overrides).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data_source::PAGE_LIMIT;
use crate::error::{ConfigError, CoreError, Result};

const DEFAULT_NETWORK: &str = "testnet";
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_WALLET_PATH: &str = "/api/wallet";

/// Full node URL for a named Sui network
pub fn fullnode_url(network: &str) -> String {
    match network {
        "localnet" => "http://127.0.0.1:9000".to_string(),
        other => format!("https://fullnode.{other}.sui.io:443"),
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiworldConfig {
    #[serde(default)]
    pub sui: SuiConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Sui network settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiConfig {
    #[serde(default = "default_network")]
    pub network: String,
    /// Defaults to the public full node of `network`
    #[serde(default)]
    pub rpc_url: String,
    /// Deployed SuiWorld Move package. Carried for transaction building;
    /// the feed reads the board object directly and ignores it.
    #[serde(default)]
    pub package_id: String,
    /// Shared object the messages hang off; empty disables the feed
    #[serde(default)]
    pub message_board_id: String,
}

impl Default for SuiConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            rpc_url: fullnode_url(DEFAULT_NETWORK),
            package_id: String::new(),
            message_board_id: String::new(),
        }
    }
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    #[serde(default = "default_wallet_path")]
    pub wallet_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            wallet_path: default_wallet_path(),
        }
    }
}

impl BackendConfig {
    /// Base URL of the wallet API, without a trailing slash
    pub fn wallet_base(&self) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            self.wallet_path.trim_matches('/')
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_limit: PAGE_LIMIT,
        }
    }
}

/// Where the backend session is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_wallet_path() -> String {
    DEFAULT_WALLET_PATH.to_string()
}

fn default_page_limit() -> usize {
    PAGE_LIMIT
}

fn default_session_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("suiworld")
        .join("auth.db")
}

impl SuiworldConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> std::result::Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(text).map_err(|e| ConfigError::TomlParse(e.to_string()))?;
        config.fill_derived();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoreError::config(&path_str, "*", ConfigError::Io(e.to_string())))?;
        let config = Self::from_toml(&text).map_err(|e| {
            let field = match &e {
                ConfigError::InvalidValue { field, .. } => field.clone(),
                _ => "*".to_string(),
            };
            CoreError::config(&path_str, field, e)
        })?;
        tracing::debug!(path = %path_str, "loaded configuration");
        Ok(config)
    }

    /// Load a TOML file, then apply environment overrides on top
    pub fn load_with_env(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layered(path.as_ref(), |key| std::env::var(key).ok())
    }

    fn load_layered(path: &Path, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_vars(var);
        config.validate().map_err(|e| {
            let field = match &e {
                ConfigError::InvalidValue { field, .. } => field.clone(),
                _ => "*".to_string(),
            };
            CoreError::config(path.display().to_string(), field, e)
        })?;
        Ok(config)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Serialize to TOML text
    pub fn to_toml(&self) -> std::result::Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::TomlSerialize(e.to_string()))
    }

    /// Apply environment variable overrides.
    ///
    /// - `SUI_NETWORK` -> sui.network (and the default rpc_url for it)
    /// - `SUI_RPC_URL` -> sui.rpc_url
    /// - `SUI_PACKAGE_ID` -> sui.package_id
    /// - `SUI_MESSAGE_BOARD_ID` -> sui.message_board_id
    /// - `SUIWORLD_BACKEND_URL` -> backend.url
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        if let Some(network) = var("SUI_NETWORK") {
            if self.sui.rpc_url == fullnode_url(&self.sui.network) {
                self.sui.rpc_url = fullnode_url(&network);
            }
            self.sui.network = network;
        }
        if let Some(rpc_url) = var("SUI_RPC_URL") {
            self.sui.rpc_url = rpc_url;
        }
        if let Some(package_id) = var("SUI_PACKAGE_ID") {
            self.sui.package_id = package_id;
        }
        if let Some(board_id) = var("SUI_MESSAGE_BOARD_ID") {
            self.sui.message_board_id = board_id;
        }
        if let Some(url) = var("SUIWORLD_BACKEND_URL") {
            self.backend.url = url;
        }
    }

    fn fill_derived(&mut self) {
        if self.sui.rpc_url.trim().is_empty() {
            self.sui.rpc_url = fullnode_url(&self.sui.network);
        }
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.feed.page_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.page_limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.backend.url.starts_with("http://") && !self.backend.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "backend.url".to_string(),
                reason: format!("expected an http(s) URL, got '{}'", self.backend.url),
            });
        }
        Ok(())
    }
}
