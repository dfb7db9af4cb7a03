use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration-specific errors
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(String),

    #[error("Invalid value for field {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    #[error("Request to {endpoint} failed")]
    #[diagnostic(
        code(suiworld_core::transport),
        help("Check network connectivity and that {endpoint} is reachable")
    )]
    Transport {
        endpoint: String,
        #[source]
        cause: reqwest::Error,
    },

    #[error("HTTP {status} from {endpoint}")]
    #[diagnostic(
        code(suiworld_core::http_status),
        help("The server rejected the request; see the response body for details")
    )]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("JSON-RPC {method} failed ({code}): {message}")]
    #[diagnostic(
        code(suiworld_core::rpc_error),
        help("The Sui node returned an error object for {method}")
    )]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },

    #[error("Failed to decode {data_type}")]
    #[diagnostic(
        code(suiworld_core::decode_error),
        help("The response body did not match the expected {data_type} shape")
    )]
    Decode {
        data_type: String,
        #[source]
        cause: serde_json::Error,
    },

    #[error("Configuration error for field '{field}'")]
    #[diagnostic(
        code(suiworld_core::configuration_error),
        help("Check configuration file at {config_path}")
    )]
    ConfigurationError {
        config_path: String,
        field: String,
        #[source]
        cause: ConfigError,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub fn transport(endpoint: impl Into<String>, cause: reqwest::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            cause,
        }
    }

    pub fn decode(data_type: impl Into<String>, cause: serde_json::Error) -> Self {
        Self::Decode {
            data_type: data_type.into(),
            cause,
        }
    }

    pub fn config(
        config_path: impl Into<String>,
        field: impl Into<String>,
        cause: ConfigError,
    ) -> Self {
        Self::ConfigurationError {
            config_path: config_path.into(),
            field: field.into(),
            cause,
        }
    }

    /// Short text suitable for showing next to a feed that failed to load.
    ///
    /// Transport failures and error statuses without a structured body
    /// collapse to a generic message. A structured body shows its `detail`
    /// (or JSON-RPC `error.message`); other errors keep their description.
    pub fn display_message(&self) -> String {
        match self {
            CoreError::Transport { .. } => GENERIC_LOAD_FAILURE.to_string(),
            CoreError::HttpStatus { body, .. } => {
                structured_detail(body).unwrap_or_else(|| GENERIC_LOAD_FAILURE.to_string())
            }
            other => other.to_string(),
        }
    }
}

const GENERIC_LOAD_FAILURE: &str = "Failed to load feed";

/// `detail` or `error.message` from a JSON error body
fn structured_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(serde_json::Value::as_str)
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
        })
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}
