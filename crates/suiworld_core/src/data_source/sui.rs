//! Sui JSON-RPC message source.
//!
//! Messages live as dynamic fields of a shared message board object. A page is
//! read in two round trips: `suix_getDynamicFields` for the ids and cursor,
//! then `sui_multiGetObjects` for the message contents.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::SuiConfig;
use crate::error::{CoreError, Result};

use super::parse::{extract_message_id, parse_message_object};
use super::{MessagePage, MessageSource, PageCursor};

/// Error object of a JSON-RPC 2.0 response
#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// `suix_getDynamicFields` result page
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DynamicFieldPage {
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default)]
    has_next_page: Option<bool>,
}

/// Message source backed by a Sui full node.
#[derive(Debug)]
pub struct SuiMessageSource {
    client: reqwest::Client,
    rpc_url: String,
    message_board_id: Option<String>,
    request_id: AtomicU64,
}

impl SuiMessageSource {
    pub fn new(rpc_url: impl Into<String>, message_board_id: Option<String>) -> Self {
        Self {
            client: crate::http_client(),
            rpc_url: rpc_url.into(),
            message_board_id: message_board_id.filter(|id| !id.trim().is_empty()),
            request_id: AtomicU64::new(1),
        }
    }

    pub fn from_config(config: &SuiConfig) -> Self {
        Self::new(config.rpc_url.clone(), Some(config.message_board_id.clone()))
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CoreError::transport(&self.rpc_url, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CoreError::transport(&self.rpc_url, e))?;
        if !status.is_success() {
            return Err(CoreError::HttpStatus {
                endpoint: self.rpc_url.clone(),
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: RpcEnvelope =
            serde_json::from_str(&text).map_err(|e| CoreError::decode(method, e))?;
        if let Some(err) = envelope.error {
            return Err(CoreError::Rpc {
                method: method.to_string(),
                code: err.code,
                message: err.message,
            });
        }
        Ok(envelope.result.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl MessageSource for SuiMessageSource {
    async fn fetch_page(&self, cursor: Option<&PageCursor>, limit: usize) -> Result<MessagePage> {
        let Some(board_id) = self.message_board_id.as_deref() else {
            debug!("no message board configured, returning empty page");
            return Ok(MessagePage::empty());
        };

        let fields = self
            .call(
                "suix_getDynamicFields",
                json!([board_id, cursor.map(PageCursor::as_str), limit]),
            )
            .await?;
        let fields: DynamicFieldPage = if fields.is_null() {
            DynamicFieldPage::default()
        } else {
            serde_json::from_value(fields)
                .map_err(|e| CoreError::decode("suix_getDynamicFields result", e))?
        };

        let next_cursor = fields.next_cursor.map(PageCursor);
        let has_next_page = fields.has_next_page.unwrap_or(false);

        let ids: Vec<String> = fields.data.iter().filter_map(extract_message_id).collect();
        debug!(
            fields = fields.data.len(),
            ids = ids.len(),
            has_next_page,
            "fetched message board fields"
        );
        if ids.is_empty() {
            return Ok(MessagePage {
                messages: Vec::new(),
                next_cursor,
                has_next_page,
            });
        }

        let objects = self
            .call(
                "sui_multiGetObjects",
                json!([ids, { "showContent": true, "showType": true }]),
            )
            .await?;
        let objects = objects.as_array().map(Vec::as_slice).unwrap_or_default();

        let messages: Vec<_> = objects.iter().filter_map(parse_message_object).collect();
        if messages.len() < objects.len() {
            warn!(
                skipped = objects.len() - messages.len(),
                "skipped unreadable message objects"
            );
        }

        Ok(MessagePage {
            messages,
            next_cursor,
            has_next_page,
        })
    }
}
