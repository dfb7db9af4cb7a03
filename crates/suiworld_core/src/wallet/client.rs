//! HTTP client for the wallet backend.

use rand::TryRngCore;
use rand::rngs::OsRng;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::BackendConfig;

use super::error::{WALLET_UNKNOWN, WalletApiError};
use super::types::{
    AssetSymbol, DepositAddress, SwapExecuteRequest, SwapQuote, SwapQuoteRequest, SwapReceipt,
    WalletSummary,
};

pub type WalletResult<T> = std::result::Result<T, WalletApiError>;

/// Random UUID v4 for swap execution, or `None` if the OS RNG is unavailable.
pub fn generate_idempotency_key() -> Option<String> {
    let mut bytes = [0u8; 16];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => Some(
            uuid::Builder::from_random_bytes(bytes)
                .into_uuid()
                .to_string(),
        ),
        Err(e) => {
            warn!(error = %e, "could not generate idempotency key");
            None
        }
    }
}

/// Client for the `/api/wallet` endpoints.
#[derive(Debug, Clone)]
pub struct WalletClient {
    client: reqwest::Client,
    base_url: String,
}

impl WalletClient {
    /// `base_url` is the full wallet API base, e.g. `http://host/api/wallet`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: crate::http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.wallet_base())
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Balances, ordered SWT, SUI, BTC, ETH
    pub async fn summary(&self) -> WalletResult<WalletSummary> {
        let mut summary: WalletSummary = self.get("/summary").await?;
        summary.sort_assets();
        Ok(summary)
    }

    pub async fn quote(&self, request: &SwapQuoteRequest) -> WalletResult<SwapQuote> {
        self.post("/swap/quote", request).await
    }

    /// Execute a swap. A request without an idempotency key gets a generated
    /// one; if none can be generated the request is sent without it.
    pub async fn execute(&self, request: SwapExecuteRequest) -> WalletResult<SwapReceipt> {
        let mut request = request;
        if request.idempotency_key.is_none() {
            request.idempotency_key = generate_idempotency_key();
        }
        self.post("/swap/execute", &request).await
    }

    /// Deposit address for `symbol`
    pub async fn address(&self, symbol: AssetSymbol) -> WalletResult<DepositAddress> {
        self.get(&format!("/address/{symbol}")).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> WalletResult<T> {
        let url = format!("{}{}", self.base_url, path);
        self.send(path, self.client.get(url)).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> WalletResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        self.send(path, self.client.post(url).json(body)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> WalletResult<T> {
        debug!(path, "wallet request");
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(path, error = %e, "wallet request failed");
                WalletApiError::from(e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(WalletApiError::from)?;
        if !status.is_success() {
            let err = WalletApiError::from_response(status.as_u16(), &text);
            warn!(path, status = status.as_u16(), code = %err.code, "wallet API error");
            return Err(err);
        }

        serde_json::from_str(&text).map_err(|e| {
            WalletApiError::new(WALLET_UNKNOWN, format!("invalid response from {path}: {e}"))
                .with_status(status.as_u16())
        })
    }
}
