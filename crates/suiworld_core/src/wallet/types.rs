//! Wire records of the wallet API.
//!
//! Amounts and prices are decimal strings exactly as the backend sends them.

use serde::{Deserialize, Serialize};

/// Assets the wallet knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetSymbol {
    Swt,
    Sui,
    Btc,
    Eth,
}

impl AssetSymbol {
    /// Display order of balances in the wallet summary
    pub const DISPLAY_ORDER: [AssetSymbol; 4] = [Self::Swt, Self::Sui, Self::Btc, Self::Eth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swt => "SWT",
            Self::Sui => "SUI",
            Self::Btc => "BTC",
            Self::Eth => "ETH",
        }
    }

    /// Case-insensitive lookup by ticker
    pub fn parse(symbol: &str) -> Option<Self> {
        Self::DISPLAY_ORDER
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(symbol.trim()))
    }

    /// Only SWT and SUI can be swapped.
    pub fn is_swappable(&self) -> bool {
        matches!(self, Self::Swt | Self::Sui)
    }

    fn display_rank(symbol: &str) -> usize {
        Self::parse(symbol)
            .and_then(|s| Self::DISPLAY_ORDER.iter().position(|o| *o == s))
            .unwrap_or(Self::DISPLAY_ORDER.len())
    }
}

impl std::fmt::Display for AssetSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    /// Kept as text so an asset the client does not know still deserializes
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub amount: String,
    pub usd_value: String,
    pub price_usd: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub assets: Vec<AssetBalance>,
    pub updated_at: String,
}

impl WalletSummary {
    /// Reorder balances SWT, SUI, BTC, ETH. Unknown symbols go last, in
    /// their original order.
    pub fn sort_assets(&mut self) {
        self.assets
            .sort_by_key(|asset| AssetSymbol::display_rank(&asset.symbol));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuoteRequest {
    pub pay_symbol: AssetSymbol,
    pub receive_symbol: AssetSymbol,
    pub pay_amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slippage_bps: Option<u32>,
}

impl SwapQuoteRequest {
    pub fn new(
        pay_symbol: AssetSymbol,
        receive_symbol: AssetSymbol,
        pay_amount: impl Into<String>,
    ) -> Self {
        Self {
            pay_symbol,
            receive_symbol,
            pay_amount: pay_amount.into(),
            slippage_bps: None,
        }
    }

    pub fn with_slippage_bps(mut self, bps: u32) -> Self {
        self.slippage_bps = Some(bps);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    pub pay_symbol: String,
    pub receive_symbol: String,
    pub pay_amount: String,
    pub receive_amount: String,
    pub fee_rate_bps: u32,
    pub fee_amount: String,
    pub price: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapExecuteRequest {
    #[serde(flatten)]
    pub quote: SwapQuoteRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl SwapExecuteRequest {
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

impl From<SwapQuoteRequest> for SwapExecuteRequest {
    fn from(quote: SwapQuoteRequest) -> Self {
        Self {
            quote,
            idempotency_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapReceipt {
    pub tx_digest: String,
    pub chain: String,
    pub executed_at: String,
    pub pay_symbol: String,
    pub receive_symbol: String,
    pub pay_amount: String,
    pub receive_amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositAddress {
    pub symbol: AssetSymbol,
    pub address: String,
    pub chain: String,
}
