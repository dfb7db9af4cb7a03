//! Swap form state: symbols, amount, last quote and last error.

use tracing::{debug, info};

use super::client::{WalletClient, generate_idempotency_key};
use super::error::{
    QUOTE_FAILED_MESSAGE, SWAP_FAILED_MESSAGE, WALLET_SWAP_FAILED, WALLET_UNKNOWN, WalletApiError,
};
use super::types::{AssetSymbol, SwapExecuteRequest, SwapQuote, SwapQuoteRequest, SwapReceipt};

const DEFAULT_PAY: AssetSymbol = AssetSymbol::Sui;
const DEFAULT_RECEIVE: AssetSymbol = AssetSymbol::Swt;

/// Parse a user-entered pay amount. Blank, non-numeric, non-finite and
/// non-positive amounts are rejected.
pub fn parse_pay_amount(amount: &str) -> Option<f64> {
    let value: f64 = amount.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Values that replace the form's own when confirming a swap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmOverrides {
    pub pay_symbol: Option<AssetSymbol>,
    pub receive_symbol: Option<AssetSymbol>,
    pub pay_amount: Option<String>,
    pub slippage_bps: Option<u32>,
    pub idempotency_key: Option<String>,
}

/// State of the swap screen between user actions.
///
/// Quotes and executions go through the [`WalletClient`]; their failures are
/// kept in [`SwapForm::error`] rather than returned.
#[derive(Debug)]
pub struct SwapForm {
    client: WalletClient,
    pay_symbol: AssetSymbol,
    receive_symbol: AssetSymbol,
    pay_amount: String,
    quote: Option<SwapQuote>,
    error: Option<WalletApiError>,
}

impl SwapForm {
    pub fn new(client: WalletClient) -> Self {
        Self {
            client,
            pay_symbol: DEFAULT_PAY,
            receive_symbol: DEFAULT_RECEIVE,
            pay_amount: String::new(),
            quote: None,
            error: None,
        }
    }

    pub fn pay_symbol(&self) -> AssetSymbol {
        self.pay_symbol
    }

    pub fn receive_symbol(&self) -> AssetSymbol {
        self.receive_symbol
    }

    pub fn pay_amount(&self) -> &str {
        &self.pay_amount
    }

    pub fn quote(&self) -> Option<&SwapQuote> {
        self.quote.as_ref()
    }

    pub fn error(&self) -> Option<&WalletApiError> {
        self.error.as_ref()
    }

    /// Localized text for the current error, if any
    pub fn user_message(&self) -> Option<&str> {
        self.error.as_ref().map(WalletApiError::user_message)
    }

    pub fn set_pay_symbol(&mut self, symbol: AssetSymbol) {
        self.pay_symbol = symbol;
    }

    pub fn set_receive_symbol(&mut self, symbol: AssetSymbol) {
        self.receive_symbol = symbol;
    }

    pub fn set_pay_amount(&mut self, amount: impl Into<String>) {
        self.pay_amount = amount.into();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Swap pay and receive symbols. Any quote is for the old direction and
    /// is dropped.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.pay_symbol, &mut self.receive_symbol);
        self.quote = None;
        self.error = None;
    }

    pub fn reset(&mut self) {
        self.pay_symbol = DEFAULT_PAY;
        self.receive_symbol = DEFAULT_RECEIVE;
        self.pay_amount.clear();
        self.quote = None;
        self.error = None;
    }

    /// Fetch a quote for the current amount.
    ///
    /// An invalid amount clears the quote and makes no request.
    pub async fn request_quote(&mut self) -> Option<SwapQuote> {
        if parse_pay_amount(&self.pay_amount).is_none() {
            self.quote = None;
            return None;
        }
        self.error = None;

        if !self.pay_symbol.is_swappable() || !self.receive_symbol.is_swappable() {
            self.error = Some(WalletApiError::new(WALLET_UNKNOWN, QUOTE_FAILED_MESSAGE));
            self.quote = None;
            return None;
        }

        let request = SwapQuoteRequest::new(
            self.pay_symbol,
            self.receive_symbol,
            self.pay_amount.clone(),
        );
        match self.client.quote(&request).await {
            Ok(quote) => {
                debug!(
                    pay = %quote.pay_amount,
                    receive = %quote.receive_amount,
                    "swap quote received"
                );
                self.quote = Some(quote.clone());
                Some(quote)
            }
            Err(e) => {
                self.error = Some(e);
                self.quote = None;
                None
            }
        }
    }

    /// Execute the swap with the form's values, replaced by any `overrides`.
    ///
    /// On success the quote and amount are cleared. An invalid amount makes
    /// no request and leaves the form unchanged.
    pub async fn confirm(&mut self, overrides: ConfirmOverrides) -> Option<SwapReceipt> {
        let pay_amount = overrides
            .pay_amount
            .unwrap_or_else(|| self.pay_amount.clone());
        parse_pay_amount(&pay_amount)?;
        self.error = None;

        let pay_symbol = overrides.pay_symbol.unwrap_or(self.pay_symbol);
        let receive_symbol = overrides.receive_symbol.unwrap_or(self.receive_symbol);
        if !pay_symbol.is_swappable() || !receive_symbol.is_swappable() {
            self.error = Some(WalletApiError::new(WALLET_SWAP_FAILED, SWAP_FAILED_MESSAGE));
            return None;
        }

        let mut quote = SwapQuoteRequest::new(pay_symbol, receive_symbol, pay_amount);
        quote.slippage_bps = overrides.slippage_bps;
        let request = SwapExecuteRequest {
            quote,
            idempotency_key: overrides.idempotency_key.or_else(generate_idempotency_key),
        };

        match self.client.execute(request).await {
            Ok(receipt) => {
                info!(tx_digest = %receipt.tx_digest, "swap executed");
                self.quote = None;
                self.pay_amount.clear();
                Some(receipt)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}
