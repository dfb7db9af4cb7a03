//! Wallet and swap backend client.
//!
//! [`WalletClient`] talks to the backend's `/api/wallet` endpoints. Non-2xx
//! responses become a [`WalletApiError`] carrying the backend's `code` and
//! `detail`; [`WalletApiError::user_message`] maps known codes to localized
//! text. [`SwapForm`] holds the swap screen's state between user actions.

mod client;
mod error;
mod swap;
mod types;

pub use client::{WalletClient, WalletResult, generate_idempotency_key};
pub use error::{
    WALLET_CHAIN_UNAVAILABLE, WALLET_SAME_SYMBOL, WALLET_SWAP_FAILED, WALLET_UNKNOWN,
    WalletApiError,
};
pub use swap::{ConfirmOverrides, SwapForm, parse_pay_amount};
pub use types::{
    AssetBalance, AssetSymbol, DepositAddress, SwapExecuteRequest, SwapQuote, SwapQuoteRequest,
    SwapReceipt, WalletSummary,
};
