use miette::Diagnostic;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Fallback code when the backend did not send one
pub const WALLET_UNKNOWN: &str = "WALLET_UNKNOWN";
/// Code recorded when a swap execution fails without a backend code
pub const WALLET_SWAP_FAILED: &str = "WALLET_SWAP_FAILED";
pub const WALLET_SAME_SYMBOL: &str = "WALLET_SAME_SYMBOL";
pub const WALLET_CHAIN_UNAVAILABLE: &str = "WALLET_CHAIN_UNAVAILABLE";

pub(crate) const DEFAULT_ERROR_MESSAGE: &str = "요청 처리 중 문제가 발생했어요.";
pub(crate) const QUOTE_FAILED_MESSAGE: &str = "견적을 받아오는 데 실패했어요.";
pub(crate) const SWAP_FAILED_MESSAGE: &str = "스왑 실행에 실패했어요.";

/// Localized text for codes the app explains itself
const USER_MESSAGES: &[(&str, &str)] = &[
    (WALLET_SAME_SYMBOL, "같은 자산끼리는 스왑할 수 없어요."),
    (
        WALLET_CHAIN_UNAVAILABLE,
        "현재 체인 조회가 불가합니다. 잠시 후 다시 시도해 주세요.",
    ),
];

/// A failed wallet API call.
///
/// `status` is `None` when no HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message} ({code})")]
#[diagnostic(
    code(suiworld_core::wallet),
    help("Show `user_message()` to the user; `code` identifies the failure")
)]
pub struct WalletApiError {
    pub code: String,
    pub message: String,
    pub status: Option<u16>,
}

/// `{code, detail}` error body sent by the wallet API
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    detail: Option<Value>,
}

impl WalletApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Build the error for a non-2xx response.
    ///
    /// Reads `code` and `detail` when they are strings. A body whose `detail`
    /// is itself a `{code, detail}` object is unwrapped first.
    pub fn from_response(status: u16, body: &str) -> Self {
        let mut parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        if let Some(Value::Object(inner)) = &mut parsed.detail {
            let code = inner.remove("code");
            let detail = inner.remove("detail");
            parsed.code = code.or(parsed.code.take());
            parsed.detail = detail;
        }

        let code = match parsed.code {
            Some(Value::String(code)) => code,
            _ => WALLET_UNKNOWN.to_string(),
        };
        let message = match parsed.detail {
            Some(Value::String(detail)) => detail,
            _ => DEFAULT_ERROR_MESSAGE.to_string(),
        };
        Self::new(code, message).with_status(status)
    }

    /// Text to show the user: the localized message for known codes,
    /// otherwise the server's detail.
    pub fn user_message(&self) -> &str {
        USER_MESSAGES
            .iter()
            .find(|(code, _)| *code == self.code)
            .map_or(self.message.as_str(), |(_, text)| *text)
    }
}

impl From<reqwest::Error> for WalletApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(WALLET_UNKNOWN, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_code_uses_local_message() {
        let err = WalletApiError::from_response(
            400,
            r#"{"code":"WALLET_SAME_SYMBOL","detail":"pay and receive symbols match"}"#,
        );
        assert_eq!(err.code, WALLET_SAME_SYMBOL);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.message, "pay and receive symbols match");
        assert_eq!(err.user_message(), "같은 자산끼리는 스왑할 수 없어요.");
    }

    #[test]
    fn test_unknown_code_falls_back_to_detail() {
        let err = WalletApiError::from_response(
            409,
            r#"{"code":"WALLET_INSUFFICIENT_BALANCE","detail":"not enough SUI"}"#,
        );
        assert_eq!(err.user_message(), "not enough SUI");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let err = WalletApiError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(err.code, WALLET_UNKNOWN);
        assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);

        let err = WalletApiError::from_response(500, r#"{"code":7,"detail":["x"]}"#);
        assert_eq!(err.code, WALLET_UNKNOWN);
        assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_nested_detail_is_unwrapped() {
        let err = WalletApiError::from_response(
            503,
            r#"{"detail":{"code":"WALLET_CHAIN_UNAVAILABLE","detail":"rpc down"}}"#,
        );
        assert_eq!(err.code, WALLET_CHAIN_UNAVAILABLE);
        assert_eq!(err.message, "rpc down");
        assert_eq!(
            err.user_message(),
            "현재 체인 조회가 불가합니다. 잠시 후 다시 시도해 주세요."
        );
    }
}
