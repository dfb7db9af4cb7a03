//! Error types for suiworld_auth.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for session operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur in session storage and exchange.
#[derive(Debug, Error, Diagnostic)]
pub enum AuthError {
    /// Database error from sqlx.
    #[error("Database error: {0}")]
    #[diagnostic(code(suiworld_auth::database))]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    #[diagnostic(code(suiworld_auth::migration))]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// IO error.
    #[error("IO error: {0}")]
    #[diagnostic(code(suiworld_auth::io))]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    #[diagnostic(code(suiworld_auth::serde))]
    Serde(#[from] serde_json::Error),

    /// No usable session: no access token, the backend was unreachable, or
    /// the backend rejected the token. Any stored session has been cleared.
    #[error("No active session")]
    #[diagnostic(
        code(suiworld_auth::missing_session),
        help("Sign in again to obtain a new access token")
    )]
    MissingSession,

    /// The backend refused the exchange for a reason other than auth.
    #[error("Session exchange failed ({status}): {detail}")]
    #[diagnostic(code(suiworld_auth::exchange_failed))]
    ExchangeFailed { status: u16, detail: String },
}
