//! SuiWorld Auth - Backend session exchange and storage.
//!
//! The app signs users in with an identity provider, then trades the
//! provider's access token for a backend session. This crate performs that
//! exchange and keeps the resulting session in a local SQLite `auth.db`:
//!
//! - [`SessionClient::exchange`] stores the session on success and clears it
//!   when the backend is unreachable or rejects the token
//! - [`SessionClient::logout`] clears it
//! - [`SessionDb`] exposes load/save/clear directly

pub mod db;
pub mod error;
pub mod exchange;
pub mod session;

pub use db::SessionDb;
pub use error::{AuthError, AuthResult};
pub use exchange::SessionClient;
pub use session::{BackendProfile, BackendSession, ExchangePayload, StoredSession};
