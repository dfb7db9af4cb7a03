//! Exchange of an identity-provider access token for a backend session.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use suiworld_core::SuiworldConfig;
use tracing::{info, warn};

use crate::db::SessionDb;
use crate::error::{AuthError, AuthResult};
use crate::session::{ExchangePayload, StoredSession};

const EXCHANGE_PATH: &str = "/auth/supabase-login";
const DEFAULT_EXCHANGE_ERROR: &str = "Unable to exchange Supabase session";

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Obtains backend sessions and keeps the current one in a [`SessionDb`].
#[derive(Debug, Clone)]
pub struct SessionClient {
    client: reqwest::Client,
    backend_url: String,
    db: SessionDb,
}

impl SessionClient {
    pub fn new(backend_url: impl Into<String>, db: SessionDb) -> Self {
        Self {
            client: suiworld_core::http_client(),
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            db,
        }
    }

    /// Open the configured session database and target the configured backend.
    pub async fn from_config(config: &SuiworldConfig) -> AuthResult<Self> {
        let db = SessionDb::open(&config.session.path).await?;
        Ok(Self::new(config.backend.url.clone(), db))
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn db(&self) -> &SessionDb {
        &self.db
    }

    /// The stored session, if any
    pub async fn current_session(&self) -> AuthResult<Option<StoredSession>> {
        self.db.load_session().await
    }

    /// Trade `access_token` for a backend session and store it.
    ///
    /// An unreachable backend, a response body that cannot be read, or a 401
    /// clears the stored session and returns
    /// [`AuthError::MissingSession`]. Other failures return
    /// [`AuthError::ExchangeFailed`] and leave the store untouched.
    pub async fn exchange(&self, access_token: &str) -> AuthResult<ExchangePayload> {
        if access_token.trim().is_empty() {
            return Err(AuthError::MissingSession);
        }

        let url = format!("{}{}", self.backend_url, EXCHANGE_PATH);
        let response = match self
            .client
            .post(&url)
            .json(&json!({ "access_token": access_token }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "failed to reach backend for session exchange");
                self.db.clear_session().await?;
                return Err(AuthError::MissingSession);
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("backend rejected access token");
            self.db.clear_session().await?;
            return Err(AuthError::MissingSession);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, status = status.as_u16(), "failed to read session exchange response");
                self.db.clear_session().await?;
                return Err(AuthError::MissingSession);
            }
        };

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail)
                .and_then(|d| d.as_str().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_EXCHANGE_ERROR.to_string());
            warn!(status = status.as_u16(), %detail, "session exchange failed");
            return Err(AuthError::ExchangeFailed {
                status: status.as_u16(),
                detail,
            });
        }

        let payload: ExchangePayload = serde_json::from_str(&body)?;
        self.db.save_session(&StoredSession::from(&payload)).await?;
        info!(profile_id = payload.profile.id, "backend session persisted");
        Ok(payload)
    }

    /// Forget the stored session.
    pub async fn logout(&self) -> AuthResult<()> {
        if self.db.clear_session().await? {
            info!("backend session cleared");
        }
        Ok(())
    }
}
