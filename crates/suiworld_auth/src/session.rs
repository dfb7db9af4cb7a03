//! Backend session records and their storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::SessionDb;
use crate::error::AuthResult;

/// User profile as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendProfile {
    pub id: i64,
    #[serde(default)]
    pub supabase_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub sui_address: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub session_key: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Bearer token issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSession {
    pub token: String,
    pub expires_at: String,
}

/// Response body of a successful session exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangePayload {
    pub profile: BackendProfile,
    pub session: BackendSession,
}

/// The persisted form of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub token: String,
    pub expires_at: String,
    pub profile: BackendProfile,
}

impl StoredSession {
    /// Expiry time, if `expires_at` is an RFC 3339 timestamp
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.expires_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Whether the session has expired at `now`. Unparseable expiry times
    /// count as not expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at_utc().is_some_and(|t| t <= now)
    }
}

impl From<&ExchangePayload> for StoredSession {
    fn from(payload: &ExchangePayload) -> Self {
        Self {
            token: payload.session.token.clone(),
            expires_at: payload.session.expires_at.clone(),
            profile: payload.profile.clone(),
        }
    }
}

/// Database row for the backend_session table.
#[derive(Debug, sqlx::FromRow)]
struct StoredSessionRow {
    token: String,
    expires_at: String,
    profile: String,
}

impl StoredSessionRow {
    fn to_session(&self) -> AuthResult<StoredSession> {
        Ok(StoredSession {
            token: self.token.clone(),
            expires_at: self.expires_at.clone(),
            profile: serde_json::from_str(&self.profile)?,
        })
    }
}

impl SessionDb {
    /// Get the stored session, if any.
    pub async fn load_session(&self) -> AuthResult<Option<StoredSession>> {
        let row = sqlx::query_as::<_, StoredSessionRow>(
            "SELECT token, expires_at, profile FROM backend_session WHERE id = 1",
        )
        .fetch_optional(self.pool())
        .await?;

        row.map(|row| row.to_session()).transpose()
    }

    /// Store `session`, replacing any previous one.
    pub async fn save_session(&self, session: &StoredSession) -> AuthResult<()> {
        let profile_json = serde_json::to_string(&session.profile)?;
        let now = Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT INTO backend_session (id, token, expires_at, profile, saved_at)
            VALUES (1, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                expires_at = excluded.expires_at,
                profile = excluded.profile,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(&session.token)
        .bind(&session.expires_at)
        .bind(&profile_json)
        .bind(now)
        .execute(self.pool())
        .await?;

        debug!(profile_id = session.profile.id, "stored backend session");
        Ok(())
    }

    /// Remove the stored session. Returns whether one existed.
    pub async fn clear_session(&self) -> AuthResult<bool> {
        let result = sqlx::query("DELETE FROM backend_session WHERE id = 1")
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
