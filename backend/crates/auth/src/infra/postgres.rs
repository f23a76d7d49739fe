//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::{auth_session::AuthSession, identity::Identity};
use crate::domain::repository::{IdentityRepository, SessionRepository};
use crate::domain::value_object::{
    session_id::SessionId, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};
use crate::infra::sql;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Identity Repository Implementation
// ============================================================================

impl IdentityRepository for PgAuthRepository {
    async fn save(&self, identity: &Identity) -> AuthResult<()> {
        sql::query(sql::UPSERT_IDENTITY)
            .bind(identity.user_name.as_str())
            .bind(identity.password_hash.as_phc_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<Identity>> {
        let row = sql::query_as::<IdentityRow>(sql::SELECT_IDENTITY_BY_USERNAME)
            .bind(user_name.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(IdentityRow::into_identity).transpose()
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sql::query(sql::INSERT_SESSION)
            .bind(session.session_id.as_str())
            .bind(session.user_name.as_str())
            .bind(session.expires_at)
            .bind(session.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        let row = sql::query_as::<SessionRow>(sql::SELECT_SESSION_BY_ID)
            .bind(session_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(SessionRow::into_session).transpose()
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<bool> {
        let deleted = sql::query(sql::DELETE_SESSION)
            .bind(session_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sql::query(sql::DELETE_EXPIRED_SESSIONS)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct IdentityRow {
    username: String,
    password_hash: String,
}

impl IdentityRow {
    fn into_identity(self) -> AuthResult<Identity> {
        let user_name = UserName::new(&self.username)
            .map_err(|e| AuthError::Internal(format!("Invalid user name in database: {e}")))?;
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))?;

        Ok(Identity::new(user_name, password_hash))
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: String,
    username: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> AuthResult<AuthSession> {
        let session_id = SessionId::parse(&self.session_id)
            .ok_or_else(|| AuthError::Internal("Invalid session ID in database".to_string()))?;
        let user_name = UserName::new(&self.username)
            .map_err(|e| AuthError::Internal(format!("Invalid user name in database: {e}")))?;

        Ok(AuthSession {
            session_id,
            user_name,
            expires_at: self.expires_at,
            created_at: self.created_at,
        })
    }
}
