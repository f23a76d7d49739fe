//! Session Issuer
//!
//! Issues, validates and revokes server-side sessions.
//!
//! Token format: `<session_id>.<signature>` where `session_id` is 256 random
//! bits (base64url) and `signature` is HMAC-SHA256 of the ID under the
//! server secret (base64url). The signature lets forged tokens be rejected
//! without touching the store; the stored row is what binds the token to
//! exactly one identity.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::Deadline;
use platform::crypto::{HmacSigner, from_base64url, to_base64url};

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{session_id::SessionId, user_name::UserName};
use crate::error::{AuthError, AuthResult, SessionError};

/// Freshly issued session
#[derive(Debug)]
pub struct IssuedSession {
    /// Value for the session cookie
    pub token: String,
    pub session: AuthSession,
}

/// Session issuer
pub struct SessionIssuer<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
    signer: HmacSigner,
}

impl<S> SessionIssuer<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        let signer = HmacSigner::new(&config.session_secret);
        Self {
            session_repo,
            config,
            signer,
        }
    }

    /// Create and store a session for `user_name`
    pub async fn issue(
        &self,
        user_name: UserName,
        deadline: Deadline,
    ) -> AuthResult<IssuedSession> {
        self.issue_at(user_name, Utc::now(), deadline).await
    }

    pub(crate) async fn issue_at(
        &self,
        user_name: UserName,
        now: DateTime<Utc>,
        deadline: Deadline,
    ) -> AuthResult<IssuedSession> {
        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;
        let session = AuthSession::new(user_name, ttl, now);

        deadline.run(self.session_repo.create(&session)).await??;

        tracing::info!(
            target: "audit",
            user_name = %session.user_name,
            session = session.session_id.log_prefix(),
            expires_at = %session.expires_at,
            "Session issued"
        );

        Ok(IssuedSession {
            token: self.token_for(&session.session_id),
            session,
        })
    }

    /// Resolve a token to its live session.
    ///
    /// Expired sessions are deleted on sight.
    pub async fn validate(&self, token: &str, deadline: Deadline) -> AuthResult<AuthSession> {
        let session_id = self.parse_token(token)?;

        let session = deadline
            .run(self.session_repo.find_by_id(&session_id))
            .await??
            .ok_or(SessionError::UnknownToken)?;

        if session.is_expired() {
            deadline.run(self.session_repo.delete(&session_id)).await??;
            tracing::debug!(session = session_id.log_prefix(), "Expired session removed");
            return Err(SessionError::Expired.into());
        }

        Ok(session)
    }

    /// Revoke the session behind `token`.
    ///
    /// Returns whether a live row was removed; unknown or forged tokens
    /// are not an error.
    pub async fn revoke(&self, token: &str, deadline: Deadline) -> AuthResult<bool> {
        let Ok(session_id) = self.parse_token(token) else {
            return Ok(false);
        };

        let deleted = deadline.run(self.session_repo.delete(&session_id)).await??;
        if deleted {
            tracing::info!(
                target: "audit",
                session = session_id.log_prefix(),
                "Session revoked"
            );
        }
        Ok(deleted)
    }

    pub(crate) fn token_for(&self, session_id: &SessionId) -> String {
        let signature = self.signer.sign(session_id.as_str().as_bytes());
        format!("{}.{}", session_id.as_str(), to_base64url(&signature))
    }

    /// Parse and verify session token
    fn parse_token(&self, token: &str) -> Result<SessionId, SessionError> {
        let (id_part, signature_b64) = token.split_once('.').ok_or(SessionError::UnknownToken)?;

        let session_id = SessionId::parse(id_part).ok_or(SessionError::UnknownToken)?;
        let signature = from_base64url(signature_b64).map_err(|_| SessionError::UnknownToken)?;

        if !self.signer.verify(session_id.as_str().as_bytes(), &signature) {
            return Err(SessionError::UnknownToken);
        }

        Ok(session_id)
    }
}
