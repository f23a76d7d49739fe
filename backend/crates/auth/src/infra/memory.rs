//! In-Memory Repository Implementations
//!
//! Process-local store used when no database is configured and in tests.
//! Both maps sit behind `tokio::sync::RwLock`; clones share state.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entity::{auth_session::AuthSession, identity::Identity};
use crate::domain::repository::{IdentityRepository, SessionRepository};
use crate::domain::value_object::{session_id::SessionId, user_name::UserName};
use crate::error::AuthResult;

#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    identities: Arc<RwLock<HashMap<UserName, Identity>>>,
    sessions: Arc<RwLock<HashMap<SessionId, AuthSession>>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn identity_count(&self) -> usize {
        self.identities.read().await.len()
    }
}

impl IdentityRepository for InMemoryAuthRepository {
    async fn save(&self, identity: &Identity) -> AuthResult<()> {
        self.identities
            .write()
            .await
            .insert(identity.user_name.clone(), identity.clone());
        Ok(())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<Identity>> {
        Ok(self.identities.read().await.get(user_name).cloned())
    }
}

impl SessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<bool> {
        Ok(self.sessions.write().await.remove(session_id).is_some())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        let deleted = (before - sessions.len()) as u64;

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}
