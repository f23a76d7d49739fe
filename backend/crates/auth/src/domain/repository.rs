//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer (`infra::postgres`, `infra::memory`); use cases
//! only ever see these traits.

use crate::domain::entity::{auth_session::AuthSession, identity::Identity};
use crate::domain::value_object::{session_id::SessionId, user_name::UserName};
use crate::error::AuthResult;

/// Identity repository trait
#[trait_variant::make(IdentityRepository: Send)]
pub trait LocalIdentityRepository {
    /// Insert or overwrite the identity keyed by its user name
    async fn save(&self, identity: &Identity) -> AuthResult<()>;

    /// Find identity by user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<Identity>>;
}

/// Auth session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID (expired rows included)
    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>>;

    /// Delete a session, returns whether a row existed
    async fn delete(&self, session_id: &SessionId) -> AuthResult<bool>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
