//! Auth Session Entity
//!
//! Server-side record binding a session ID to exactly one identity.
//! Lifecycle: issued (active) -> expired | revoked (row deleted).

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{session_id::SessionId, user_name::UserName};

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: SessionId,
    /// Owner of the session
    pub user_name: UserName,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// New session with a fresh random ID, valid for `ttl` from `now`
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_name: UserName, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            session_id: SessionId::generate(),
            user_name,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn expires_at_ms(&self) -> i64 {
        self.expires_at.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let user_name = UserName::new("alice").unwrap();
        let session = AuthSession::new(user_name, Duration::minutes(10), now);

        assert_eq!(session.expires_at, now + Duration::minutes(10));
        assert!(!session.is_expired_at(now));
        assert!(!session.is_expired_at(now + Duration::minutes(9)));
        assert!(session.is_expired_at(now + Duration::minutes(10)));
    }

    #[test]
    fn test_fresh_ids() {
        let now = Utc::now();
        let user_name = UserName::new("alice").unwrap();
        let a = AuthSession::new(user_name.clone(), Duration::minutes(10), now);
        let b = AuthSession::new(user_name, Duration::minutes(10), now);
        assert_ne!(a.session_id, b.session_id);
    }
}
