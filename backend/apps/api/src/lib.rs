//! API Application
//!
//! Configuration loading and router composition for the `api` binary.
//! Kept as a library so the whole HTTP surface can be exercised in tests
//! without binding a socket.

pub mod config;
pub mod router;


pub use config::AppConfig;
pub use router::build_router;

use auth::domain::repository::SessionRepository;

/// Remove sessions that expired while the server was down
///
/// Failures are logged and swallowed; they must not prevent startup.
pub async fn purge_expired_sessions<R>(repo: &R) -> u64
where
    R: SessionRepository,
{
    match repo.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Auth session cleanup completed");
            sessions
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth session cleanup failed, continuing anyway");
            0
        }
    }
}
