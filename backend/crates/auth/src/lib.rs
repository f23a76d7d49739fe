//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the session issuer
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration and login with user name + password
//! - Server-side sessions referenced by a signed cookie token
//! - Operator gate for privileged routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper), never logged
//! - Unknown user and wrong password are indistinguishable, timing included
//! - Session tokens: 256-bit random ID + HMAC-SHA256 signature, 10 minute TTL
//! - SQL text is compile-time constant; input is always bound

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult, SessionError};
pub use infra::{memory::InMemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::router::auth_router;

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
