//! SQL Statements
//!
//! Every statement the auth context runs is a constant in this module.
//! [`StaticSql`] can only be constructed here, and [`query`] / [`query_as`]
//! only accept a `StaticSql`, so query text is fixed at compile time and
//! user input can reach the database only through `.bind()`.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, Postgres};

/// Compile-time constant SQL text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSql(&'static str);

impl StaticSql {
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

pub fn query<'q>(sql: StaticSql) -> Query<'q, Postgres, PgArguments> {
    sqlx::query(sql.0)
}

pub fn query_as<'q, O>(sql: StaticSql) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    sqlx::query_as(sql.0)
}

// ============================================================================
// Identities
// ============================================================================

/// $1 username, $2 password_hash
pub const UPSERT_IDENTITY: StaticSql = StaticSql(
    r#"
    INSERT INTO users (username, password_hash)
    VALUES ($1, $2)
    ON CONFLICT (username) DO UPDATE
    SET password_hash = EXCLUDED.password_hash,
        updated_at = now()
    "#,
);

/// $1 username
pub const SELECT_IDENTITY_BY_USERNAME: StaticSql = StaticSql(
    r#"
    SELECT username, password_hash
    FROM users
    WHERE username = $1
    "#,
);

// ============================================================================
// Sessions
// ============================================================================

/// $1 session_id, $2 username, $3 expires_at, $4 created_at
pub const INSERT_SESSION: StaticSql = StaticSql(
    r#"
    INSERT INTO auth_sessions (session_id, username, expires_at, created_at)
    VALUES ($1, $2, $3, $4)
    "#,
);

/// $1 session_id
pub const SELECT_SESSION_BY_ID: StaticSql = StaticSql(
    r#"
    SELECT session_id, username, expires_at, created_at
    FROM auth_sessions
    WHERE session_id = $1
    "#,
);

/// $1 session_id
pub const DELETE_SESSION: StaticSql = StaticSql(
    r#"
    DELETE FROM auth_sessions
    WHERE session_id = $1
    "#,
);

pub const DELETE_EXPIRED_SESSIONS: StaticSql = StaticSql(
    r#"
    DELETE FROM auth_sessions
    WHERE expires_at <= now()
    "#,
);
