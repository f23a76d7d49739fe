//! Infrastructure Layer
//!
//! Repository implementations.

pub mod memory;
pub mod postgres;
pub mod sql;

pub use memory::InMemoryAuthRepository;
pub use postgres::PgAuthRepository;
