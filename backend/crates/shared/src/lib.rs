//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" shared by every bounded context:
//! - Common error types and result aliases
//! - Request deadlines propagated from the HTTP layer into use cases
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod deadline;

pub use deadline::{Deadline, DeadlineExceeded};
pub use error::app_error::{AppError, AppResult};
pub use error::kind::ErrorKind;
