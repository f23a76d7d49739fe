//! Diagnostics Backend Module
//!
//! Operator-only snapshot of selected environment values.
//!
//! - `domain/` - `DiagnosticsSnapshot`
//! - `application/` - `SnapshotUseCase`, configuration
//! - `presentation/` - `GET /debug_env` handler and router
//!
//! The router carries no access control of its own. Mount it only when
//! enabled and behind the operator gate.

pub mod application;
pub mod domain;
pub mod presentation;


pub use application::config::DiagnosticsConfig;
pub use presentation::{DiagnosticsAppState, diagnostics_router};
