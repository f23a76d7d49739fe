//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::DiagnosticsAppState;
pub use router::diagnostics_router;
