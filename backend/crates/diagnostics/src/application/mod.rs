//! Application Layer

pub mod config;
pub mod snapshot;

pub use config::DiagnosticsConfig;
pub use snapshot::SnapshotUseCase;
