//! Domain Layer

pub mod snapshot;

pub use snapshot::DiagnosticsSnapshot;
