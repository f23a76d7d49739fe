//! Data Transfer Objects

use serde::Serialize;

use crate::domain::snapshot::DiagnosticsSnapshot;

/// Response body for `GET /debug_env`
#[derive(Serialize)]
pub struct SnapshotResponse {
    pub secret: String,
}

impl From<DiagnosticsSnapshot> for SnapshotResponse {
    fn from(snapshot: DiagnosticsSnapshot) -> Self {
        Self {
            secret: snapshot.secret,
        }
    }
}
