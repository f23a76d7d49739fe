//! API DTOs

use serde::Deserialize;

/// Query string of `GET /secret`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchQuery {
    pub file: Option<String>,
}
