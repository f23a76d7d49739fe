//! Files (Resource Gateway) Backend Module
//!
//! Serves raw bytes of files below one configured root directory.
//!
//! - `domain/` - `ResourcePath` (lexical validation) and the `FileStore` trait
//! - `application/` - `FetchResourceUseCase`, configuration
//! - `infra/` - filesystem store (canonicalisation + root containment)
//! - `presentation/` - `GET /secret` handler and router
//!
//! Rejections never echo the requested path back to the client or into
//! the logs.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use application::config::FilesConfig;
pub use error::{ResourceError, ResourceResult};
pub use infra::fs::FsFileStore;
pub use presentation::router::files_router;
