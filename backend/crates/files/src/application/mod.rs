//! Application Layer

pub mod config;
pub mod fetch_resource;

pub use config::FilesConfig;
pub use fetch_resource::FetchResourceUseCase;
