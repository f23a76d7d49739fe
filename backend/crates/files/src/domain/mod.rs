//! Domain Layer

pub mod repository;
pub mod resource_path;

pub use repository::FileStore;
pub use resource_path::ResourcePath;
