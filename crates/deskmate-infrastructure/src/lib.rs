pub mod config;
pub mod json_store;
pub mod memory_store;
pub mod paths;

pub use config::ClientConfig;
pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use paths::DeskmatePaths;
