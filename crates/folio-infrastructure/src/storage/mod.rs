//! Storage scope implementations.

mod file_scope;
mod memory_scope;

pub use file_scope::FileStorageScope;
pub use memory_scope::MemoryStorageScope;
