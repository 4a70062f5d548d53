//! In-memory storage module
//!
//! Provides the core data structures for holding typed key-value pairs in memory.
//! This module knows nothing about the storage file format (loose coupling).

mod entry;
mod value;
mod memory;

pub use entry::Entry;
pub use value::{DType, Value};
pub use memory::MemoryStore;
