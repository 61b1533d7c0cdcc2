//! In-memory adapters for testing.

mod position_store;

pub use position_store::{InMemoryStore, MemoryUnitOfWork};
