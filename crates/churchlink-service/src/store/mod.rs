//! Store implementations that live inside the service layer.

pub mod memory;

pub use memory::{MemoryPageStore, Snapshot};
