pub mod container;
pub mod memory;

pub use container::{Container, Document, PartitionKey, StoreError};
pub use memory::MemoryContainer;
