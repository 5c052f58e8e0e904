pub mod entity;
pub mod factory;
pub mod filter;
pub mod records;

pub use factory::{FilterFactory, FilterParameters};
pub use filter::Filter;
pub use records::RecordRepository;
